use serde::Deserialize;
use thiserror::Error;

use crate::renderer::draw_list::Palette;

/// Tunables for the game, provided by the host. Loaded once at startup.
/// Every field falls back to its default when missing from JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Upper bound for the cell size in pixels (default: 20).
    pub preferred_cell_size: u32,
    /// Lower bound for the cell size in pixels (default: 15).
    pub min_cell_size: u32,
    /// The smaller surface side is divided by this to get the cell size (default: 25).
    pub cells_across_min_dimension: u32,
    /// Tick interval at round start, in milliseconds (default: 150).
    pub initial_tick_ms: f64,
    /// The tick interval never drops below this (default: 50).
    pub min_tick_ms: f64,
    /// Interval reduction per food eaten (default: 2).
    pub tick_decrement_ms: f64,
    /// Score awarded per food (default: 10).
    pub food_reward: u32,
    /// Snake length at spawn (default: 3).
    pub initial_length: usize,
    /// Random placement tries before the last try is accepted as-is (default: 1000).
    pub food_placement_attempts: u32,
    /// Seed for food placement. Hosts with an entropy source fill this in;
    /// `None` falls back to [`DEFAULT_SEED`].
    pub seed: Option<u64>,
    pub snake_color: String,
    pub food_color: String,
    pub background_color: String,
    /// Glow radius around the head, in pixels.
    pub head_glow: f64,
    /// Glow radius around the food, in pixels.
    pub food_glow: f64,
    /// Opacity of the game-over overlay (0.0-1.0).
    pub overlay_alpha: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            preferred_cell_size: 20,
            min_cell_size: 15,
            cells_across_min_dimension: 25,
            initial_tick_ms: 150.0,
            min_tick_ms: 50.0,
            tick_decrement_ms: 2.0,
            food_reward: 10,
            initial_length: 3,
            food_placement_attempts: 1000,
            seed: None,
            snake_color: "#00ff41".to_string(),
            food_color: "#00ff41".to_string(),
            background_color: "#000000".to_string(),
            head_glow: 15.0,
            food_glow: 10.0,
            overlay_alpha: 0.8,
        }
    }
}

/// Food placement seed used when none is configured.
pub const DEFAULT_SEED: u64 = 0x5eed;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tick intervals must be positive (initial {initial} ms, min {min} ms)")]
    NonPositiveInterval { initial: f64, min: f64 },
    #[error("min tick interval {min} ms exceeds initial interval {initial} ms")]
    MinAboveInitial { initial: f64, min: f64 },
    #[error("tick decrement must not be negative, got {0}")]
    NegativeDecrement(f64),
    #[error("cell size bounds are invalid (min {min}, preferred {preferred})")]
    CellSizeBounds { min: u32, preferred: u32 },
    #[error("cells across the smaller side must be at least 1")]
    ZeroDivisor,
    #[error("snake must spawn with at least one cell")]
    EmptySnake,
    #[error("food placement needs at least one attempt")]
    NoPlacementAttempts,
    #[error("overlay alpha {0} is outside 0.0..=1.0")]
    OverlayAlpha(f64),
}

impl GameConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_tick_ms > 0.0 && self.min_tick_ms > 0.0) {
            return Err(ConfigError::NonPositiveInterval {
                initial: self.initial_tick_ms,
                min: self.min_tick_ms,
            });
        }
        if self.min_tick_ms > self.initial_tick_ms {
            return Err(ConfigError::MinAboveInitial {
                initial: self.initial_tick_ms,
                min: self.min_tick_ms,
            });
        }
        if !(self.tick_decrement_ms >= 0.0) {
            return Err(ConfigError::NegativeDecrement(self.tick_decrement_ms));
        }
        if self.min_cell_size == 0 || self.min_cell_size > self.preferred_cell_size {
            return Err(ConfigError::CellSizeBounds {
                min: self.min_cell_size,
                preferred: self.preferred_cell_size,
            });
        }
        if self.cells_across_min_dimension == 0 {
            return Err(ConfigError::ZeroDivisor);
        }
        if self.initial_length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if self.food_placement_attempts == 0 {
            return Err(ConfigError::NoPlacementAttempts);
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(ConfigError::OverlayAlpha(self.overlay_alpha));
        }
        Ok(())
    }

    /// Colors for paint backends.
    pub fn palette(&self) -> Palette {
        Palette {
            background: self.background_color.clone(),
            snake: self.snake_color.clone(),
            food: self.food_color.clone(),
        }
    }

    pub fn rng_seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Tick interval after `foods` foods have been eaten in one round.
    pub fn interval_after(&self, foods: u32) -> f64 {
        (self.initial_tick_ms - foods as f64 * self.tick_decrement_ms).max(self.min_tick_ms)
    }
}
