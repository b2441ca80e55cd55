//! Movement & collision engine.
//!
//! Sole writer of the active round. Each tick runs in a fixed order:
//! adopt the pending direction, step the head, test walls and body, then
//! mutate the body. Entering GAME_OVER builds the next round immediately so a
//! restart is a plain swap.

use glam::Vec2;

use crate::api::config::GameConfig;
use crate::api::types::GameState;
use crate::core::grid::{is_occupied, GridExtent};
use crate::core::rng::Rng;
use crate::core::round::{fresh_round, spawn_food, RoundState};
use crate::input::direction::Direction;

/// What ended a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Wall,
    SelfCollision,
}

/// Result of one logic tick. Exactly one of these per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// Moved one cell, length unchanged.
    Moved,
    /// Ate the food and grew by one cell.
    Grew { score: u32 },
    /// Hit a wall or itself; the round is over.
    Died { cause: DeathCause, final_score: u32 },
    /// Not playing; nothing changed.
    Idle,
}

pub struct Engine {
    config: GameConfig,
    extent: GridExtent,
    rng: Rng,
    state: GameState,
    round: RoundState,
    /// Built on entry to GAME_OVER, consumed by `restart`.
    next_round: Option<RoundState>,
}

impl Engine {
    pub fn new(extent: GridExtent, config: GameConfig) -> Self {
        let mut rng = Rng::new(config.rng_seed());
        let round = fresh_round(extent, &config, &mut rng);
        Self {
            config,
            extent,
            rng,
            state: GameState::Playing,
            round,
            next_round: None,
        }
    }

    /// Start over on a new grid. Any preloaded round is dropped since it was
    /// laid out for the old extent.
    pub fn reset(&mut self, extent: GridExtent) {
        self.extent = extent;
        self.round = fresh_round(extent, &self.config, &mut self.rng);
        self.next_round = None;
        self.state = GameState::Playing;
    }

    /// Advance the simulation by one cell.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }
        let Some(head) = self.round.head() else {
            return TickOutcome::Idle;
        };

        let (dcol, drow) = self.round.directions.adopt().delta();
        let new_head = head.offset(dcol, drow);

        // Checked against the whole pre-move body, tail included: moving into
        // the cell the tail is about to leave still counts as a collision.
        let cause = if !self.extent.contains(new_head) {
            Some(DeathCause::Wall)
        } else if is_occupied(new_head, &self.round.snake) {
            Some(DeathCause::SelfCollision)
        } else {
            None
        };
        if let Some(cause) = cause {
            self.enter_game_over();
            return TickOutcome::Died {
                cause,
                final_score: self.round.score,
            };
        }

        self.round.snake.push_front(new_head);

        if self.round.food == Some(new_head) {
            self.round.score += self.config.food_reward;
            self.round.tick_interval =
                (self.round.tick_interval - self.config.tick_decrement_ms).max(self.config.min_tick_ms);
            self.round.food = spawn_food(
                self.extent,
                &self.round.snake,
                &mut self.rng,
                self.config.food_placement_attempts,
            );
            log::debug!(
                "food eaten: score {} length {} interval {}ms",
                self.round.score,
                self.round.len(),
                self.round.tick_interval
            );
            TickOutcome::Grew {
                score: self.round.score,
            }
        } else {
            self.round.snake.pop_back();
            TickOutcome::Moved
        }
    }

    fn enter_game_over(&mut self) {
        self.state = GameState::GameOver;
        self.next_round = Some(fresh_round(self.extent, &self.config, &mut self.rng));
        log::info!("round over: score {} length {}", self.round.score, self.round.len());
    }

    /// Swap in the preloaded round. Returns false unless the game was over.
    pub fn restart(&mut self) -> bool {
        if self.state != GameState::GameOver {
            return false;
        }
        self.round = match self.next_round.take() {
            Some(round) => round,
            None => fresh_round(self.extent, &self.config, &mut self.rng),
        };
        self.state = GameState::Playing;
        true
    }

    /// Steer toward a pointer in surface pixels. Ignored unless playing.
    pub fn steer(&mut self, pointer: Vec2, cell_size: u32) -> Option<Direction> {
        if self.state != GameState::Playing {
            return None;
        }
        let head = self.round.head()?;
        self.round.directions.steer_towards(head.center(cell_size), pointer)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn next_round(&self) -> Option<&RoundState> {
        self.next_round.as_ref()
    }

    pub fn extent(&self) -> GridExtent {
        self.extent
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn tick_interval(&self) -> f64 {
        self.round.tick_interval
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the active round. Lets hosts and tests stage a position.
    pub fn load_round(&mut self, round: RoundState) {
        self.round = round;
        self.next_round = None;
        self.state = GameState::Playing;
    }
}
