pub mod api;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{ConfigError, GameConfig, DEFAULT_SEED};
pub use api::game::{FrameReport, ResizeOutcome, SnakeGame, Surface};
pub use api::types::{FrameSnapshot, GameEvent, GameState};
pub use crate::core::grid::{cell_size, grid_extent, is_occupied, Cell, GridExtent};
pub use crate::core::rng::Rng;
pub use crate::core::round::{fresh_round, spawn_food, RoundState};
pub use crate::core::time::TickTimer;
pub use input::direction::{resolve_pointer, Direction, DirectionBuffer};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::draw_list::{DrawCommand, DrawList, Paint, Palette, TextStyle};
pub use renderer::traits::{FrameData, Renderer};
pub use systems::movement::{DeathCause, Engine, TickOutcome};
pub use systems::render::{body_alpha, build_draw_list};
