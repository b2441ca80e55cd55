use std::collections::VecDeque;

use bytemuck::{Pod, Zeroable};

use crate::core::grid::Cell;

/// Play state of the active round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Playing,
    GameOver,
}

/// A game event handed from Rust to the host page once per frame.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Food eaten. `a` = new score.
    pub const SCORE: f32 = 1.0;
    /// Round ended. `a` = final score.
    pub const GAME_OVER: f32 = 2.0;
    /// A new round became active. `a` = columns, `b` = rows.
    pub const ROUND_STARTED: f32 = 3.0;

    pub fn score(score: u32) -> Self {
        Self {
            kind: Self::SCORE,
            a: score as f32,
            ..Default::default()
        }
    }

    pub fn game_over(final_score: u32) -> Self {
        Self {
            kind: Self::GAME_OVER,
            a: final_score as f32,
            ..Default::default()
        }
    }

    pub fn round_started(cols: u32, rows: u32) -> Self {
        Self {
            kind: Self::ROUND_STARTED,
            a: cols as f32,
            b: rows as f32,
            ..Default::default()
        }
    }
}

/// Read-only view of the active round handed to the render stage.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    /// Head first.
    pub snake: &'a VecDeque<Cell>,
    pub food: Option<Cell>,
    pub score: u32,
    pub state: GameState,
    pub cell_size: u32,
    pub surface_width: u32,
    pub surface_height: u32,
}
