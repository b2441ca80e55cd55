//! Direction buffering for pointer steering.
//!
//! Input only ever writes the *pending* slot. The movement engine copies it
//! into the *current* slot at the start of a tick, so a burst of taps between
//! two ticks can never reverse the snake into its own neck.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid offset (dcol, drow) for one step. Rows grow downward.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Pick the direction a pointer offset asks for, given the direction the
/// snake is currently moving.
///
/// The dominant axis decides. On an exact tie horizontal is tried first, then
/// vertical. A candidate that reverses `current` is dropped; on a dominant axis
/// that means no change at all.
pub fn resolve_pointer(delta: Vec2, current: Direction) -> Option<Direction> {
    let horizontal = if delta.x > 0.0 {
        Some(Direction::Right)
    } else if delta.x < 0.0 {
        Some(Direction::Left)
    } else {
        None
    };
    let vertical = if delta.y > 0.0 {
        Some(Direction::Down)
    } else if delta.y < 0.0 {
        Some(Direction::Up)
    } else {
        None
    };
    let allowed = |d: Option<Direction>| d.filter(|d| *d != current.opposite());

    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    if ax > ay {
        allowed(horizontal)
    } else if ay > ax {
        allowed(vertical)
    } else {
        allowed(horizontal).or_else(|| allowed(vertical))
    }
}

/// The current/pending direction pair for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionBuffer {
    current: Direction,
    pending: Direction,
}

impl DirectionBuffer {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    /// Direction applied on the last tick.
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Direction that the next tick will adopt.
    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Store `candidate` as pending unless it reverses the current direction.
    /// Returns whether it was accepted.
    pub fn request(&mut self, candidate: Direction) -> bool {
        if candidate == self.current.opposite() {
            return false;
        }
        self.pending = candidate;
        true
    }

    /// Steer toward a pointer given in surface pixels. `head_center` is the
    /// pixel center of the head cell. Returns the accepted direction, if any.
    pub fn steer_towards(&mut self, head_center: Vec2, pointer: Vec2) -> Option<Direction> {
        let candidate = resolve_pointer(pointer - head_center, self.current)?;
        self.request(candidate).then_some(candidate)
    }

    /// Promote pending to current. Called once at the start of each tick.
    pub fn adopt(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }
}

impl Default for DirectionBuffer {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
