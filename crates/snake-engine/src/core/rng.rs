//! Seedable xorshift64 generator backing food placement.
//! Same seed, same food sequence, which keeps rounds reproducible in tests.

use crate::core::grid::{Cell, GridExtent};

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// A zero seed would lock xorshift at zero forever, so it is remapped to 1.
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish value in `[0, upper_bound)`. Returns 0 for an empty range.
    pub fn next_below(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// A random cell inside `extent`.
    pub fn next_cell(&mut self, extent: GridExtent) -> Cell {
        let col = self.next_below(extent.cols) as i32;
        let row = self.next_below(extent.rows) as i32;
        Cell::new(col, row)
    }
}
