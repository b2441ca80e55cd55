//! Grid & entity model.
//!
//! Pure data plus placement queries. Callers own all mutation.

use glam::Vec2;

use crate::api::config::GameConfig;

/// A cell on the logical grid: (column, row).
/// Signed so a head stepping past the left/top edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Translate by a (dcol, drow) offset.
    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// Pixel-space center of this cell for the given cell size.
    pub fn center(self, cell_size: u32) -> Vec2 {
        let size = cell_size as f32;
        Vec2::new(
            self.col as f32 * size + size * 0.5,
            self.row as f32 * size + size * 0.5,
        )
    }

    /// Pixel-space top-left corner of this cell.
    pub fn origin(self, cell_size: u32) -> Vec2 {
        let size = cell_size as f32;
        Vec2::new(self.col as f32 * size, self.row as f32 * size)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridExtent {
    pub cols: u32,
    pub rows: u32,
}

impl GridExtent {
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Whether the cell lies inside the grid on both axes.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.col >= 0 && cell.row >= 0 && (cell.col as u32) < self.cols && (cell.row as u32) < self.rows
    }

    /// Whether a horizontal snake of `length` cells fits at spawn.
    pub fn fits_spawn(&self, length: usize) -> bool {
        self.rows > 0 && self.cols as usize >= length.max(1)
    }

    /// Center cell used as the spawn head.
    pub fn center(&self) -> Cell {
        Cell::new((self.cols / 2) as i32, (self.rows / 2) as i32)
    }
}

/// Cell size in pixels for a surface: `floor(min(w, h) / divisor)` clamped
/// to `[min_cell_size, preferred_cell_size]`. The lower bound wins if the
/// two bounds cross.
pub fn cell_size(surface_width: u32, surface_height: u32, config: &GameConfig) -> u32 {
    let divisor = config.cells_across_min_dimension.max(1);
    let fitted = surface_width.min(surface_height) / divisor;
    fitted.min(config.preferred_cell_size).max(config.min_cell_size).max(1)
}

/// Grid extent for a surface at the given cell size.
pub fn grid_extent(surface_width: u32, surface_height: u32, cell_size: u32) -> GridExtent {
    let size = cell_size.max(1);
    GridExtent::new(surface_width / size, surface_height / size)
}

/// Whether any segment of `body` sits on `cell`.
pub fn is_occupied<'a>(cell: Cell, body: impl IntoIterator<Item = &'a Cell>) -> bool {
    body.into_iter().any(|segment| *segment == cell)
}
