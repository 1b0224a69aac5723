//! Grid dimensions and container metrics shared by the engine and consumers.

use serde::Serialize;

/// Number of columns in the backdrop grid.
pub const COLS: usize = 24;
/// Number of rows in the backdrop grid.
pub const ROWS: usize = 20;
/// Total number of cells (and quotes) on the backdrop.
pub const TOTAL: usize = COLS * ROWS;

/// Horizontal grid center, in column units.
pub const CENTER_X: f64 = COLS as f64 / 2.0;
/// Vertical grid center, in row units.
pub const CENTER_Y: f64 = ROWS as f64 / 2.0;

/// Inner padding of the container the cells are positioned in, in pixels.
pub const CONTAINER_PADDING_PX: u32 = 24;

/// Static layout metadata handed to whoever mounts the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridMetrics {
    /// Column count.
    pub cols: usize,
    /// Row count.
    pub rows: usize,
    /// Cell count (`cols * rows`).
    pub total: usize,
    /// Container padding in pixels.
    pub padding_px: u32,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            cols: COLS,
            rows: ROWS,
            total: TOTAL,
            padding_px: CONTAINER_PADDING_PX,
        }
    }
}
