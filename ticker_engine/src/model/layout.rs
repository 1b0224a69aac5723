//! Cell placement on the backdrop grid.
//!
//! Everything here derives from the cell index: column and row, base position in
//! container percentages, the depth bucket that picks a blur/opacity preset, and the
//! wave delay that makes the ambient pulse ripple out from the grid center. The only
//! random part is the jitter, drawn once when the layout is computed and then kept for
//! the cell's lifetime.

use serde::Serialize;
use std::time::Duration;
use ticker_common::RandomSource;
use ticker_common::grid::{CENTER_X, CENTER_Y, COLS, ROWS};

/// Horizontal jitter amplitude, in percent of container width (±1%).
pub const JITTER_X_PCT: f64 = 2.0;
/// Vertical jitter amplitude, in percent of container height (±1.5%).
pub const JITTER_Y_PCT: f64 = 3.0;
/// Seconds of wave delay per grid unit of distance from the center.
pub const WAVE_DELAY_PER_UNIT: f64 = 0.1;
/// Wave delays wrap at this many seconds.
pub const WAVE_PERIOD_SECS: f64 = 3.0;

/// Blur and base opacity for one parallax layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthPreset {
    /// Bucket number, `0..3`; lower is farther away.
    pub bucket: u8,
    /// Backdrop blur radius in pixels.
    pub blur_px: u8,
    /// Opacity the ambient animation oscillates around.
    pub base_opacity: f64,
}

impl DepthPreset {
    /// The three layers, farthest first.
    pub const PRESETS: [DepthPreset; 3] = [
        DepthPreset { bucket: 0, blur_px: 8, base_opacity: 0.38 },
        DepthPreset { bucket: 1, blur_px: 5, base_opacity: 0.55 },
        DepthPreset { bucket: 2, blur_px: 3, base_opacity: 0.72 },
    ];

    /// Preset for a grid position: bucket `(col + row) mod 3`.
    pub fn for_position(col: usize, row: usize) -> DepthPreset {
        Self::PRESETS[(col + row) % Self::PRESETS.len()]
    }

    /// Style token for the blur, e.g. `backdrop-blur-[8px]`.
    pub fn blur_class(&self) -> String {
        format!("backdrop-blur-[{}px]", self.blur_px)
    }
}

/// Grid column of cell `index`.
pub fn col(index: usize) -> usize {
    index % COLS
}

/// Grid row of cell `index`.
pub fn row(index: usize) -> usize {
    index / COLS
}

/// Euclidean distance of a grid position from the grid center, in grid units.
pub fn distance_from_center(col: usize, row: usize) -> f64 {
    let dx = col as f64 - CENTER_X;
    let dy = row as f64 - CENTER_Y;
    (dx * dx + dy * dy).sqrt()
}

/// Ambient start delay of cell `index`, in seconds; always in `[0, 3)`.
pub fn wave_delay_secs(index: usize) -> f64 {
    (distance_from_center(col(index), row(index)) * WAVE_DELAY_PER_UNIT) % WAVE_PERIOD_SECS
}

/// Static placement of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellLayout {
    /// Cell index in the dataset.
    pub index: usize,
    /// Grid column.
    pub col: usize,
    /// Grid row.
    pub row: usize,
    /// Unjittered horizontal position, percent of container width.
    pub base_x_pct: f64,
    /// Unjittered vertical position, percent of container height.
    pub base_y_pct: f64,
    /// Horizontal offset assigned at creation, in `[-1, 1)` percent.
    pub jitter_x_pct: f64,
    /// Vertical offset assigned at creation, in `[-1.5, 1.5)` percent.
    pub jitter_y_pct: f64,
    /// Parallax layer.
    pub depth: DepthPreset,
    /// Ambient start delay, seconds.
    pub wave_delay_secs: f64,
}

impl CellLayout {
    /// Compute the layout for `index`, drawing its jitter from `rng`.
    pub fn compute<R: RandomSource + ?Sized>(index: usize, rng: &mut R) -> CellLayout {
        let (col, row) = (col(index), row(index));
        let jitter_x_pct = (rng.next_f64() - 0.5) * JITTER_X_PCT;
        let jitter_y_pct = (rng.next_f64() - 0.5) * JITTER_Y_PCT;

        CellLayout {
            index,
            col,
            row,
            base_x_pct: col as f64 / COLS as f64 * 100.0,
            base_y_pct: row as f64 / ROWS as f64 * 100.0,
            jitter_x_pct,
            jitter_y_pct,
            depth: DepthPreset::for_position(col, row),
            wave_delay_secs: wave_delay_secs(index),
        }
    }

    /// Left edge of the cell anchor (its center), percent of container width.
    pub fn left_pct(&self) -> f64 {
        self.base_x_pct + self.jitter_x_pct
    }

    /// Top edge of the cell anchor (its center), percent of container height.
    pub fn top_pct(&self) -> f64 {
        self.base_y_pct + self.jitter_y_pct
    }

    /// Wave delay as a `Duration`.
    pub fn wave_delay(&self) -> Duration {
        Duration::from_secs_f64(self.wave_delay_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_common::FixedRandom;
    use ticker_common::grid::TOTAL;

    #[test]
    fn grid_coordinates_cover_every_index() {
        for index in 0..TOTAL {
            assert_eq!(col(index), index % 24);
            assert_eq!(row(index), index / 24);
            assert!(col(index) < COLS && row(index) < ROWS);
        }
        assert_eq!((col(479), row(479)), (23, 19));
    }

    #[test]
    fn center_cell_has_no_delay() {
        // col 12, row 10
        let center = 10 * COLS + 12;
        assert_eq!(wave_delay_secs(center), 0.0);
        assert!(wave_delay_secs(center + 1) > 0.0);
    }

    #[test]
    fn delay_wraps_at_three_seconds() {
        // corner (0, 0) sits sqrt(244) ≈ 15.62 units away: 1.562 s, no wrap
        assert!((wave_delay_secs(0) - 244f64.sqrt() * 0.1).abs() < 1e-12);
        let max = (0..TOTAL).map(wave_delay_secs).fold(0.0, f64::max);
        assert!(max < WAVE_PERIOD_SECS);
    }

    #[test]
    fn depth_buckets_cycle_along_diagonals() {
        assert_eq!(DepthPreset::for_position(0, 0).bucket, 0);
        assert_eq!(DepthPreset::for_position(1, 0).bucket, 1);
        assert_eq!(DepthPreset::for_position(1, 1).bucket, 2);
        assert_eq!(DepthPreset::for_position(2, 1).bucket, 0);
        assert_eq!(DepthPreset::for_position(0, 0).blur_class(), "backdrop-blur-[8px]");
        assert_eq!(DepthPreset::for_position(0, 2).base_opacity, 0.72);
    }

    #[test]
    fn fixed_half_draw_gives_zero_jitter() {
        let layout = CellLayout::compute(25, &mut FixedRandom(0.5));
        assert_eq!((layout.col, layout.row), (1, 1));
        assert_eq!(layout.jitter_x_pct, 0.0);
        assert_eq!(layout.jitter_y_pct, 0.0);
        assert!((layout.left_pct() - 100.0 / 24.0).abs() < 1e-12);
        assert!((layout.top_pct() - 5.0).abs() < 1e-12);
    }
}
