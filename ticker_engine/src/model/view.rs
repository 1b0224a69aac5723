//! Renderable cell units.
//!
//! A `CellView` is what a consumer draws for one cell at one instant: its anchor
//! position, blur token, ambient pose, and the text currently on display. A `Frame`
//! bundles all `TOTAL` views with the static grid metadata.

use crate::model::ambient::{AmbientDriver, AmbientPose};
use crate::model::cell::CellRuntimeState;
use crate::model::layout::CellLayout;
use crate::model::quote::{Direction, QuoteEntry};
use serde::Serialize;
use std::time::Duration;
use ticker_common::grid::GridMetrics;

/// Text shown on a cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CellText {
    /// Symbol, or hex placeholder while scrambling.
    pub symbol: String,
    /// Price with `$` prefix.
    pub price: String,
    /// Signed change, or hex placeholder while scrambling.
    pub change: String,
    /// Direction driving the arrow and color.
    pub direction: Direction,
    /// `▲` or `▼`.
    pub arrow: &'static str,
    /// Color token for the change column.
    pub color: &'static str,
}

impl CellText {
    /// Real quote text, or the scramble placeholder while the cell scrambles.
    pub fn resolve(quote: &QuoteEntry, state: &CellRuntimeState) -> CellText {
        let (symbol, price, change, direction) = if state.scrambling {
            let scramble = &state.scramble;
            (
                scramble.symbol.clone(),
                format!("${}", scramble.price),
                scramble.change.clone(),
                scramble.direction,
            )
        } else {
            (
                quote.symbol.to_string(),
                quote.display_price(),
                quote.change.clone(),
                quote.direction,
            )
        };
        CellText {
            symbol,
            price,
            change,
            direction,
            arrow: direction.arrow(),
            color: direction.color_token(),
        }
    }
}

/// One positioned, animated cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    /// Cell index.
    pub index: usize,
    /// Grid column.
    pub col: usize,
    /// Grid row.
    pub row: usize,
    /// Anchor x, percent of container width.
    pub left_pct: f64,
    /// Anchor y, percent of container height.
    pub top_pct: f64,
    /// Depth bucket, `0..3`.
    pub depth: u8,
    /// Blur style token.
    pub blur_class: String,
    /// Ambient animation pose.
    pub pose: AmbientPose,
    /// Displayed text.
    pub text: CellText,
    /// Pop overlay active.
    pub popped: bool,
    /// Scramble overlay active.
    pub scrambling: bool,
}

impl CellView {
    /// Compose layout, quote and runtime state into a view at `elapsed`.
    pub fn compose(
        layout: &CellLayout,
        quote: &QuoteEntry,
        state: &CellRuntimeState,
        elapsed: Duration,
    ) -> CellView {
        CellView {
            index: layout.index,
            col: layout.col,
            row: layout.row,
            left_pct: layout.left_pct(),
            top_pct: layout.top_pct(),
            depth: layout.depth.bucket,
            blur_class: layout.depth.blur_class(),
            pose: AmbientDriver::pose(layout, state.popped, elapsed),
            text: CellText::resolve(quote, state),
            popped: state.popped,
            scrambling: state.scrambling,
        }
    }
}

/// Snapshot of the whole backdrop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// Milliseconds since mount.
    pub elapsed_ms: u64,
    /// Grid metadata.
    pub grid: GridMetrics,
    /// Ambient cycle length in milliseconds.
    pub cycle_ms: u64,
    /// Every cell in index order.
    pub cells: Vec<CellView>,
}
