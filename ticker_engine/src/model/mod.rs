//! Domain models of the ticker backdrop.
//!
//! Leaves first:
//! - `quote` — `QuoteEntry`, direction styling and price display helpers.
//! - `quote_generator` — one-shot `Dataset` generation at mount.
//! - `layout` — per-index placement, depth presets and wave delays.
//! - `scheduler` — virtual-time timer queue with per-cell cancellation.
//! - `cell` — per-cell scramble/pop state machine.
//! - `ambient` — looping ambient pose computation.
//! - `view` — renderable `CellView` and `Frame` snapshots.

pub mod ambient;
pub mod cell;
pub mod layout;
pub mod quote;
pub mod quote_generator;
pub mod scheduler;
pub mod view;
