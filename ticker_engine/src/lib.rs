//! Ticker backdrop engine.
//!
//! This crate simulates a full-screen grid of decorative market ticker cells. It wires
//! together a few building blocks:
//!
//! - `QuoteGenerator` — draws the fixed-size synthetic dataset once per mount.
//! - `CellLayout` — static placement per index: grid position, jitter, depth preset
//!   and wave delay.
//! - `CellMachine` — per-cell timer loop producing scramble and pop overlays, driven
//!   by a shared virtual-time `Scheduler`.
//! - `AmbientDriver` — the looping pulse/glow pose of each cell.
//! - `Backdrop` — the orchestrator; `Backdrop::mount` is the entry point.
//! - `BackdropRuntime` — optional background thread that advances a backdrop in real
//!   time and broadcasts `Frame` snapshots over `crossbeam_channel`.
//!
//! Randomness is injected through `ticker_common::RandomSource`, so a seeded or fixed
//! source makes every draw reproducible.
//!
//! ```no_run
//! use std::time::Duration;
//! use ticker_common::SeededRandom;
//! use ticker_engine::Backdrop;
//!
//! let mut backdrop = Backdrop::mount(SeededRandom::from_seed(7));
//! backdrop.advance_to(Duration::from_millis(900));
//! let frame = backdrop.frame();
//! assert_eq!(frame.cells.len(), 480);
//! ```
#![warn(missing_docs)]

pub mod backdrop;
pub mod config;
pub mod model;
pub mod runtime;

pub use backdrop::Backdrop;
pub use config::BackdropConfig;
pub use model::view::{CellView, Frame};
pub use runtime::{BackdropRuntime, FrameEvent};
