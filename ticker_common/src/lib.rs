//!
//! Common types and utilities shared by the backdrop engine and its consumers.
//!
//! This crate aggregates:
//! - `error` — unified error type `BackdropError` used across the workspace.
//! - `result` — handy `Result<T, BackdropError>` alias.
//! - `symbols` — the fixed set of ticker symbols shown on the backdrop.
//! - `grid` — grid dimensions and container metrics.
//! - `random` — injectable random source used by every probabilistic draw.
#![warn(missing_docs)]
pub mod error;
pub mod grid;
pub mod random;
pub mod result;
pub mod symbols;

pub use error::BackdropError;
pub use random::{FixedRandom, RandomSource, SeededRandom};
pub use result::Result;
pub use symbols::Symbol;
