//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `BackdropError`, so functions can simply return `Result<T>`.
use crate::error::BackdropError;

/// Workspace-wide `Result` alias with `BackdropError` as the default error.
pub type Result<T, E = BackdropError> = std::result::Result<T, E>;
