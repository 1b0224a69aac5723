//! Error types shared between the engine and its consumers.
//!
//! The simulation itself is total: every draw is over a closed range and all
//! inputs are generated internally. `BackdropError` therefore only covers the
//! edges of the system: configuration validation, frame encoding, terminal
//! I/O, and the channels that carry frames out of the runtime thread.
use std::io;

use thiserror::Error;

/// Unified error type shared by the engine and the CLI.
#[derive(Error, Debug)]
pub enum BackdropError {
    /// I/O error originating from the standard library (terminal writes, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Rejected configuration value with a human-readable message.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failure while encoding a frame to JSON via serde_json.
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// The runtime thread panicked or could not be joined.
    #[error("Runtime thread failed: {0}")]
    Runtime(String),
}
