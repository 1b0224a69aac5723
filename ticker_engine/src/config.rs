//! Runtime configuration.

use std::time::Duration;
use ticker_common::{BackdropError, Result, SeededRandom};

/// Default frame rate of the runtime thread.
pub const DEFAULT_FPS: u32 = 30;
/// Highest accepted frame rate.
pub const MAX_FPS: u32 = 120;

/// Settings for a `BackdropRuntime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdropConfig {
    /// Seed for every random draw; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Frames broadcast per second.
    pub fps: u32,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            seed: None,
            fps: DEFAULT_FPS,
        }
    }
}

impl BackdropConfig {
    /// Check the values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 || self.fps > MAX_FPS {
            return Err(BackdropError::InvalidConfig(format!(
                "fps must be in 1..={}, got {}",
                MAX_FPS, self.fps
            )));
        }
        Ok(())
    }

    /// Time between two frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Random source described by `seed`.
    pub fn random_source(&self) -> SeededRandom {
        match self.seed {
            Some(seed) => SeededRandom::from_seed(seed),
            None => SeededRandom::from_entropy(),
        }
    }
}
