//! Command-line arguments for the backdrop viewer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use ticker_engine::BackdropConfig;
use ticker_engine::config::DEFAULT_FPS;

/// How frames are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored text grid, redrawn in place.
    Text,
    /// One JSON object per frame, one per line.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for every random draw. Omit for a different backdrop on each run.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Frames drawn per second.
    #[clap(long, default_value_t = DEFAULT_FPS)]
    pub fps: u32,

    /// Stop after this many seconds instead of waiting for Ctrl+C.
    #[clap(long)]
    pub duration_secs: Option<u64>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Args {
    /// Runtime configuration described by the arguments.
    pub fn config(&self) -> BackdropConfig {
        BackdropConfig {
            seed: self.seed,
            fps: self.fps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["ticker_cli"]);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.config(), BackdropConfig::default());
        assert!(args.duration_secs.is_none());
    }

    #[test]
    fn explicit_values() {
        let args = Args::parse_from([
            "ticker_cli",
            "--seed",
            "42",
            "--fps",
            "10",
            "--duration-secs",
            "3",
            "--format",
            "json",
        ]);
        assert_eq!(args.config(), BackdropConfig { seed: Some(42), fps: 10 });
        assert_eq!(args.duration_secs, Some(3));
        assert_eq!(args.format, OutputFormat::Json);
    }
}
