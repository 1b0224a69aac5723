//! Ticker backdrop viewer — mounts the animated ticker grid and draws it in the
//! terminal until Ctrl+C (or `--duration-secs`) stops it.
//!
//! Usage example (CLI):
//! ```bash
//! ticker_cli --seed 7 --fps 20
//! ticker_cli --format json --duration-secs 2 > frames.jsonl
//! ```
//!
//! Frames go to stdout; logs go to stderr (`RUST_LOG=debug` for more detail).
#![warn(missing_docs)]
mod args;
mod render;

use crate::args::{Args, OutputFormat};
use clap::Parser;
use crossbeam_channel::RecvTimeoutError;
use log::{debug, info};
use std::io::{self, BufWriter, Write};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::{Duration, Instant};
use ticker_common::BackdropError;
use ticker_common::Result;
use ticker_engine::{BackdropRuntime, FrameEvent};

/// How long to wait for a frame before re-checking the stop conditions.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<(), BackdropError> {
    init_logger();
    let args = Args::parse();
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down backdrop...");
            shutdown.store(true, Ordering::SeqCst);
        })
        .map_err(|e| BackdropError::Runtime(format!("Ctrl+C handler: {}", e)))?;
    }

    let runtime = BackdropRuntime::start(args.config())?;
    let frames = runtime.subscribe()?;
    let deadline = args
        .duration_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    if args.format == OutputFormat::Text {
        render::clear(&mut out)?;
    }

    info!("Backdrop is running. Press Ctrl+C to exit.");
    let mut drawn: u64 = 0;
    while !shutdown.load(Ordering::Relaxed) {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            info!("Duration elapsed, stopping.");
            break;
        }
        match frames.recv_timeout(POLL_INTERVAL) {
            Ok(FrameEvent::Frame(frame)) => {
                match args.format {
                    OutputFormat::Text => render::render_text(&mut out, &frame)?,
                    OutputFormat::Json => render::render_json(&mut out, &frame)?,
                }
                out.flush()?;
                drawn += 1;
            }
            Ok(FrameEvent::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                return Err(BackdropError::ChannelRecv("frame channel closed".into()));
            }
        }
    }

    runtime.stop()?;
    debug!("Drew {} frames", drawn);
    info!("Backdrop stopped.");
    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
