//! Real-time driver and frame broadcasting.
//!
//! `BackdropRuntime` runs a background thread that owns a mounted `Backdrop`, moves its
//! clock along with wall time, and broadcasts a `Frame` snapshot to every subscriber at
//! the configured frame rate. Subscribers register by sending a `Sender<FrameEvent>`
//! over the subscription channel (see `subscribe`).
//!
//! Event model:
//! - `FrameEvent::Frame(Arc<Frame>)` — a snapshot of all cells.
//! - `FrameEvent::Shutdown` — the backdrop was unmounted; consumers should stop.
//!
//! Design notes:
//! - The thread sleeps in a crossbeam `select!` until the earlier of the next cell
//!   timer and the next frame, so stop requests and new subscribers wake it at once.
//! - Broadcast is best-effort: if sending to a subscriber fails, it is dropped.
//! - `stop` (or dropping the runtime) unmounts the backdrop on its own thread and
//!   joins it, so no cell timer outlives the runtime.

use crate::backdrop::Backdrop;
use crate::config::BackdropConfig;
use crate::model::view::Frame;
use crossbeam_channel::{Receiver, Sender, select, unbounded};
use log::{debug, error, info};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use ticker_common::{BackdropError, Result};

/// Message sent by the runtime to its subscribers.
#[derive(Debug, Clone)]
pub enum FrameEvent {
    /// Snapshot of every cell.
    Frame(Arc<Frame>),
    /// The backdrop was unmounted.
    Shutdown,
}

/// Handle to the background animation thread.
pub struct BackdropRuntime {
    subscribe_tx: Sender<Sender<FrameEvent>>,
    stop_tx: Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl BackdropRuntime {
    /// Validate `config`, mount a backdrop and start animating it.
    pub fn start(config: BackdropConfig) -> Result<Self> {
        config.validate()?;
        let (subscribe_tx, subscribe_rx) = unbounded::<Sender<FrameEvent>>();
        let (stop_tx, stop_rx) = unbounded::<()>();

        let handle = thread::Builder::new()
            .name("ticker-backdrop".into())
            .spawn(move || run(config, subscribe_rx, stop_rx))?;

        Ok(Self {
            subscribe_tx,
            stop_tx,
            handle: Some(handle),
        })
    }

    /// Register a new subscriber and return its frame receiver.
    pub fn subscribe(&self) -> Result<Receiver<FrameEvent>> {
        let (frame_tx, frame_rx) = unbounded::<FrameEvent>();
        self.subscribe_tx
            .send(frame_tx)
            .map_err(|e| BackdropError::ChannelSend(format!("subscribe: {}", e)))?;
        Ok(frame_rx)
    }

    /// Unmount the backdrop and wait for the thread to finish.
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // the thread may already be gone; joining below reports that
        let _ = self.stop_tx.send(());
        handle
            .join()
            .map_err(|_| BackdropError::Runtime("backdrop thread panicked".into()))
    }
}

impl Drop for BackdropRuntime {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            error!("Failed to stop backdrop runtime: {}", e);
        }
    }
}

fn run(config: BackdropConfig, subscribe_rx: Receiver<Sender<FrameEvent>>, stop_rx: Receiver<()>) {
    let frame_interval = config.frame_interval();
    let mut backdrop = Backdrop::mount(config.random_source());
    let mut clients: Vec<Sender<FrameEvent>> = Vec::new();
    let started = Instant::now();
    let mut next_frame = started.elapsed();

    info!(
        "Backdrop runtime started at {} fps (Thread ID: {:?})",
        config.fps,
        thread::current().id()
    );

    loop {
        let now = started.elapsed();
        backdrop.advance_to(now);

        if now >= next_frame {
            let frame = Arc::new(backdrop.frame());
            clients.retain(|client_tx| {
                client_tx
                    .send(FrameEvent::Frame(Arc::clone(&frame)))
                    .is_ok()
            });
            next_frame += frame_interval;
            if next_frame < now {
                // fell behind; skip the missed frames
                next_frame = now + frame_interval;
            }
        }

        let wake = backdrop
            .next_deadline()
            .map_or(next_frame, |deadline| deadline.min(next_frame));
        let wait = wake.saturating_sub(started.elapsed());

        select! {
            recv(stop_rx) -> _ => break,
            recv(subscribe_rx) -> msg => if let Ok(client_tx) = msg {
                clients.push(client_tx);
                debug!("Runtime: new subscriber added. Total subscribers: {}", clients.len());
            },
            default(wait) => {},
        }
    }

    backdrop.unmount();
    for client_tx in &clients {
        let _ = client_tx.send(FrameEvent::Shutdown);
    }
    info!("Backdrop runtime stopped after {:?}", started.elapsed());
}
