//! Virtual-time timer queue driving every cell.
//!
//! The scheduler owns a monotonic clock measured from mount (`Duration` since
//! mount) and a min-heap of pending one-shot timers. Each timer belongs to exactly
//! one cell and carries a `TimerKind` telling the cell what fired. Nothing here
//! sleeps: the caller decides how the clock moves, either in real time (the runtime
//! thread) or in jumps (tests).
//!
//! Cancellation is lazy. `cancel` removes the timer from the live table and the stale
//! heap entry is skipped when it surfaces, so cancelling is O(1) and a cancelled
//! timer can never fire.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Index of the cell a timer belongs to.
pub type CellId = usize;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) u64);

/// What a timer means to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Slow recurring trigger that rolls for pop and scramble.
    Trigger,
    /// End of a pop pulse.
    PopEnd,
    /// Fast scramble sub-tick.
    ScrambleTick,
}

/// A pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    /// Handle returned by `schedule`.
    pub id: TimerId,
    /// Owning cell.
    pub cell: CellId,
    /// Meaning of the timer.
    pub kind: TimerKind,
    /// Clock value at which it fires.
    pub due: Duration,
}

/// Convert a fractional millisecond draw to a `Duration`, truncated to the microsecond
/// so half-open draw ranges stay half-open.
pub fn millis(ms: f64) -> Duration {
    Duration::from_micros((ms.max(0.0) * 1_000.0).floor() as u64)
}

/// One-shot timer queue with a virtual clock.
#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    queue: BinaryHeap<Reverse<(Duration, TimerId)>>,
    live: HashMap<TimerId, Timer>,
}

impl Scheduler {
    /// Empty scheduler with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a timer for `cell` firing `delay` after the current clock.
    pub fn schedule(&mut self, cell: CellId, kind: TimerKind, delay: Duration) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let due = self.now + delay;
        self.queue.push(Reverse((due, id)));
        self.live.insert(id, Timer { id, cell, kind, due });
        id
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Cancel every pending timer of `cell`, returning how many were dropped.
    pub fn cancel_cell(&mut self, cell: CellId) -> usize {
        let before = self.live.len();
        self.live.retain(|_, timer| timer.cell != cell);
        before - self.live.len()
    }

    /// Cancel everything, returning how many timers were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.live.len();
        self.live.clear();
        self.queue.clear();
        dropped
    }

    /// Number of timers that can still fire.
    pub fn pending(&self) -> usize {
        self.live.len()
    }

    /// Pending timers of `cell`, earliest first.
    pub fn pending_for(&self, cell: CellId) -> Vec<Timer> {
        let mut timers: Vec<Timer> = self
            .live
            .values()
            .filter(|timer| timer.cell == cell)
            .copied()
            .collect();
        timers.sort_by_key(|timer| (timer.due, timer.id));
        timers
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.discard_stale();
        self.queue.peek().map(|Reverse((due, _))| *due)
    }

    /// Pop the earliest live timer due at or before `until`, moving the clock to its
    /// due time. Returns `None` once nothing else is due.
    pub fn pop_due(&mut self, until: Duration) -> Option<Timer> {
        self.discard_stale();
        let Reverse((due, id)) = *self.queue.peek()?;
        if due > until {
            return None;
        }
        self.queue.pop();
        let timer = self.live.remove(&id)?;
        self.now = self.now.max(due);
        Some(timer)
    }

    /// Move the clock forward to `to`; never moves it backwards.
    pub fn advance_clock(&mut self, to: Duration) {
        self.now = self.now.max(to);
    }

    fn discard_stale(&mut self) {
        while let Some(Reverse((_, id))) = self.queue.peek() {
            if self.live.contains_key(id) {
                break;
            }
            self.queue.pop();
        }
    }
}
