//! Per-cell animation state machine.
//!
//! Every cell runs its own timer loop on the shared [`Scheduler`]:
//!
//! - `Trigger` fires every 300–700 ms (re-drawn after each firing). Each firing rolls
//!   independently for a pop (p = 0.06) and a scramble (p = 0.25).
//! - `PopEnd` clears the pop overlay 120–240 ms after it was set.
//! - `ScrambleTick` fires every 30 ms while scrambling and re-samples the placeholder
//!   text. The first tick that lands more than 260 ms after scramble entry ends the
//!   scramble.
//!
//! Pop and scramble are orthogonal overlays on an idle base, so a cell can be popped
//! and scrambling at the same time. A cell only ever touches its own state and its own
//! timers; `unmount` cancels all of them and resets the state.

use crate::model::quote::Direction;
use crate::model::scheduler::{CellId, Scheduler, Timer, TimerId, TimerKind, millis};
use log::trace;
use serde::Serialize;
use std::time::Duration;
use ticker_common::RandomSource;

/// Lower bound of the trigger interval, in milliseconds.
pub const TRIGGER_MIN_MS: f64 = 300.0;
/// Upper bound (exclusive) of the trigger interval, in milliseconds.
pub const TRIGGER_MAX_MS: f64 = 700.0;
/// Chance that a trigger pops the cell.
pub const POP_PROBABILITY: f64 = 0.06;
/// Lower bound of the pop duration, in milliseconds.
pub const POP_MIN_MS: f64 = 120.0;
/// Upper bound (exclusive) of the pop duration, in milliseconds.
pub const POP_MAX_MS: f64 = 240.0;
/// Chance that a trigger starts a scramble.
pub const SCRAMBLE_PROBABILITY: f64 = 0.25;
/// Period of the scramble sub-tick.
pub const SCRAMBLE_TICK: Duration = Duration::from_millis(30);
/// A scramble ends on the first sub-tick past this window.
pub const SCRAMBLE_WINDOW: Duration = Duration::from_millis(260);
/// A placeholder direction draw above this shows as rising.
const SCRAMBLE_UP_THRESHOLD: f64 = 0.5;

/// Placeholder text shown while a cell scrambles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrambleText {
    /// Three hex digits in place of the symbol.
    pub symbol: String,
    /// Four hex digits in place of the price.
    pub price: String,
    /// Two hex digits and `%` in place of the change.
    pub change: String,
    /// Direction drawn for the arrow and color.
    pub direction: Direction,
}

impl ScrambleText {
    /// Draw a fresh placeholder.
    pub fn sample<R: RandomSource + ?Sized>(rng: &mut R) -> ScrambleText {
        ScrambleText {
            symbol: rng.hex(3),
            price: rng.hex(4),
            change: format!("{}%", rng.hex(2)),
            direction: Direction::from_up(rng.next_f64() > SCRAMBLE_UP_THRESHOLD),
        }
    }
}

impl Default for ScrambleText {
    fn default() -> Self {
        ScrambleText {
            symbol: String::new(),
            price: String::new(),
            change: String::new(),
            direction: Direction::Up,
        }
    }
}

/// Dynamic state of one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CellRuntimeState {
    /// Placeholder text is shown instead of the quote.
    pub scrambling: bool,
    /// Current placeholder, meaningful while `scrambling`.
    pub scramble: ScrambleText,
    /// The pop overlay is active.
    pub popped: bool,
    /// Clock value at scramble entry.
    #[serde(skip)]
    pub scramble_started: Option<Duration>,
}

impl CellRuntimeState {
    /// `true` when neither overlay is active.
    pub fn is_idle(&self) -> bool {
        !self.scrambling && !self.popped
    }
}

#[derive(Debug, Default)]
struct CellTimers {
    trigger: Option<TimerId>,
    pop_end: Option<TimerId>,
    scramble_tick: Option<TimerId>,
}

/// State machine for a single cell.
#[derive(Debug)]
pub struct CellMachine {
    id: CellId,
    state: CellRuntimeState,
    timers: CellTimers,
    mounted: bool,
}

impl CellMachine {
    /// Create the cell with fresh state and arm its first trigger.
    pub fn mount<R: RandomSource + ?Sized>(
        id: CellId,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) -> CellMachine {
        let mut cell = CellMachine {
            id,
            state: CellRuntimeState::default(),
            timers: CellTimers::default(),
            mounted: true,
        };
        cell.arm_trigger(scheduler, rng);
        cell
    }

    /// Cell index.
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Current dynamic state.
    pub fn state(&self) -> &CellRuntimeState {
        &self.state
    }

    /// `false` once `unmount` ran.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// React to one of this cell's timers firing.
    ///
    /// Timers of other cells, and anything arriving after unmount, are ignored.
    pub fn handle<R: RandomSource + ?Sized>(
        &mut self,
        timer: &Timer,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) {
        if !self.mounted || timer.cell != self.id {
            return;
        }
        match timer.kind {
            TimerKind::Trigger => self.on_trigger(timer.id, scheduler, rng),
            TimerKind::PopEnd => self.on_pop_end(timer.id),
            TimerKind::ScrambleTick => self.on_scramble_tick(timer.id, scheduler, rng),
        }
    }

    /// Cancel every timer of this cell and discard its state.
    ///
    /// Returns the number of timers that were still pending.
    pub fn unmount(&mut self, scheduler: &mut Scheduler) -> usize {
        let cancelled = scheduler.cancel_cell(self.id);
        self.timers = CellTimers::default();
        self.state = CellRuntimeState::default();
        self.mounted = false;
        cancelled
    }

    fn arm_trigger<R: RandomSource + ?Sized>(&mut self, scheduler: &mut Scheduler, rng: &mut R) {
        let interval = rng.range(TRIGGER_MIN_MS, TRIGGER_MAX_MS);
        self.timers.trigger = Some(scheduler.schedule(self.id, TimerKind::Trigger, millis(interval)));
    }

    fn on_trigger<R: RandomSource + ?Sized>(
        &mut self,
        id: TimerId,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) {
        if self.timers.trigger != Some(id) {
            return;
        }
        self.timers.trigger = None;

        if rng.chance(POP_PROBABILITY) {
            let hold = rng.range(POP_MIN_MS, POP_MAX_MS);
            self.pop(millis(hold), scheduler);
        }
        if rng.chance(SCRAMBLE_PROBABILITY) {
            self.start_scramble(scheduler, rng);
        }
        self.arm_trigger(scheduler, rng);
    }

    fn pop(&mut self, hold: Duration, scheduler: &mut Scheduler) {
        if let Some(previous) = self.timers.pop_end.take() {
            scheduler.cancel(previous);
        }
        self.state.popped = true;
        self.timers.pop_end = Some(scheduler.schedule(self.id, TimerKind::PopEnd, hold));
        trace!("cell {} popped for {:?}", self.id, hold);
    }

    fn on_pop_end(&mut self, id: TimerId) {
        if self.timers.pop_end != Some(id) {
            return;
        }
        self.timers.pop_end = None;
        self.state.popped = false;
    }

    fn start_scramble<R: RandomSource + ?Sized>(&mut self, scheduler: &mut Scheduler, rng: &mut R) {
        // a new scramble restarts the window but keeps the running sub-tick
        self.state.scrambling = true;
        self.state.scramble_started = Some(scheduler.now());
        // extra draw on entry: the first 30 ms would otherwise show an empty placeholder
        self.state.scramble = ScrambleText::sample(rng);
        if self.timers.scramble_tick.is_none() {
            self.timers.scramble_tick =
                Some(scheduler.schedule(self.id, TimerKind::ScrambleTick, SCRAMBLE_TICK));
        }
        trace!("cell {} scrambling at {:?}", self.id, scheduler.now());
    }

    fn on_scramble_tick<R: RandomSource + ?Sized>(
        &mut self,
        id: TimerId,
        scheduler: &mut Scheduler,
        rng: &mut R,
    ) {
        if self.timers.scramble_tick != Some(id) {
            return;
        }
        self.timers.scramble_tick = None;
        self.state.scramble = ScrambleText::sample(rng);

        let started = self.state.scramble_started.unwrap_or_default();
        if scheduler.now().saturating_sub(started) > SCRAMBLE_WINDOW {
            self.state.scrambling = false;
            self.state.scramble_started = None;
            trace!("cell {} settled at {:?}", self.id, scheduler.now());
        } else {
            self.timers.scramble_tick =
                Some(scheduler.schedule(self.id, TimerKind::ScrambleTick, SCRAMBLE_TICK));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticker_common::{FixedRandom, RandomSource};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    /// Replays a scripted sequence of draws, then repeats the last one.
    struct Scripted {
        draws: Vec<f64>,
        cursor: usize,
    }

    impl Scripted {
        fn new(draws: &[f64]) -> Self {
            Self { draws: draws.to_vec(), cursor: 0 }
        }
    }

    impl RandomSource for Scripted {
        fn next_f64(&mut self) -> f64 {
            let value = self.draws[self.cursor.min(self.draws.len() - 1)];
            self.cursor += 1;
            value
        }
    }

    fn run_until(
        cell: &mut CellMachine,
        scheduler: &mut Scheduler,
        rng: &mut impl RandomSource,
        until: Duration,
    ) {
        while let Some(timer) = scheduler.pop_due(until) {
            cell.handle(&timer, scheduler, rng);
        }
        scheduler.advance_clock(until);
    }

    #[test]
    fn mount_arms_a_single_trigger_in_range() {
        let mut scheduler = Scheduler::new();
        let cell = CellMachine::mount(4, &mut scheduler, &mut FixedRandom(0.5));
        let timers = scheduler.pending_for(4);
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].kind, TimerKind::Trigger);
        assert_eq!(timers[0].due, ms(500));
        assert!(cell.state().is_idle());
    }

    #[test]
    fn half_draws_never_pop_or_scramble() {
        let mut scheduler = Scheduler::new();
        let mut rng = FixedRandom(0.5);
        let mut cell = CellMachine::mount(0, &mut scheduler, &mut rng);
        run_until(&mut cell, &mut scheduler, &mut rng, ms(10_000));
        assert!(cell.state().is_idle());
        // triggers keep re-arming every 500 ms
        assert_eq!(scheduler.pending_for(0)[0].due, ms(10_500));
    }

    #[test]
    fn scramble_runs_for_its_window_then_settles() {
        let mut scheduler = Scheduler::new();
        // mount interval, then trigger: no pop, scramble, rest high
        let mut rng = Scripted::new(&[0.0, 0.9, 0.1, 0.9]);
        let mut cell = CellMachine::mount(0, &mut scheduler, &mut rng);

        run_until(&mut cell, &mut scheduler, &mut rng, ms(300));
        assert!(cell.state().scrambling);
        assert_eq!(cell.state().scramble_started, Some(ms(300)));
        assert_eq!(cell.state().scramble.symbol.len(), 3);
        assert_eq!(cell.state().scramble.price.len(), 4);
        assert!(cell.state().scramble.change.ends_with('%'));

        run_until(&mut cell, &mut scheduler, &mut rng, ms(300 + 260));
        assert!(cell.state().scrambling);

        run_until(&mut cell, &mut scheduler, &mut rng, ms(300 + 270));
        assert!(!cell.state().scrambling);
        assert!(
            scheduler
                .pending_for(0)
                .iter()
                .all(|timer| timer.kind != TimerKind::ScrambleTick)
        );
    }

    #[test]
    fn pop_reverts_after_drawn_hold() {
        let mut scheduler = Scheduler::new();
        // mount interval 300 ms; trigger: pop, hold draw 0.5 -> 180 ms, no scramble
        let mut rng = Scripted::new(&[0.0, 0.01, 0.5, 0.9, 0.9]);
        let mut cell = CellMachine::mount(2, &mut scheduler, &mut rng);

        run_until(&mut cell, &mut scheduler, &mut rng, ms(300));
        assert!(cell.state().popped);
        assert!(!cell.state().scrambling);
        let pop_end = scheduler
            .pending_for(2)
            .into_iter()
            .find(|timer| timer.kind == TimerKind::PopEnd)
            .unwrap();
        assert_eq!(pop_end.due, ms(480));

        run_until(&mut cell, &mut scheduler, &mut rng, ms(479));
        assert!(cell.state().popped);
        run_until(&mut cell, &mut scheduler, &mut rng, ms(480));
        assert!(!cell.state().popped);
    }

    #[test]
    fn pop_and_scramble_can_overlap() {
        let mut scheduler = Scheduler::new();
        let mut rng = Scripted::new(&[0.0, 0.01, 0.5, 0.01, 0.9]);
        let mut cell = CellMachine::mount(1, &mut scheduler, &mut rng);
        run_until(&mut cell, &mut scheduler, &mut rng, ms(300));
        assert!(cell.state().popped && cell.state().scrambling);
    }

    #[test]
    fn unmount_cancels_in_flight_scramble() {
        let mut scheduler = Scheduler::new();
        let mut rng = Scripted::new(&[0.0, 0.01, 0.5, 0.01, 0.9]);
        let mut cell = CellMachine::mount(7, &mut scheduler, &mut rng);
        run_until(&mut cell, &mut scheduler, &mut rng, ms(330));
        // trigger, pop end and scramble tick are all pending
        assert_eq!(scheduler.pending_for(7).len(), 3);

        assert_eq!(cell.unmount(&mut scheduler), 3);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(cell.state(), &CellRuntimeState::default());
        assert!(!cell.is_mounted());
    }

    #[test]
    fn unmount_leaves_other_cells_armed() {
        let mut scheduler = Scheduler::new();
        let mut rng = FixedRandom(0.5);
        let mut first = CellMachine::mount(0, &mut scheduler, &mut rng);
        let mut second = CellMachine::mount(1, &mut scheduler, &mut rng);

        assert_eq!(first.unmount(&mut scheduler), 1);
        assert!(scheduler.pending_for(0).is_empty());
        assert_eq!(scheduler.pending_for(1).len(), 1);

        let timer = scheduler.pop_due(ms(500)).unwrap();
        assert_eq!(timer.cell, 1);
        first.handle(&timer, &mut scheduler, &mut rng);
        second.handle(&timer, &mut scheduler, &mut rng);
        assert!(scheduler.pending_for(0).is_empty());
        assert_eq!(scheduler.pending_for(1)[0].due, ms(1000));
    }

    #[test]
    fn scramble_entry_shows_a_placeholder_immediately() {
        let mut scheduler = Scheduler::new();
        let mut rng = Scripted::new(&[0.0, 0.9, 0.1, 0.9]);
        let mut cell = CellMachine::mount(3, &mut scheduler, &mut rng);
        run_until(&mut cell, &mut scheduler, &mut rng, ms(300));
        assert!(cell.state().scrambling);
        assert!(!cell.state().scramble.symbol.is_empty());
        assert!(!cell.state().scramble.price.is_empty());
    }

    #[test]
    fn foreign_and_stale_timers_are_ignored() {
        let mut scheduler = Scheduler::new();
        let mut rng = FixedRandom(0.0);
        let mut cell = CellMachine::mount(0, &mut scheduler, &mut rng);
        let foreign = Timer {
            id: TimerId(999),
            cell: 1,
            kind: TimerKind::Trigger,
            due: ms(0),
        };
        cell.handle(&foreign, &mut scheduler, &mut rng);
        let stale = Timer { cell: 0, ..foreign };
        cell.handle(&stale, &mut scheduler, &mut rng);
        assert!(cell.state().is_idle());
        assert_eq!(scheduler.pending(), 1);
    }
}
