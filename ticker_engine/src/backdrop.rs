//! The backdrop orchestrator.
//!
//! `Backdrop::mount` is the single entry point: it draws the dataset once, assigns
//! every cell its layout (jitter included), and mounts one `CellMachine` per entry on
//! a shared `Scheduler`. From then on the owner moves the clock with `advance_to`
//! and reads `frame()` whenever it wants to draw.
//!
//! Teardown is structural. All timers live in the scheduler the backdrop owns, so
//! `unmount` (or simply dropping the backdrop) releases every one of them, and an
//! unmounted backdrop ignores further clock movement.

use crate::model::ambient::CYCLE;
use crate::model::cell::{CellMachine, CellRuntimeState};
use crate::model::layout::CellLayout;
use crate::model::quote_generator::{Dataset, QuoteGenerator};
use crate::model::scheduler::Scheduler;
use crate::model::view::{CellView, Frame};
use log::info;
use std::time::Duration;
use ticker_common::grid::{GridMetrics, TOTAL};
use ticker_common::{RandomSource, SeededRandom};

/// A mounted grid of animated ticker cells.
pub struct Backdrop<R: RandomSource = SeededRandom> {
    rng: R,
    dataset: Dataset,
    layouts: Vec<CellLayout>,
    cells: Vec<CellMachine>,
    scheduler: Scheduler,
    mounted: bool,
}

impl<R: RandomSource> Backdrop<R> {
    /// Generate the dataset and layouts, and start every cell's timers.
    pub fn mount(mut rng: R) -> Self {
        let dataset = QuoteGenerator::generate(&mut rng);
        let layouts: Vec<CellLayout> = (0..TOTAL)
            .map(|index| CellLayout::compute(index, &mut rng))
            .collect();
        let mut scheduler = Scheduler::new();
        let cells: Vec<CellMachine> = (0..TOTAL)
            .map(|index| CellMachine::mount(index, &mut scheduler, &mut rng))
            .collect();
        info!(
            "Backdrop mounted: {} cells, {} timers armed",
            cells.len(),
            scheduler.pending()
        );

        Self {
            rng,
            dataset,
            layouts,
            cells,
            scheduler,
            mounted: true,
        }
    }

    /// Tear everything down and mount again with fresh data, layout and state.
    pub fn remount(self) -> Self {
        let mut this = self;
        this.unmount();
        let Backdrop { rng, .. } = this;
        Self::mount(rng)
    }

    /// Fire every timer due up to `at` (time since mount) in due order, then move the
    /// clock to `at`. Returns the number of timers fired; always 0 once unmounted.
    pub fn advance_to(&mut self, at: Duration) -> usize {
        if !self.mounted {
            return 0;
        }
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(at) {
            if let Some(cell) = self.cells.get_mut(timer.cell) {
                cell.handle(&timer, &mut self.scheduler, &mut self.rng);
                fired += 1;
            }
        }
        self.scheduler.advance_clock(at);
        fired
    }

    /// `advance_to(now + dt)`.
    pub fn advance_by(&mut self, dt: Duration) -> usize {
        let target = self.scheduler.now() + dt;
        self.advance_to(target)
    }

    /// Time since mount.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// When the next timer fires, if any is pending.
    pub fn next_deadline(&mut self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Snapshot of every cell at the current clock.
    pub fn frame(&self) -> Frame {
        let elapsed = self.scheduler.now();
        let cells = self
            .layouts
            .iter()
            .zip(self.dataset.iter())
            .zip(self.cells.iter())
            .map(|((layout, quote), cell)| CellView::compose(layout, quote, cell.state(), elapsed))
            .collect();
        Frame {
            elapsed_ms: elapsed.as_millis() as u64,
            grid: GridMetrics::default(),
            cycle_ms: CYCLE.as_millis() as u64,
            cells,
        }
    }

    /// Cancel every timer and discard all runtime state. Returns the number of timers
    /// that were still pending.
    pub fn unmount(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }
        let mut cancelled: usize = self
            .cells
            .iter_mut()
            .map(|cell| cell.unmount(&mut self.scheduler))
            .sum();
        // anything a cell lost track of
        cancelled += self.scheduler.cancel_all();
        self.mounted = false;
        info!("Backdrop unmounted: {} timers cancelled", cancelled);
        cancelled
    }

    /// `false` once `unmount` ran.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The quotes, in cell order.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// The layouts, in cell order.
    pub fn layouts(&self) -> &[CellLayout] {
        &self.layouts
    }

    /// Runtime state of cell `index`.
    pub fn cell_state(&self, index: usize) -> Option<&CellRuntimeState> {
        self.cells.get(index).map(CellMachine::state)
    }

    /// Runtime states of all cells, in cell order.
    pub fn cell_states(&self) -> Vec<CellRuntimeState> {
        self.cells.iter().map(|cell| cell.state().clone()).collect()
    }

    /// Timers that can still fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Static grid metadata.
    pub fn grid(&self) -> GridMetrics {
        GridMetrics::default()
    }
}
