//! Simulation observer trait for progress reporting and data collection.

use tg_core::Tick;
use tg_grid::Matrix;

use crate::{HistoryEntry, TickReport};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: gridlock counter
///
/// ```rust,ignore
/// struct GridlockCounter(usize);
///
/// impl SimObserver for GridlockCounter {
///     fn on_tick_end(&mut self, report: &TickReport) {
///         self.0 += report.gridlock_count();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick has been recorded.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    /// Called with the history entry just appended for the tick, alongside
    /// the static capacity matrix it should be read against.
    fn on_record(&mut self, _entry: &HistoryEntry, _capacity: &Matrix<u32>) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
