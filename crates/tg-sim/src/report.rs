//! Per-tick summary returned by `Sim::step`.

use tg_core::{FlowId, Tick};

/// Counts describing what happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,

    /// Flows generated in the tick's first phase.
    pub spawned: usize,

    /// Flows that changed cell.
    pub moved: usize,

    /// Flows that stayed by choice, or that started the tick on their
    /// destination.
    pub stayed: usize,

    /// Flows left with no legal candidate; they held position.
    pub gridlocked: Vec<FlowId>,

    /// Flows removed after reaching their destination.
    pub retired: usize,

    /// Flows still active once the tick finished.
    pub active: usize,
}

impl TickReport {
    #[inline]
    pub fn gridlock_count(&self) -> usize {
        self.gridlocked.len()
    }
}
