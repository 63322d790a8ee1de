//! Append-only per-tick history.
//!
//! Each entry owns its own copies of the flow snapshots and the volume
//! matrix, so nothing the engine does afterwards can change a recorded tick.
//! The store performs no analysis; it only keeps ticks in order and hands
//! them back.

use tg_core::Tick;
use tg_flow::FlowSnapshot;
use tg_grid::Matrix;

/// The recorded outcome of one tick.
///
/// `flows` holds every flow that was stepped during the tick, including
/// flows that arrived and were retired at its end (`arrived == true`).
/// `volume` is the matrix rebuilt from exactly those flows, so for every
/// cell `volume[pos]` equals the summed volume of the flows located there.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub tick:   Tick,
    pub flows:  Vec<FlowSnapshot>,
    pub volume: Matrix<u32>,
}

impl HistoryEntry {
    /// Flows still active after the tick (not retired).
    pub fn active_flows(&self) -> impl Iterator<Item = &FlowSnapshot> + '_ {
        self.flows.iter().filter(|f| !f.arrived)
    }
}

/// Ordered log of [`HistoryEntry`] values, one per tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next tick.  Amortised O(1).
    pub fn append(&mut self, entry: HistoryEntry) {
        debug_assert!(
            self.entries.last().is_none_or(|last| last.tick < entry.tick),
            "history entries must be appended in tick order"
        );
        self.entries.push(entry);
    }

    /// Number of recorded ticks.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    #[inline]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries in tick order.  Each call starts a fresh pass.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Drop every recorded tick.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for History {
    type Item = HistoryEntry;
    type IntoIter = std::vec::IntoIter<HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
