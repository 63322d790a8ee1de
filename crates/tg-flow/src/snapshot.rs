//! Read-only flow snapshots.

use tg_core::{FlowId, GridPos};

/// A flow as it stood at the end of one tick's movement phase.
///
/// `arrived` is set for flows standing on their destination; those are
/// retired at the end of the tick and absent from every later snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowSnapshot {
    pub id:          FlowId,
    pub location:    GridPos,
    pub previous:    GridPos,
    pub destination: GridPos,
    pub volume:      u32,
    pub arrived:     bool,
}

impl FlowSnapshot {
    /// `true` if the flow changed cell during the tick.
    #[inline]
    pub fn moved(&self) -> bool {
        self.location != self.previous
    }
}
