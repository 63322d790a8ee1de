//! Strongly typed flow identifier.

use std::fmt;

/// Identity of one flow, assigned in spawn order by the engine.
///
/// Ids are never reused within a run, so they double as a stable sort key
/// for snapshots and output rows.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlowId(pub u64);

impl FlowId {
    /// The id following `self`.
    #[inline]
    pub fn next(self) -> FlowId {
        FlowId(self.0 + 1)
    }
}

impl fmt::Display for FlowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}
