//! Candidate pruning and cost adjustment.
//!
//! The base rule is the same for every grid variant: a candidate survives
//! only if it is on the grid and its cell was not already full when the tick
//! started.  Optional layers then apply on top:
//!
//! | Layer            | Effect on surviving candidates                        |
//! |------------------|-------------------------------------------------------|
//! | `DirectionGrid`  | prune steps the current cell's mask forbids           |
//! | `WeightGrid`     | multiply cost by the weight of the candidate cell     |
//!
//! Both layers may be present at once.

use std::fmt;

use tg_core::GridPos;
use tg_flow::{Flow, MOVE_OFFSETS, MoveOutcome};
use tg_grid::{CapacityGrid, DirectionGrid, WeightGrid};

/// Which optional layers a simulation carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GridVariant {
    Plain,
    Weighted,
    Directed,
    DirectedWeighted,
}

impl GridVariant {
    pub fn from_layers(directed: bool, weighted: bool) -> Self {
        match (directed, weighted) {
            (false, false) => GridVariant::Plain,
            (false, true) => GridVariant::Weighted,
            (true, false) => GridVariant::Directed,
            (true, true) => GridVariant::DirectedWeighted,
        }
    }

    #[inline]
    pub fn is_directed(self) -> bool {
        matches!(self, GridVariant::Directed | GridVariant::DirectedWeighted)
    }

    #[inline]
    pub fn is_weighted(self) -> bool {
        matches!(self, GridVariant::Weighted | GridVariant::DirectedWeighted)
    }
}

impl fmt::Display for GridVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GridVariant::Plain => "plain",
            GridVariant::Weighted => "weighted",
            GridVariant::Directed => "directed",
            GridVariant::DirectedWeighted => "directed+weighted",
        };
        f.write_str(name)
    }
}

/// Read-only view of the grids a flow is pruned against.
///
/// Built once per tick from the pre-move state, so every flow sees the same
/// occupancy regardless of the order flows are stepped in.
pub struct MovePolicy<'a> {
    grid:       &'a CapacityGrid,
    directions: Option<&'a DirectionGrid>,
    weights:    Option<&'a WeightGrid>,
}

impl<'a> MovePolicy<'a> {
    pub fn new(
        grid:       &'a CapacityGrid,
        directions: Option<&'a DirectionGrid>,
        weights:    Option<&'a WeightGrid>,
    ) -> Self {
        Self { grid, directions, weights }
    }

    pub fn variant(&self) -> GridVariant {
        GridVariant::from_layers(self.directions.is_some(), self.weights.is_some())
    }

    /// Whether a flow standing on `from` may enter `to` this tick.
    pub fn admits(&self, from: GridPos, to: GridPos) -> bool {
        self.grid.is_valid(to)
            && !self.grid.is_full(to)
            && self.directions.is_none_or(|d| d.permits(from, to))
    }

    /// Prune the flow's current candidates and apply weights to survivors.
    pub fn prune(&self, flow: &mut Flow) {
        let from = flow.location;
        for slot in 0..MOVE_OFFSETS.len() {
            let Some(candidate) = flow.moves().get(slot) else {
                continue;
            };
            if !self.admits(from, candidate.pos) {
                flow.moves_mut().prune_slot(slot);
            } else if let Some(weights) = self.weights {
                flow.update_cost(candidate.pos, candidate.cost * weights.weight(candidate.pos));
            }
        }
    }

    /// Rebuild, prune, and commit one flow's move for the tick.
    pub fn step(&self, flow: &mut Flow) -> MoveOutcome {
        flow.renew_moves();
        self.prune(flow);
        flow.commit()
    }
}
