//! A single routed batch of vehicles.

use tg_core::{FlowId, GridPos, Tick};

use crate::{CandidateMoves, FlowSnapshot};

/// What [`Flow::commit`] did this tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Stepped to a neighbouring cell.
    Moved { from: GridPos, to: GridPos },
    /// Chose to stay; the stay candidate was the cheapest survivor.
    Stayed,
    /// Every candidate was pruned.  The flow holds its position.
    Gridlocked,
}

/// A batch of vehicles sharing one origin, destination, and volume, moved as
/// a single entity.
///
/// `location` changes at most once per tick, in [`commit`](Self::commit).
/// `destination` and `volume` are fixed for the flow's lifetime.
#[derive(Clone, Debug)]
pub struct Flow {
    pub id: FlowId,

    /// Current cell.
    pub location: GridPos,

    /// Cell occupied before the last commit.  Equals `location` until the
    /// flow has committed once.
    pub previous: GridPos,

    pub destination: GridPos,

    /// Vehicle count; always at least 1.
    pub volume: u32,

    /// Tick during which the flow was generated or placed.
    pub spawned_at: Tick,

    moves: CandidateMoves,
}

impl Flow {
    /// Create a flow at `origin` heading for `destination`.
    ///
    /// The candidate table starts populated for the origin.
    pub fn new(id: FlowId, origin: GridPos, destination: GridPos, volume: u32, spawned_at: Tick) -> Self {
        debug_assert!(volume >= 1, "flow volume must be positive");
        Self {
            id,
            location: origin,
            previous: origin,
            destination,
            volume,
            spawned_at,
            moves: CandidateMoves::generate(origin, destination),
        }
    }

    /// Rebuild the five candidates from the current location.
    pub fn renew_moves(&mut self) {
        self.moves = CandidateMoves::generate(self.location, self.destination);
    }

    #[inline]
    pub fn moves(&self) -> &CandidateMoves {
        &self.moves
    }

    #[inline]
    pub fn moves_mut(&mut self) -> &mut CandidateMoves {
        &mut self.moves
    }

    /// Remove the candidate for `pos`.
    #[inline]
    pub fn prune(&mut self, pos: GridPos) -> bool {
        self.moves.prune(pos)
    }

    /// Overwrite the cost of a surviving candidate.
    #[inline]
    pub fn update_cost(&mut self, pos: GridPos, cost: f64) -> bool {
        self.moves.update_cost(pos, cost)
    }

    /// Cost of the candidate for `pos`, if it survives.
    #[inline]
    pub fn cost(&self, pos: GridPos) -> Option<f64> {
        self.moves.cost(pos)
    }

    /// Move to the cheapest surviving candidate.
    ///
    /// Sets `previous = location` first.  With no survivors the flow stays
    /// where it is and reports [`MoveOutcome::Gridlocked`].
    pub fn commit(&mut self) -> MoveOutcome {
        self.previous = self.location;
        match self.moves.best() {
            Some(choice) if choice.pos != self.location => {
                self.location = choice.pos;
                MoveOutcome::Moved { from: self.previous, to: choice.pos }
            }
            Some(_) => MoveOutcome::Stayed,
            None => MoveOutcome::Gridlocked,
        }
    }

    /// `true` once the flow stands on its destination.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.location == self.destination
    }

    /// Immutable copy of the flow's public state.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            id:          self.id,
            location:    self.location,
            previous:    self.previous,
            destination: self.destination,
            volume:      self.volume,
            arrived:     self.is_complete(),
        }
    }
}
