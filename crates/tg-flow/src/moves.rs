//! The candidate-move table.
//!
//! Candidates live in a fixed array indexed by slot, in the order given by
//! [`MOVE_OFFSETS`].  Pruning clears a slot; it never reorders the others,
//! so "first minimum wins" is a property of the slot order alone and does
//! not depend on any container's iteration semantics.

use tg_core::GridPos;

/// `(d_row, d_col)` of each candidate slot: up, stay, down, left, right.
pub const MOVE_OFFSETS: [(i32, i32); 5] = [(-1, 0), (0, 0), (1, 0), (0, -1), (0, 1)];

/// Slot of the "stay in place" candidate.
pub const STAY_SLOT: usize = 1;

/// One surviving candidate: the cell to move to and its cost.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    pub pos:  GridPos,
    pub cost: f64,
}

/// The five candidate moves of one flow for the current tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateMoves {
    slots: [Option<Candidate>; 5],
}

impl CandidateMoves {
    /// All five candidates around `location`, costed by Euclidean distance
    /// to `destination`.
    pub fn generate(location: GridPos, destination: GridPos) -> Self {
        let slots = MOVE_OFFSETS.map(|(d_row, d_col)| {
            let pos = location.offset(d_row, d_col);
            Some(Candidate { pos, cost: pos.euclidean(destination) })
        });
        Self { slots }
    }

    /// An empty table; every slot pruned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Remove the candidate for `pos`.  Returns `false` if it was not present.
    pub fn prune(&mut self, pos: GridPos) -> bool {
        match self.slot_of(pos) {
            Some(i) => {
                self.slots[i] = None;
                true
            }
            None => false,
        }
    }

    /// Remove the candidate in `slot`.
    ///
    /// # Panics
    /// Panics if `slot >= 5`.
    #[inline]
    pub fn prune_slot(&mut self, slot: usize) {
        self.slots[slot] = None;
    }

    /// Overwrite the cost of a surviving candidate.  Returns `false` if `pos`
    /// has no surviving candidate.
    pub fn update_cost(&mut self, pos: GridPos, cost: f64) -> bool {
        match self.slot_of(pos) {
            Some(i) => {
                if let Some(c) = self.slots[i].as_mut() {
                    c.cost = cost;
                }
                true
            }
            None => false,
        }
    }

    /// Cost of the candidate for `pos`, if it survives.
    pub fn cost(&self, pos: GridPos) -> Option<f64> {
        self.slot_of(pos).and_then(|i| self.slots[i]).map(|c| c.cost)
    }

    /// `true` if a candidate for `pos` survives.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.slot_of(pos).is_some()
    }

    /// The candidate in `slot`, if it survives.
    #[inline]
    pub fn get(&self, slot: usize) -> Option<Candidate> {
        self.slots.get(slot).copied().flatten()
    }

    /// Surviving candidates in slot order, with their slot index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Candidate)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|c| (i, c)))
    }

    /// Surviving candidate positions in slot order.
    pub fn positions(&self) -> Vec<GridPos> {
        self.iter().map(|(_, c)| c.pos).collect()
    }

    /// Number of surviving candidates.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// The cheapest surviving candidate; the earliest slot wins ties.
    ///
    /// NaN costs never win.
    pub fn best(&self) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for (_, c) in self.iter() {
            if c.cost.is_nan() {
                continue;
            }
            if best.is_none_or(|b| c.cost < b.cost) {
                best = Some(c);
            }
        }
        best
    }

    fn slot_of(&self, pos: GridPos) -> Option<usize> {
        self.slots
            .iter()
            .position(|c| c.is_some_and(|c| c.pos == pos))
    }
}
