//! The capacity grid: static road capacities plus the derived volume matrix.
//!
//! # Volume contract
//!
//! Within a tick `volume` is never patched incrementally.  The tick changes
//! it only through [`CapacityGrid::rebuild_volume`], which zeroes the matrix
//! and re-adds every occupant.  Recomputing from scratch each tick is what
//! keeps the matrix in exact agreement with the flow set; there is no drift
//! to correct.
//!
//! Between ticks, [`CapacityGrid::place_occupant`] adds one new occupant on
//! top of the matrix the last tick left behind, so everything else the next
//! tick reads stays as it was.
//!
//! Volumes may exceed capacity.  The simulator only refuses moves into cells
//! that were already full when the tick started, so several flows can enter
//! the same cell in one tick.  The overflow is tracked here, not rejected.

use tg_core::{GridPos, SimRng};

use crate::{GridError, GridResult, Matrix};

/// Smallest capacity that can host a freshly generated flow: volumes are
/// drawn from `1..capacity`, which is empty below 2.
pub const MIN_ORIGIN_CAPACITY: u32 = 2;

/// Capacity and volume matrices for a `rows × cols` city grid, plus the RNG
/// used to sample cells from it.
///
/// A capacity of `0` marks a cell with no road; it can never be entered,
/// since its volume (`0`) already meets its capacity.
#[derive(Debug)]
pub struct CapacityGrid {
    capacity: Matrix<u32>,
    volume:   Matrix<u32>,
    rng:      SimRng,

    /// Cells with `capacity > 0`, row-major.  Capacities are fixed at
    /// construction so the list never goes stale.
    road_cells: Vec<GridPos>,

    /// Cells with `capacity >= MIN_ORIGIN_CAPACITY`, row-major.
    origin_cells: Vec<GridPos>,
}

impl CapacityGrid {
    /// Wrap a capacity layout.  The volume matrix starts at zero.
    pub fn new(capacity: Matrix<u32>, rng: SimRng) -> Self {
        let road_cells = capacity
            .iter()
            .filter(|&(_, &c)| c > 0)
            .map(|(pos, _)| pos)
            .collect();
        let origin_cells = capacity
            .iter()
            .filter(|&(_, &c)| c >= MIN_ORIGIN_CAPACITY)
            .map(|(pos, _)| pos)
            .collect();
        let volume = Matrix::new(capacity.rows(), capacity.cols());
        Self {
            capacity,
            volume,
            rng,
            road_cells,
            origin_cells,
        }
    }

    // ── Shape ─────────────────────────────────────────────────────────────

    #[inline]
    pub fn rows(&self) -> usize {
        self.capacity.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.capacity.cols()
    }

    /// `true` if `pos` lies inside the grid.
    #[inline]
    pub fn is_valid(&self, pos: GridPos) -> bool {
        self.capacity.contains(pos)
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Capacity of `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is not [valid](Self::is_valid).
    #[inline]
    pub fn capacity(&self, pos: GridPos) -> u32 {
        self.capacity[pos]
    }

    /// Current volume of `pos`.
    ///
    /// # Panics
    /// Panics if `pos` is not [valid](Self::is_valid).
    #[inline]
    pub fn volume(&self, pos: GridPos) -> u32 {
        self.volume[pos]
    }

    /// `true` when `volume(pos) >= capacity(pos)`.
    ///
    /// Invalid positions report `false`; callers exclude them from movement
    /// with [`is_valid`](Self::is_valid) first.
    #[inline]
    pub fn is_full(&self, pos: GridPos) -> bool {
        match (self.volume.get(pos), self.capacity.get(pos)) {
            (Some(v), Some(c)) => v >= c,
            _ => false,
        }
    }

    /// The full capacity matrix.
    #[inline]
    pub fn capacities(&self) -> &Matrix<u32> {
        &self.capacity
    }

    /// The full volume matrix.
    #[inline]
    pub fn volumes(&self) -> &Matrix<u32> {
        &self.volume
    }

    /// Number of cells with `capacity > 0`.
    #[inline]
    pub fn road_cell_count(&self) -> usize {
        self.road_cells.len()
    }

    /// Number of cells able to host a generated flow.
    #[inline]
    pub fn origin_cell_count(&self) -> usize {
        self.origin_cells.len()
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// Sample `n` distinct cells with `capacity > 0`, uniformly without
    /// replacement.
    ///
    /// Separate calls are independent draws and may overlap.
    pub fn select_cells(&mut self, n: usize) -> GridResult<Vec<GridPos>> {
        sample(&mut self.rng, &self.road_cells, n)
    }

    /// Sample `n` distinct cells with `capacity >= 2`, uniformly without
    /// replacement.  Only these cells can host a new flow.
    pub fn select_origins(&mut self, n: usize) -> GridResult<Vec<GridPos>> {
        sample(&mut self.rng, &self.origin_cells, n)
    }

    /// Draw a flow volume uniformly from `1..capacity(origin)`.
    ///
    /// Returns `None` when `origin` is invalid or its capacity is below 2.
    pub fn draw_volume(&mut self, origin: GridPos) -> Option<u32> {
        let capacity = *self.capacity.get(origin)?;
        (capacity >= MIN_ORIGIN_CAPACITY).then(|| self.rng.gen_range(1..capacity))
    }

    // ── Volume rebuild ────────────────────────────────────────────────────

    /// Zero the volume matrix.
    pub fn clear_volume(&mut self) {
        self.volume.fill(0);
    }

    /// Add one occupant placed between ticks to the current volume matrix.
    ///
    /// This is the only incremental update.  It leaves every other cell as
    /// the last rebuild left it, including flows retired since then.  Returns
    /// `false` (and changes nothing) if `pos` is outside the grid.
    pub fn place_occupant(&mut self, pos: GridPos, volume: u32) -> bool {
        match self.volume.get_mut(pos) {
            Some(cell) => {
                *cell += volume;
                true
            }
            None => false,
        }
    }

    /// Zero the volume matrix, then add each `(location, volume)` occupant.
    ///
    /// Occupants outside the grid are ignored; the simulator never produces
    /// them.
    pub fn rebuild_volume<I>(&mut self, occupants: I)
    where
        I: IntoIterator<Item = (GridPos, u32)>,
    {
        self.clear_volume();
        for (pos, volume) in occupants {
            if let Some(cell) = self.volume.get_mut(pos) {
                *cell += volume;
            }
        }
    }
}

fn sample(rng: &mut SimRng, cells: &[GridPos], n: usize) -> GridResult<Vec<GridPos>> {
    let picked = rng
        .sample_indices(cells.len(), n)
        .ok_or(GridError::InsufficientRoadCells {
            requested: n,
            available: cells.len(),
        })?;
    Ok(picked.into_iter().map(|i| cells[i]).collect())
}
