//! Simulation time model and run configuration.
//!
//! Time is a monotonically increasing `Tick` counter.  One tick is one full
//! generate → move → rebuild → retire → record cycle; there is no mapping to
//! wall-clock time.

use std::fmt;

use crate::{TgError, TgResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Advance to the next tick.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from a JSON file by the application
/// crate (with the `serde` feature) and handed to the simulation builder
/// together with a capacity layout.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Grid height in cells.
    pub rows: usize,

    /// Grid width in cells.
    pub cols: usize,

    /// Target number of active flows as a fraction of `rows * cols`.
    /// Must lie in `(0, 1]`.
    pub density: f64,

    /// Master RNG seed.  `0` seeds from OS entropy; any other value always
    /// produces identical results.
    pub seed: u64,

    /// Ticks simulated by `Sim::run`.
    pub total_ticks: u64,
}

impl SimConfig {
    /// Fail fast on dimensions or densities that cannot describe a run.
    pub fn validate(&self) -> TgResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(TgError::Config(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if i32::try_from(self.rows).is_err() || i32::try_from(self.cols).is_err() {
            return Err(TgError::Config(format!(
                "grid dimensions {}x{} exceed the addressable range",
                self.rows, self.cols
            )));
        }
        if !self.density.is_finite() || self.density <= 0.0 || self.density > 1.0 {
            return Err(TgError::Config(format!(
                "density must lie in (0, 1], got {}",
                self.density
            )));
        }
        Ok(())
    }

    /// Number of cells in the grid.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Active-flow count the generator tops up to each tick.
    ///
    /// Rounds half to even, so a 1×5 grid at density `0.5` targets 2 flows
    /// rather than 3.
    pub fn target_flows(&self) -> usize {
        (self.cell_count() as f64 * self.density).round_ties_even() as usize
    }

    /// The tick at which `Sim::run` stops (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}
