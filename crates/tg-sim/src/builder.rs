//! Fluent builder for constructing a [`Sim`].

use tg_core::{FlowId, SimConfig, SimRng, Tick};
use tg_grid::{CapacityGrid, DirectionGrid, GridError, Matrix, WeightGrid};

use crate::{History, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: dimensions, density, seed, tick count
/// - a capacity layout: `Matrix<u32>` of shape `rows × cols`; `0` marks a
///   cell without road
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                                  |
/// |----------------------|------------------------------------------|
/// | `.directions(grid)`  | no direction layer (all moves permitted) |
/// | `.weighted(true)`    | unweighted costs                         |
///
/// # Example
///
/// ```rust,ignore
/// let mut directions = DirectionGrid::new(10, 10);
/// directions.set_row(3, (false, false, false, true))?;
///
/// let mut sim = SimBuilder::new(config, layout)
///     .directions(directions)
///     .weighted(true)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    capacity:   Matrix<u32>,
    directions: Option<DirectionGrid>,
    weighted:   bool,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, capacity: Matrix<u32>) -> Self {
        Self {
            config,
            capacity,
            directions: None,
            weighted: false,
        }
    }

    /// Restrict movement with per-cell direction masks.  Must match the
    /// configured dimensions.
    pub fn directions(mut self, directions: DirectionGrid) -> Self {
        self.directions = Some(directions);
        self
    }

    /// Scale move costs by `1 / (capacity + 1)` of the target cell.
    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    /// Validate inputs, derive the weight layer, seed the RNG, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;
        let (rows, cols) = (self.config.rows, self.config.cols);

        // ── Validate layer shapes ─────────────────────────────────────────
        if self.capacity.shape() != (rows, cols) {
            return Err(GridError::DimensionMismatch {
                what:     "capacity layout",
                rows,
                cols,
                got_rows: self.capacity.rows(),
                got_cols: self.capacity.cols(),
            }
            .into());
        }
        if let Some(d) = &self.directions {
            if (d.rows(), d.cols()) != (rows, cols) {
                return Err(GridError::DimensionMismatch {
                    what:     "direction grid",
                    rows,
                    cols,
                    got_rows: d.rows(),
                    got_cols: d.cols(),
                }
                .into());
            }
        }

        // ── Build grids ───────────────────────────────────────────────────
        let grid = CapacityGrid::new(self.capacity, SimRng::new(self.config.seed));
        let weights = self
            .weighted
            .then(|| WeightGrid::from_capacities(grid.capacities()));

        Ok(Sim {
            config:     self.config,
            tick:       Tick::ZERO,
            grid,
            directions: self.directions,
            weights,
            flows:      Vec::new(),
            history:    History::new(),
            next_id:    FlowId(0),
        })
    }
}
