//! The `Sim` struct and its tick loop.

use tracing::{debug, info, warn};

use tg_core::{FlowId, GridPos, SimConfig, Tick};
use tg_flow::{Flow, FlowSnapshot, MoveOutcome};
use tg_grid::{CapacityGrid, DirectionGrid, GridError, MIN_ORIGIN_CAPACITY, Matrix, WeightGrid};

use crate::{GridVariant, History, HistoryEntry, MovePolicy, SimError, SimObserver, SimResult, TickReport};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation engine.
///
/// `Sim` exclusively owns the grids and the active flow set and drives the
/// five-phase tick:
///
/// 1. **Generate**: top the active set up to `config.target_flows()` with
///    flows sampled from the capacity grid.
/// 2. **Step**: every flow rebuilds its candidates, prunes them against the
///    grids *as they stood at the start of the tick*, and commits a move.
///    Flows generated in phase 1 do not yet occupy any cell.
/// 3. **Rebuild**: recompute the volume matrix from all flows.
/// 4. **Retire**: drop flows standing on their destination.
/// 5. **Record**: append the tick's flows and volume matrix to the history.
///
/// # Same-tick convergence
///
/// Because phase 2 reads pre-tick occupancy, two flows can both enter a cell
/// that was empty at the start of the tick.  The rebuilt volume may then
/// exceed the cell's capacity.  This is the intended lock-step semantics:
/// congestion statistics downstream are defined against it.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration (dimensions, density, seed, tick count).
    pub config: SimConfig,

    /// The next tick to be processed.
    pub(crate) tick: Tick,

    pub(crate) grid:       CapacityGrid,
    pub(crate) directions: Option<DirectionGrid>,
    pub(crate) weights:    Option<WeightGrid>,

    /// Active flows in spawn order.
    pub(crate) flows: Vec<Flow>,

    pub(crate) history: History,
    pub(crate) next_id: FlowId,
}

impl Sim {
    // ── Runner ────────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let remaining = self.config.end_tick().0.saturating_sub(self.tick.0);
        self.run_ticks(remaining, observer)?;
        observer.on_sim_end(self.tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Stops at the first failing tick; ticks completed before it stay
    /// recorded.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        info!(
            variant = %self.variant(),
            rows = self.config.rows,
            cols = self.config.cols,
            density = self.config.density,
            ticks = n,
            start = %self.tick,
            "running traffic simulation"
        );
        for _ in 0..n {
            observer.on_tick_start(self.tick);
            let report = self.step()?;
            if let Some(entry) = self.history.last() {
                observer.on_record(entry, self.grid.capacities());
            }
            observer.on_tick_end(&report);
        }
        info!(end = %self.tick, active = self.flows.len(), recorded = self.history.len(), "run finished");
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    /// Process one tick.
    ///
    /// Fails only during generation, when too few road cells exist to place
    /// the flows the density calls for.  A failed tick is not recorded, does
    /// not advance the clock, and consumes no random draws.
    pub fn step(&mut self) -> SimResult<TickReport> {
        let now = self.tick;

        // ── Phase 1: generate ─────────────────────────────────────────────
        let spawned = self.generate_flows(now)?;

        // ── Phase 2: step every flow against pre-tick occupancy ───────────
        let mut report = TickReport { tick: now, spawned, ..TickReport::default() };
        let policy = MovePolicy::new(&self.grid, self.directions.as_ref(), self.weights.as_ref());
        for flow in &mut self.flows {
            if flow.is_complete() {
                // origin == destination: complete on arrival, never moves
                flow.previous = flow.location;
                report.stayed += 1;
                continue;
            }
            match policy.step(flow) {
                MoveOutcome::Moved { .. } => report.moved += 1,
                MoveOutcome::Stayed => report.stayed += 1,
                MoveOutcome::Gridlocked => {
                    warn!(tick = %now, flow = %flow.id, at = %flow.location, "flow gridlocked; holding position");
                    report.gridlocked.push(flow.id);
                }
            }
        }

        // ── Phase 3: rebuild volume from scratch ──────────────────────────
        self.rebuild_volume();
        let snapshots: Vec<FlowSnapshot> = self.flows.iter().map(Flow::snapshot).collect();

        // ── Phase 4: retire completed flows ───────────────────────────────
        let before = self.flows.len();
        self.flows.retain(|f| !f.is_complete());
        report.retired = before - self.flows.len();
        report.active = self.flows.len();

        // ── Phase 5: record ───────────────────────────────────────────────
        self.history.append(HistoryEntry {
            tick:   now,
            flows:  snapshots,
            volume: self.grid.volumes().clone(),
        });

        debug!(
            tick = %now,
            spawned = report.spawned,
            moved = report.moved,
            gridlocked = report.gridlocked.len(),
            retired = report.retired,
            active = report.active,
            "tick complete"
        );

        self.tick.advance();
        Ok(report)
    }

    /// Top the active set up to the density target.  Returns the number of
    /// flows created.
    ///
    /// Origins are drawn only from cells with capacity of at least 2, since a
    /// flow's volume is drawn from `1..capacity(origin)`.  Destinations are
    /// drawn independently from every road cell, so an origin may coincide
    /// with its own or another flow's destination.
    fn generate_flows(&mut self, now: Tick) -> SimResult<usize> {
        let target = self.config.target_flows();
        let current = self.flows.len();
        if current >= target {
            return Ok(0);
        }
        let needed = target - current;

        // check both pools before drawing so a failed tick leaves the RNG untouched
        for available in [self.grid.origin_cell_count(), self.grid.road_cell_count()] {
            if needed > available {
                return Err(GridError::InsufficientRoadCells { requested: needed, available }.into());
            }
        }

        let origins = self.grid.select_origins(needed)?;
        let destinations = self.grid.select_cells(needed)?;

        for (origin, destination) in origins.into_iter().zip(destinations) {
            let volume = self.grid.draw_volume(origin).ok_or(SimError::InvalidOrigin {
                origin,
                capacity: self.grid.capacity(origin),
            })?;
            let id = self.allocate_id();
            self.flows.push(Flow::new(id, origin, destination, volume, now));
        }
        Ok(needed)
    }

    fn rebuild_volume(&mut self) {
        self.grid
            .rebuild_volume(self.flows.iter().map(|f| (f.location, f.volume)));
    }

    fn allocate_id(&mut self) -> FlowId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    // ── Manual placement ──────────────────────────────────────────────────

    /// Place a flow between ticks.
    ///
    /// The same rules as generated flows apply: both cells must be on the
    /// grid, the destination must be a road, the origin needs capacity of at
    /// least 2, and `volume` must lie in `1..capacity(origin)`.
    ///
    /// The new flow's volume is added to the current volume matrix, so it
    /// occupies its origin when the next tick starts.  Every other cell keeps
    /// the occupancy the last tick left, including flows that retired in it.
    pub fn spawn_flow(&mut self, origin: GridPos, destination: GridPos, volume: u32) -> SimResult<FlowId> {
        for pos in [origin, destination] {
            if !self.grid.is_valid(pos) {
                return Err(SimError::OutOfBounds(pos));
            }
        }
        if self.grid.capacity(destination) == 0 {
            return Err(SimError::InvalidDestination { destination });
        }
        let capacity = self.grid.capacity(origin);
        if capacity < MIN_ORIGIN_CAPACITY {
            return Err(SimError::InvalidOrigin { origin, capacity });
        }
        if volume == 0 || volume >= capacity {
            return Err(SimError::InvalidVolume { volume, capacity });
        }

        let id = self.allocate_id();
        self.flows.push(Flow::new(id, origin, destination, volume, self.tick));
        self.grid.place_occupant(origin, volume);
        Ok(id)
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// The next tick to be processed.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn variant(&self) -> GridVariant {
        GridVariant::from_layers(self.directions.is_some(), self.weights.is_some())
    }

    #[inline]
    pub fn grid(&self) -> &CapacityGrid {
        &self.grid
    }

    #[inline]
    pub fn capacities(&self) -> &Matrix<u32> {
        self.grid.capacities()
    }

    /// Volume matrix as of the last rebuild.
    #[inline]
    pub fn volumes(&self) -> &Matrix<u32> {
        self.grid.volumes()
    }

    #[inline]
    pub fn directions(&self) -> Option<&DirectionGrid> {
        self.directions.as_ref()
    }

    #[inline]
    pub fn weights(&self) -> Option<&WeightGrid> {
        self.weights.as_ref()
    }

    /// Active flows in spawn order.
    #[inline]
    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    /// Number of flows created so far, generated or placed.
    #[inline]
    pub fn flows_spawned(&self) -> u64 {
        self.next_id.0
    }

    /// Snapshots of the active flows.
    pub fn flow_snapshots(&self) -> Vec<FlowSnapshot> {
        self.flows.iter().map(Flow::snapshot).collect()
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Hand the recorded history to the caller, leaving an empty one behind.
    pub fn take_history(&mut self) -> History {
        std::mem::take(&mut self.history)
    }
}
