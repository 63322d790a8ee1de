//! Integration tests for tg-sim.

use std::collections::HashSet;

use tg_core::{DirectionMask, FlowId, GridPos, SimConfig, Tick};
use tg_grid::{DirectionGrid, GridError, Matrix};

use crate::{GridVariant, HistoryEntry, NoopObserver, Sim, SimBuilder, SimError, SimObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pos(row: i32, col: i32) -> GridPos {
    GridPos::new(row, col)
}

fn config(rows: usize, cols: usize, density: f64, seed: u64) -> SimConfig {
    SimConfig { rows, cols, density, seed, total_ticks: 20 }
}

/// A density whose target rounds to zero flows, so only manually placed
/// flows exist.
fn quiet_config(rows: usize, cols: usize) -> SimConfig {
    config(rows, cols, 0.4 / (rows * cols) as f64, 1)
}

fn uniform(rows: usize, cols: usize, capacity: u32) -> Matrix<u32> {
    Matrix::filled(rows, cols, capacity)
}

fn layout(rows: Vec<Vec<u32>>) -> Matrix<u32> {
    Matrix::from_rows(rows).unwrap()
}

/// The 10×10 reference city: columns 2 and 8 are narrow roads, row 3 a
/// medium road, column 5 a wide avenue.  37 road cells, all able to host
/// flows.
fn reference_layout() -> Matrix<u32> {
    let mut m = Matrix::new(10, 10);
    m.fill_col(2, 2).unwrap();
    m.fill_col(8, 2).unwrap();
    m.fill_row(3, 3).unwrap();
    m.fill_col(5, 4).unwrap();
    m
}

fn quiet_sim(capacity: Matrix<u32>) -> Sim {
    let (rows, cols) = capacity.shape();
    SimBuilder::new(quiet_config(rows, cols), capacity).build().unwrap()
}

/// Step `sim` until flow `id` retires (or `max_ticks` pass) and return the
/// cells it occupied after each tick.
fn path_of(sim: &mut Sim, id: FlowId, max_ticks: usize) -> Vec<GridPos> {
    let mut path = vec![];
    for _ in 0..max_ticks {
        sim.step().unwrap();
        let entry = sim.history().last().unwrap();
        let Some(flow) = entry.flows.iter().find(|f| f.id == id) else {
            break;
        };
        path.push(flow.location);
        if flow.arrived {
            break;
        }
    }
    path
}

/// Volume matrix recomputed from an entry's flows.
fn volume_from_flows(entry: &HistoryEntry) -> Matrix<u32> {
    let (rows, cols) = entry.volume.shape();
    let mut m = Matrix::new(rows, cols);
    for f in &entry.flows {
        m[f.location] += f.volume;
    }
    m
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(config(10, 10, 0.1, 1), reference_layout())
            .build()
            .unwrap();
        assert_eq!(sim.variant(), GridVariant::Plain);
        assert_eq!(sim.current_tick(), Tick::ZERO);
        assert!(sim.flows().is_empty());
        assert!(sim.history().is_empty());
        assert!(sim.weights().is_none());
        assert!(sim.directions().is_none());
    }

    #[test]
    fn layout_shape_mismatch_errors() {
        let result = SimBuilder::new(config(10, 10, 0.1, 1), uniform(10, 9, 3)).build();
        assert!(matches!(
            result,
            Err(SimError::Grid(GridError::DimensionMismatch { got_cols: 9, .. }))
        ));
    }

    #[test]
    fn direction_shape_mismatch_errors() {
        let result = SimBuilder::new(config(10, 10, 0.1, 1), reference_layout())
            .directions(DirectionGrid::new(9, 10))
            .build();
        assert!(matches!(result, Err(SimError::Grid(GridError::DimensionMismatch { .. }))));
    }

    #[test]
    fn bad_density_fails_fast() {
        let result = SimBuilder::new(config(10, 10, 0.0, 1), reference_layout()).build();
        assert!(matches!(result, Err(SimError::Core(_))));
        let result = SimBuilder::new(config(10, 10, 1.2, 1), reference_layout()).build();
        assert!(matches!(result, Err(SimError::Core(_))));
    }

    #[test]
    fn weighted_derives_inverse_capacity_weights() {
        let sim = SimBuilder::new(config(10, 10, 0.1, 1), reference_layout())
            .weighted(true)
            .build()
            .unwrap();
        let w = sim.weights().unwrap();
        assert_eq!(w.weight(pos(0, 5)), 0.2);
        assert_eq!(w.weight(pos(0, 0)), 1.0);
        assert_eq!(sim.variant(), GridVariant::Weighted);
    }

    #[test]
    fn both_layers_compose() {
        let sim = SimBuilder::new(config(10, 10, 0.1, 1), reference_layout())
            .directions(DirectionGrid::new(10, 10))
            .weighted(true)
            .build()
            .unwrap();
        assert_eq!(sim.variant(), GridVariant::DirectedWeighted);
        assert!(sim.variant().is_directed() && sim.variant().is_weighted());
    }
}

// ── Manual placement ──────────────────────────────────────────────────────────

#[cfg(test)]
mod spawn_tests {
    use super::*;

    #[test]
    fn spawn_occupies_origin_immediately() {
        let mut sim = quiet_sim(uniform(2, 2, 5));
        let id = sim.spawn_flow(pos(0, 0), pos(1, 1), 3).unwrap();
        assert_eq!(id, FlowId(0));
        assert_eq!(sim.volumes()[pos(0, 0)], 3);
        assert_eq!(sim.flows().len(), 1);
        assert_eq!(sim.spawn_flow(pos(1, 1), pos(0, 0), 1).unwrap(), FlowId(1));
        assert_eq!(sim.flows_spawned(), 2);
    }

    #[test]
    fn spawn_outside_grid_rejected() {
        let mut sim = quiet_sim(uniform(2, 2, 5));
        assert!(matches!(sim.spawn_flow(pos(2, 0), pos(0, 0), 1), Err(SimError::OutOfBounds(_))));
        assert!(matches!(sim.spawn_flow(pos(0, 0), pos(0, -1), 1), Err(SimError::OutOfBounds(_))));
    }

    #[test]
    fn spawn_on_narrow_cell_is_invalid_origin() {
        let mut sim = quiet_sim(layout(vec![vec![1, 0, 4]]));
        assert!(matches!(
            sim.spawn_flow(pos(0, 0), pos(0, 2), 1),
            Err(SimError::InvalidOrigin { capacity: 1, .. })
        ));
        assert!(matches!(
            sim.spawn_flow(pos(0, 1), pos(0, 2), 1),
            Err(SimError::InvalidOrigin { capacity: 0, .. })
        ));
    }

    #[test]
    fn spawn_toward_roadless_cell_rejected() {
        let mut sim = quiet_sim(layout(vec![vec![5, 5, 0]]));
        assert!(matches!(
            sim.spawn_flow(pos(0, 0), pos(0, 2), 1),
            Err(SimError::InvalidDestination { destination }) if destination == pos(0, 2)
        ));
        assert!(sim.flows().is_empty());
        assert_eq!(sim.flows_spawned(), 0);
        assert!(sim.volumes().as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn placement_keeps_occupancy_of_retired_flows() {
        // two stationary blockers fill (0,1) and retire in the first tick;
        // the volume they leave behind still blocks the mover in the second
        fn blocked_sim() -> (Sim, FlowId) {
            let mut sim = quiet_sim(layout(vec![vec![5, 2, 5, 5, 5]]));
            sim.spawn_flow(pos(0, 1), pos(0, 1), 1).unwrap();
            sim.spawn_flow(pos(0, 1), pos(0, 1), 1).unwrap();
            let mover = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
            (sim, mover)
        }
        fn location(sim: &Sim, id: FlowId) -> GridPos {
            sim.flows().iter().find(|f| f.id == id).unwrap().location
        }

        let (mut untouched, mover) = blocked_sim();
        untouched.step().unwrap();
        untouched.step().unwrap();

        let (mut placed, mover_b) = blocked_sim();
        placed.step().unwrap();
        placed.spawn_flow(pos(0, 4), pos(0, 3), 1).unwrap();
        assert_eq!(placed.volumes()[pos(0, 1)], 2);
        assert_eq!(placed.volumes()[pos(0, 4)], 1);
        placed.step().unwrap();

        assert_eq!(location(&untouched, mover), pos(0, 0));
        assert_eq!(location(&placed, mover_b), pos(0, 0));
    }

    #[test]
    fn spawn_volume_must_fit_below_capacity() {
        let mut sim = quiet_sim(layout(vec![vec![4, 4]]));
        assert!(matches!(sim.spawn_flow(pos(0, 0), pos(0, 1), 0), Err(SimError::InvalidVolume { .. })));
        assert!(matches!(sim.spawn_flow(pos(0, 0), pos(0, 1), 4), Err(SimError::InvalidVolume { .. })));
        assert!(sim.spawn_flow(pos(0, 0), pos(0, 1), 3).is_ok());
    }
}

// ── Movement ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn straight_line_takes_three_ticks() {
        let mut sim = quiet_sim(uniform(1, 4, 5));
        let id = sim.spawn_flow(pos(0, 0), pos(0, 3), 1).unwrap();
        let path = path_of(&mut sim, id, 10);
        assert_eq!(path, vec![pos(0, 1), pos(0, 2), pos(0, 3)]);
        assert_eq!(sim.history().len(), 3);
    }

    #[test]
    fn arrived_flow_absent_from_next_snapshot() {
        let mut sim = quiet_sim(uniform(1, 4, 5));
        sim.spawn_flow(pos(0, 0), pos(0, 3), 1).unwrap();
        sim.run_ticks(3, &mut NoopObserver).unwrap();

        let last = sim.history().last().unwrap();
        assert!(last.flows[0].arrived);
        assert_eq!(last.active_flows().count(), 0);
        assert!(sim.flows().is_empty());

        let report = sim.step().unwrap();
        assert_eq!(report.retired, 0);
        assert!(sim.history().last().unwrap().flows.is_empty());
        assert!(sim.volumes().as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn same_cell_flow_completes_at_once() {
        let mut sim = quiet_sim(uniform(2, 2, 5));
        sim.spawn_flow(pos(1, 0), pos(1, 0), 2).unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.retired, 1);
        assert_eq!(report.stayed, 1);
        let entry = sim.history().last().unwrap();
        assert_eq!(entry.flows[0].location, pos(1, 0));
        assert!(entry.flows[0].arrived);
    }

    #[test]
    fn full_cell_blocks_entry_until_it_drains() {
        let mut sim = quiet_sim(layout(vec![vec![5, 2, 5]]));
        // two stationary blockers fill (0,1) and retire during the first tick
        sim.spawn_flow(pos(0, 1), pos(0, 1), 1).unwrap();
        sim.spawn_flow(pos(0, 1), pos(0, 1), 1).unwrap();
        let id = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
        assert!(sim.grid().is_full(pos(0, 1)));

        let path = path_of(&mut sim, id, 10);
        // tick 0 reads the spawned blockers; tick 1 reads the volume rebuilt
        // before they retired; tick 2 finds the cell empty
        assert_eq!(path, vec![pos(0, 0), pos(0, 0), pos(0, 1), pos(0, 2)]);
    }

    #[test]
    fn same_tick_convergence_can_exceed_capacity() {
        let mut sim = quiet_sim(layout(vec![vec![5, 2, 5]]));
        sim.spawn_flow(pos(0, 0), pos(0, 2), 2).unwrap();
        sim.spawn_flow(pos(0, 2), pos(0, 0), 2).unwrap();

        let report = sim.step().unwrap();
        assert_eq!(report.moved, 2);
        assert_eq!(sim.volumes()[pos(0, 1)], 4);
        assert!(sim.volumes()[pos(0, 1)] > sim.capacities()[pos(0, 1)]);
    }

    #[test]
    fn gridlocked_flows_hold_position() {
        // (0,0) holds both flows and is full; (0,1) has no road
        let mut sim = quiet_sim(layout(vec![vec![2, 0, 3]]));
        let a = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
        let b = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();

        for _ in 0..3 {
            let report = sim.step().unwrap();
            assert_eq!(report.gridlocked, vec![a, b]);
            assert_eq!(report.moved, 0);
            assert_eq!(report.active, 2);
        }
        assert!(sim.flows().iter().all(|f| f.location == pos(0, 0)));
        assert_eq!(sim.volumes()[pos(0, 0)], 2);
    }

    #[test]
    fn greedy_flow_waits_beside_a_roadless_cell() {
        // the direct route crosses a road-less cell; the detour costs more
        // than standing still, so the flow never leaves its origin
        let mut sim = quiet_sim(layout(vec![vec![3, 0, 3], vec![3, 3, 3]]));
        let id = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
        assert_eq!(path_of(&mut sim, id, 4), vec![pos(0, 0); 4]);
        assert!(sim.history().iter().all(|e| e.volume[pos(0, 1)] == 0));
    }
}

// ── Directed variant ──────────────────────────────────────────────────────────

#[cfg(test)]
mod directed {
    use super::*;

    const NO_UP: (bool, bool, bool, bool) = (false, true, true, true);

    fn directed_sim(directions: DirectionGrid) -> Sim {
        SimBuilder::new(quiet_config(3, 3), uniform(3, 3, 5))
            .directions(directions)
            .build()
            .unwrap()
    }

    #[test]
    fn blocked_minimum_falls_to_best_legal_move() {
        let mut plain = quiet_sim(uniform(3, 3, 5));
        let id = plain.spawn_flow(pos(1, 1), pos(0, 0), 1).unwrap();
        // up and left tie; up is generated first
        assert_eq!(path_of(&mut plain, id, 1), vec![pos(0, 1)]);

        let mut directions = DirectionGrid::new(3, 3);
        directions.set_direction(pos(1, 1), NO_UP).unwrap();
        let mut sim = directed_sim(directions);
        let id = sim.spawn_flow(pos(1, 1), pos(0, 0), 1).unwrap();
        assert_eq!(path_of(&mut sim, id, 10), vec![pos(1, 0), pos(0, 0)]);
        assert_eq!(sim.variant(), GridVariant::Directed);
    }

    #[test]
    fn target_cell_mask_is_ignored() {
        let mut directions = DirectionGrid::new(3, 3);
        directions.set_direction(pos(0, 1), DirectionMask::NONE).unwrap();
        let mut sim = directed_sim(directions);
        let id = sim.spawn_flow(pos(1, 1), pos(0, 1), 1).unwrap();
        assert_eq!(path_of(&mut sim, id, 10), vec![pos(0, 1)]);
    }

    #[test]
    fn fully_masked_cell_still_allows_staying() {
        let mut directions = DirectionGrid::new(3, 3);
        directions.set_direction(pos(1, 1), DirectionMask::NONE).unwrap();
        let mut sim = directed_sim(directions);
        sim.spawn_flow(pos(1, 1), pos(0, 0), 1).unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.stayed, 1);
        assert!(report.gridlocked.is_empty());
        assert_eq!(sim.flows()[0].location, pos(1, 1));
    }

    #[test]
    fn one_way_row_is_respected_over_a_run() {
        let mut directions = DirectionGrid::new(10, 10);
        directions.set_row(3, (true, true, false, true)).unwrap();
        directions.set_col(5, NO_UP).unwrap();
        let mut sim = SimBuilder::new(config(10, 10, 0.1, 21), reference_layout())
            .directions(directions.clone())
            .build()
            .unwrap();
        sim.run_ticks(60, &mut NoopObserver).unwrap();

        for entry in sim.history() {
            for f in entry.flows.iter().filter(|f| f.moved()) {
                assert!(
                    directions.permits(f.previous, f.location),
                    "{} moved {} -> {} against its mask",
                    f.id, f.previous, f.location
                );
            }
        }
    }
}

// ── Weighted variant ──────────────────────────────────────────────────────────

#[cfg(test)]
mod weighted {
    use super::*;

    /// 3×4 grid of wide (10) roads with two narrow (2) cells on the direct
    /// route from (1,0) to (1,3).
    fn narrow_gap() -> Matrix<u32> {
        let mut m = uniform(3, 4, 10);
        m.set(pos(1, 0), 2).unwrap();
        m.set(pos(1, 1), 2).unwrap();
        m
    }

    #[test]
    fn weighted_routes_around_narrow_cell() {
        let mut plain = SimBuilder::new(quiet_config(3, 4), narrow_gap()).build().unwrap();
        let id = plain.spawn_flow(pos(1, 0), pos(1, 3), 1).unwrap();
        let plain_path = path_of(&mut plain, id, 20);
        assert_eq!(plain_path, vec![pos(1, 1), pos(1, 2), pos(1, 3)]);

        let mut weighted = SimBuilder::new(quiet_config(3, 4), narrow_gap())
            .weighted(true)
            .build()
            .unwrap();
        let id = weighted.spawn_flow(pos(1, 0), pos(1, 3), 1).unwrap();
        let weighted_path = path_of(&mut weighted, id, 20);
        assert_eq!(
            weighted_path,
            vec![pos(0, 0), pos(0, 1), pos(0, 2), pos(1, 2), pos(1, 3)]
        );
        assert!(!weighted_path.contains(&pos(1, 1)));
    }

    #[test]
    fn waiting_on_a_wide_road_can_beat_a_narrow_step() {
        // staying costs 2 * 1/10, entering the narrow cell 1 * 1/3
        let mut sim = SimBuilder::new(quiet_config(1, 3), layout(vec![vec![9, 2, 9]]))
            .weighted(true)
            .build()
            .unwrap();
        let id = sim.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
        assert_eq!(path_of(&mut sim, id, 3), vec![pos(0, 0); 3]);

        let mut plain = quiet_sim(layout(vec![vec![9, 2, 9]]));
        let id = plain.spawn_flow(pos(0, 0), pos(0, 2), 1).unwrap();
        assert_eq!(path_of(&mut plain, id, 3), vec![pos(0, 1), pos(0, 2)]);
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generation {
    use super::*;

    fn reference_sim(seed: u64) -> Sim {
        SimBuilder::new(config(10, 10, 0.1, seed), reference_layout())
            .build()
            .unwrap()
    }

    #[test]
    fn tops_up_to_target_each_tick() {
        let mut sim = reference_sim(7);
        let mut reports: Vec<TickReport> = vec![];
        for _ in 0..30 {
            reports.push(sim.step().unwrap());
        }
        assert_eq!(reports[0].spawned, 10);
        for pair in reports.windows(2) {
            assert_eq!(pair[1].spawned, pair[0].retired);
        }
        for r in &reports {
            assert_eq!(r.active + r.retired, 10);
        }
    }

    #[test]
    fn generated_flows_follow_origin_rules() {
        let mut sim = reference_sim(3);
        sim.run_ticks(40, &mut NoopObserver).unwrap();
        let capacity = sim.capacities().clone();

        let mut seen = HashSet::new();
        for entry in sim.history() {
            for f in &entry.flows {
                if seen.insert(f.id) {
                    // `previous` is the origin on a flow's first tick
                    let origin_capacity = capacity[f.previous];
                    assert!(origin_capacity >= 2);
                    assert!(f.volume >= 1 && f.volume < origin_capacity);
                    assert!(capacity[f.destination] > 0);
                }
            }
        }
        assert!(seen.len() >= 10);
    }

    #[test]
    fn capacity_one_cells_never_host_origins() {
        let mut sim = SimBuilder::new(config(1, 4, 0.25, 5), layout(vec![vec![1, 1, 3, 1]]))
            .build()
            .unwrap();
        sim.run_ticks(25, &mut NoopObserver).unwrap();

        let mut seen = HashSet::new();
        for entry in sim.history() {
            for f in &entry.flows {
                if seen.insert(f.id) {
                    assert_eq!(f.previous, pos(0, 2));
                    assert!((1..3).contains(&f.volume));
                }
            }
        }
        assert!(!seen.is_empty());
    }

    #[test]
    fn insufficient_road_cells_surface_to_caller() {
        let mut sim = SimBuilder::new(config(10, 10, 0.5, 1), reference_layout())
            .build()
            .unwrap();
        let err = sim.step().unwrap_err();
        assert!(matches!(
            err,
            SimError::Grid(GridError::InsufficientRoadCells { requested: 50, available: 37 })
        ));
        assert!(sim.history().is_empty());
        assert_eq!(sim.current_tick(), Tick::ZERO);
    }

    #[test]
    fn failed_tick_leaves_random_stream_untouched() {
        let mut retried = SimBuilder::new(config(10, 10, 0.5, 9), reference_layout())
            .build()
            .unwrap();
        assert!(retried.step().is_err());
        retried.config.density = 0.1;
        retried.run_ticks(10, &mut NoopObserver).unwrap();

        let mut fresh = SimBuilder::new(config(10, 10, 0.1, 9), reference_layout())
            .build()
            .unwrap();
        fresh.run_ticks(10, &mut NoopObserver).unwrap();

        assert_eq!(retried.history(), fresh.history());
    }

    #[test]
    fn flow_ids_are_unique_and_increasing() {
        let mut sim = reference_sim(11);
        sim.run_ticks(30, &mut NoopObserver).unwrap();
        let mut last = None;
        for f in sim.flows() {
            assert!(last.is_none_or(|l| f.id > l));
            last = Some(f.id);
        }
    }
}

// ── Whole-run invariants ──────────────────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    fn run(seed: u64, weighted: bool, ticks: u64) -> Sim {
        let mut sim = SimBuilder::new(config(10, 10, 0.1, seed), reference_layout())
            .weighted(weighted)
            .build()
            .unwrap();
        sim.run_ticks(ticks, &mut NoopObserver).unwrap();
        sim
    }

    #[test]
    fn volume_matches_flows_every_tick() {
        for weighted in [false, true] {
            let sim = run(7, weighted, 60);
            for entry in sim.history() {
                assert_eq!(volume_from_flows(entry), entry.volume, "tick {}", entry.tick);
            }
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let a = run(42, false, 50);
        let b = run(42, false, 50);
        assert_eq!(a.history(), b.history());

        let a = run(42, true, 50);
        let b = run(42, true, 50);
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn different_seeds_diverge() {
        let a = run(1, false, 10);
        let b = run(2, false, 10);
        assert_ne!(a.history(), b.history());
    }

    #[test]
    fn moves_never_enter_cells_full_at_tick_start() {
        let sim = run(13, false, 80);
        let capacity = sim.capacities();
        let mut pre_tick = Matrix::new(10, 10);

        for entry in sim.history() {
            for f in entry.flows.iter().filter(|f| f.moved()) {
                assert_eq!(f.previous.manhattan(f.location), 1);
                assert!(
                    pre_tick[f.location] < capacity[f.location],
                    "{} entered full cell {} at {}",
                    f.id, f.location, entry.tick
                );
            }
            pre_tick = entry.volume.clone();
        }
    }

    #[test]
    fn history_ticks_are_consecutive() {
        let sim = run(5, false, 15);
        let ticks: Vec<u64> = sim.history().iter().map(|e| e.tick.0).collect();
        assert_eq!(ticks, (0..15).collect::<Vec<_>>());
    }
}

// ── Runner and observer ───────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts:     Vec<Tick>,
        records:    usize,
        reports:    usize,
        end_calls:  usize,
        final_tick: Option<Tick>,
    }

    impl SimObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }

        fn on_record(&mut self, entry: &HistoryEntry, capacity: &Matrix<u32>) {
            assert_eq!(entry.volume.shape(), capacity.shape());
            self.records += 1;
        }

        fn on_tick_end(&mut self, _report: &TickReport) {
            self.reports += 1;
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.end_calls += 1;
            self.final_tick = Some(final_tick);
        }
    }

    #[test]
    fn run_covers_configured_ticks() {
        let mut sim = SimBuilder::new(config(10, 10, 0.1, 3), reference_layout())
            .build()
            .unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.starts.len(), 20);
        assert_eq!(obs.starts[0], Tick(0));
        assert_eq!(obs.records, 20);
        assert_eq!(obs.reports, 20);
        assert_eq!(obs.end_calls, 1);
        assert_eq!(obs.final_tick, Some(Tick(20)));
        assert_eq!(sim.history().len(), 20);
    }

    #[test]
    fn run_resumes_from_current_tick() {
        let mut sim = SimBuilder::new(config(10, 10, 0.1, 3), reference_layout())
            .build()
            .unwrap();
        sim.run_ticks(5, &mut NoopObserver).unwrap();
        let mut obs = Recorder::default();
        sim.run(&mut obs).unwrap();
        assert_eq!(obs.starts.first(), Some(&Tick(5)));
        assert_eq!(sim.history().len(), 20);
    }

    #[test]
    fn history_is_restartable_and_indexable() {
        let mut sim = SimBuilder::new(config(10, 10, 0.1, 3), reference_layout())
            .build()
            .unwrap();
        sim.run_ticks(8, &mut NoopObserver).unwrap();
        let history = sim.history();
        assert_eq!(history.iter().count(), 8);
        assert_eq!(history.iter().count(), 8);
        assert_eq!(history.get(3).unwrap().tick, Tick(3));
        assert!(history.get(8).is_none());

        let taken = sim.take_history();
        assert_eq!(taken.len(), 8);
        assert!(sim.history().is_empty());
        assert_eq!(taken.into_iter().last().unwrap().tick, Tick(7));
    }
}

// ── MovePolicy ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use tg_core::SimRng;
    use tg_flow::Flow;
    use tg_grid::{CapacityGrid, WeightGrid};

    use super::*;
    use crate::MovePolicy;

    #[test]
    fn admits_checks_bounds_fullness_and_mask() {
        let mut grid = CapacityGrid::new(layout(vec![vec![3, 1, 0]]), SimRng::new(1));
        grid.rebuild_volume([(pos(0, 1), 1)]);
        let policy = MovePolicy::new(&grid, None, None);
        assert!(policy.admits(pos(0, 0), pos(0, 0)));
        assert!(!policy.admits(pos(0, 0), pos(0, 1)));
        assert!(!policy.admits(pos(0, 1), pos(0, 2)));
        assert!(!policy.admits(pos(0, 0), pos(-1, 0)));

        let mut directions = DirectionGrid::new(1, 3);
        directions.set_direction(pos(0, 1), (true, true, false, true)).unwrap();
        let policy = MovePolicy::new(&grid, Some(&directions), None);
        assert!(!policy.admits(pos(0, 1), pos(0, 0)));
        assert!(policy.admits(pos(0, 0), pos(0, 0)));
    }

    #[test]
    fn weights_scale_surviving_costs() {
        let grid = CapacityGrid::new(layout(vec![vec![3, 3, 1]]), SimRng::new(1));
        let weights = WeightGrid::from_capacities(grid.capacities());
        let policy = MovePolicy::new(&grid, None, Some(&weights));
        assert_eq!(policy.variant(), GridVariant::Weighted);

        let mut flow = Flow::new(FlowId(0), pos(0, 1), pos(0, 2), 1, Tick::ZERO);
        flow.renew_moves();
        policy.prune(&mut flow);

        assert_eq!(flow.moves().len(), 3);
        assert_eq!(flow.cost(pos(0, 0)), Some(0.5));
        assert_eq!(flow.cost(pos(0, 1)), Some(0.25));
        assert_eq!(flow.cost(pos(0, 2)), Some(0.0));
        assert_eq!(flow.cost(pos(-1, 1)), None);
    }
}
