//! Plain data row types written by output backends.

use tg_flow::FlowSnapshot;
use tg_sim::TickReport;

/// One occupied cell of a volume matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRow {
    pub tick:     u64,
    pub row:      i32,
    pub col:      i32,
    pub capacity: u32,
    pub volume:   u32,
}

/// One flow as recorded at the end of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowRow {
    pub tick:     u64,
    pub flow_id:  u64,
    pub row:      i32,
    pub col:      i32,
    pub prev_row: i32,
    pub prev_col: i32,
    pub dest_row: i32,
    pub dest_col: i32,
    pub volume:   u32,
    pub arrived:  bool,
}

impl FlowRow {
    pub fn from_snapshot(tick: u64, s: &FlowSnapshot) -> Self {
        Self {
            tick,
            flow_id:  s.id.0,
            row:      s.location.row,
            col:      s.location.col,
            prev_row: s.previous.row,
            prev_col: s.previous.col,
            dest_row: s.destination.row,
            dest_col: s.destination.col,
            volume:   s.volume,
            arrived:  s.arrived,
        }
    }
}

/// Counts for one tick, plus the congestion of its rebuilt volume matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:                u64,
    pub spawned:             u64,
    pub moved:               u64,
    pub stayed:              u64,
    pub gridlocked:          u64,
    pub retired:             u64,
    pub active:              u64,
    pub full_cells:          u64,
    pub over_capacity_cells: u64,
}

impl TickSummaryRow {
    pub fn from_report(report: &TickReport, full_cells: usize, over_capacity_cells: usize) -> Self {
        Self {
            tick:                report.tick.0,
            spawned:             report.spawned as u64,
            moved:               report.moved as u64,
            stayed:              report.stayed as u64,
            gridlocked:          report.gridlock_count() as u64,
            retired:             report.retired as u64,
            active:              report.active as u64,
            full_cells:          full_cells as u64,
            over_capacity_cells: over_capacity_cells as u64,
        }
    }
}
