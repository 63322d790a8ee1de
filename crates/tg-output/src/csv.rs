//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `volume_snapshots.csv`: occupied cells per tick
//! - `flow_snapshots.csv`: every recorded flow per tick
//! - `tick_summaries.csv`: one row per tick

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{FlowRow, OutputResult, TickSummaryRow, VolumeRow};

pub const VOLUME_HEADER: [&str; 5] = ["tick", "row", "col", "capacity", "volume"];

pub const FLOW_HEADER: [&str; 10] = [
    "tick", "flow_id", "row", "col", "prev_row", "prev_col", "dest_row", "dest_col", "volume", "arrived",
];

pub const SUMMARY_HEADER: [&str; 9] = [
    "tick", "spawned", "moved", "stayed", "gridlocked", "retired", "active", "full_cells", "over_capacity_cells",
];

/// Writes run output to three CSV files.
pub struct CsvWriter {
    volumes:   Writer<File>,
    flows:     Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open the three CSV files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut volumes = Writer::from_path(dir.join("volume_snapshots.csv"))?;
        volumes.write_record(VOLUME_HEADER)?;

        let mut flows = Writer::from_path(dir.join("flow_snapshots.csv"))?;
        flows.write_record(FLOW_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            volumes,
            flows,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_volumes(&mut self, rows: &[VolumeRow]) -> OutputResult<()> {
        for row in rows {
            self.volumes.write_record(&[
                row.tick.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.capacity.to_string(),
                row.volume.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_flows(&mut self, rows: &[FlowRow]) -> OutputResult<()> {
        for row in rows {
            self.flows.write_record(&[
                row.tick.to_string(),
                row.flow_id.to_string(),
                row.row.to_string(),
                row.col.to_string(),
                row.prev_row.to_string(),
                row.prev_col.to_string(),
                row.dest_row.to_string(),
                row.dest_col.to_string(),
                row.volume.to_string(),
                (row.arrived as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.spawned.to_string(),
            row.moved.to_string(),
            row.stayed.to_string(),
            row.gridlocked.to_string(),
            row.retired.to_string(),
            row.active.to_string(),
            row.full_cells.to_string(),
            row.over_capacity_cells.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.volumes.flush()?;
        self.flows.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
