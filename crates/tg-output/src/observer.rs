//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use tg_core::Tick;
use tg_grid::Matrix;
use tg_sim::{HistoryEntry, SimObserver, TickReport};

use crate::row::{FlowRow, TickSummaryRow, VolumeRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, full_cells, over_capacity_cells};

/// A [`SimObserver`] that writes every recorded tick to an [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer: W,

    /// Congestion of the entry recorded this tick, written with the summary.
    pending_full: usize,
    pending_over: usize,

    /// Running full-cell total across all recorded ticks.
    total_full: usize,

    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending_full: 0,
            pending_over: 0,
            total_full:   0,
            last_error:   None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Full cells summed over every tick seen so far.
    pub fn total_full_cells(&self) -> usize {
        self.total_full
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_record(&mut self, entry: &HistoryEntry, capacity: &Matrix<u32>) {
        let tick = entry.tick.0;

        self.pending_full = full_cells(capacity, &entry.volume);
        self.pending_over = over_capacity_cells(capacity, &entry.volume);
        self.total_full += self.pending_full;

        let volumes: Vec<VolumeRow> = entry
            .volume
            .iter()
            .filter(|&(_, &v)| v > 0)
            .map(|(pos, &volume)| VolumeRow {
                tick,
                row: pos.row,
                col: pos.col,
                capacity: capacity[pos],
                volume,
            })
            .collect();
        if !volumes.is_empty() {
            let result = self.writer.write_volumes(&volumes);
            self.store_err(result);
        }

        let flows: Vec<FlowRow> = entry
            .flows
            .iter()
            .map(|s| FlowRow::from_snapshot(tick, s))
            .collect();
        if !flows.is_empty() {
            let result = self.writer.write_flows(&flows);
            self.store_err(result);
        }
    }

    fn on_tick_end(&mut self, report: &TickReport) {
        let row = TickSummaryRow::from_report(report, self.pending_full, self.pending_over);
        self.pending_full = 0;
        self.pending_over = 0;
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
