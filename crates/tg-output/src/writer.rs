//! The `OutputWriter` trait implemented by backend writers.

use crate::{FlowRow, OutputResult, TickSummaryRow, VolumeRow};

/// Sink for per-tick run output.
///
/// Errors are returned to the caller; [`SimOutputObserver`][crate::SimOutputObserver]
/// stores the first one for retrieval with `take_error`.
pub trait OutputWriter {
    /// Write the occupied cells of one tick's volume matrix.
    fn write_volumes(&mut self, rows: &[VolumeRow]) -> OutputResult<()>;

    /// Write one tick's flow snapshots.
    fn write_flows(&mut self, rows: &[FlowRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
