//! `tg-output` — run output and congestion statistics for `traffic_grid`.
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`stats`]    | `full_cells`, `over_capacity_cells`, `history_full_cells`       |
//! | [`row`]      | Plain row types handed to writers                               |
//! | [`writer`]   | The `OutputWriter` trait                                        |
//! | [`csv`]      | `CsvWriter`: `volume_snapshots.csv`, `flow_snapshots.csv`, `tick_summaries.csv` |
//! | [`observer`] | `SimOutputObserver`, which implements `tg_sim::SimObserver`     |
//!
//! # Usage
//!
//! ```rust,ignore
//! use tg_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod stats;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{FlowRow, TickSummaryRow, VolumeRow};
pub use stats::{full_cells, history_full_cells, over_capacity_cells};
pub use writer::OutputWriter;
