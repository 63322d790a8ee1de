//! `tg-sim` — lock-step tick engine for the `traffic_grid` simulator.
//!
//! # Five-phase tick
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Generate — sample origins/destinations until the active flow count
//!                reaches round(rows * cols * density).
//!   ② Step     — every flow: rebuild 5 candidates, prune off-grid / full /
//!                direction-forbidden ones against PRE-TICK volume, scale by
//!                weight if weighted, commit the cheapest (first wins ties).
//!   ③ Rebuild  — zero the volume matrix, re-add every flow.
//!   ④ Retire   — drop flows standing on their destination.
//!   ⑤ Record   — append (flow snapshots, volume matrix) to History.
//! ```
//!
//! # Grid variants
//!
//! | Variant              | Layers present                    |
//! |----------------------|-----------------------------------|
//! | `Plain`              | capacity only                     |
//! | `Weighted`           | capacity + `WeightGrid`           |
//! | `Directed`           | capacity + `DirectionGrid`        |
//! | `DirectedWeighted`   | capacity + both                   |
//!
//! Variants differ only in phase ②; see [`policy`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tg_core::SimConfig;
//! use tg_grid::Matrix;
//! use tg_sim::{NoopObserver, SimBuilder};
//!
//! let mut layout = Matrix::new(10, 10);
//! layout.fill_col(5, 4)?;
//! let mut sim = SimBuilder::new(config, layout).weighted(true).build()?;
//! sim.run(&mut NoopObserver)?;
//! for entry in sim.history() { /* render entry.volume */ }
//! ```

pub mod builder;
pub mod error;
pub mod history;
pub mod observer;
pub mod policy;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use history::{History, HistoryEntry};
pub use observer::{NoopObserver, SimObserver};
pub use policy::{GridVariant, MovePolicy};
pub use report::TickReport;
pub use sim::Sim;
