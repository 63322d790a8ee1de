//! `tg-grid` — the cell grids the simulator steps over.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                      |
//! |-----------------|---------------------------------------------------------------|
//! | [`matrix`]      | `Matrix<T>`: dense row-major storage addressed by `GridPos`  |
//! | [`capacity`]    | `CapacityGrid`: static capacities, derived volumes, sampling |
//! | [`direction`]   | `DirectionGrid`: optional per-cell exit-direction masks      |
//! | [`weight`]      | `WeightGrid`: optional per-cell congestion-cost multipliers  |
//! | [`error`]       | `GridError`, `GridResult<T>`                                  |
//!
//! # Layering
//!
//! `CapacityGrid` is always present.  `DirectionGrid` and `WeightGrid` are
//! independent capabilities laid over it: the simulator holds each as an
//! `Option` and its move policy consults whichever are present.  Neither
//! layer references the capacity grid after construction.

pub mod capacity;
pub mod direction;
pub mod error;
pub mod matrix;
pub mod weight;


pub use capacity::{CapacityGrid, MIN_ORIGIN_CAPACITY};
pub use direction::DirectionGrid;
pub use error::{GridError, GridResult};
pub use matrix::Matrix;
pub use weight::WeightGrid;
