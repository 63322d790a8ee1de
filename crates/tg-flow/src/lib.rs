//! `tg-flow` — routed batches of vehicles.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`moves`]     | `CandidateMoves`: the fixed five-slot candidate table          |
//! | [`flow`]      | `Flow`: location, destination, volume; `MoveOutcome`           |
//! | [`snapshot`]  | `FlowSnapshot`: immutable per-tick copy for history and output |
//!
//! # Movement model
//!
//! Each tick a flow considers exactly five cells: the four axis-aligned
//! neighbours and its own cell.  Every candidate is costed by straight-line
//! distance to the destination.  The simulator then prunes candidates that
//! are off-grid, full, or direction-restricted, optionally rescales the
//! survivors' costs, and the flow commits to the cheapest survivor.  Ties go
//! to the earliest candidate in the fixed order
//! `up, stay, down, left, right`.
//!
//! If every candidate is pruned the flow is *gridlocked*: it holds its
//! position for the tick.  Gridlock is an outcome, not an error.

pub mod flow;
pub mod moves;
pub mod snapshot;


pub use flow::{Flow, MoveOutcome};
pub use moves::{Candidate, CandidateMoves, MOVE_OFFSETS, STAY_SLOT};
pub use snapshot::FlowSnapshot;
