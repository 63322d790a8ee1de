//! `tg-core` — foundational types for the `traffic_grid` simulator.
//!
//! This crate is a dependency of every other `tg-*` crate.  It has no `tg-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`pos`]    | `GridPos`, `Direction`, `DirectionMask`                |
//! | [`ids`]    | `FlowId`                                               |
//! | [`time`]   | `Tick`, `SimConfig`                                    |
//! | [`rng`]    | `SimRng` (seeded, owned by the capacity grid)          |
//! | [`error`]  | `TgError`, `TgResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod pos;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TgError, TgResult};
pub use ids::FlowId;
pub use pos::{Direction, DirectionMask, GridPos};
pub use rng::SimRng;
pub use time::{SimConfig, Tick};
