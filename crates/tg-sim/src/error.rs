use thiserror::Error;

use tg_core::{GridPos, TgError};
use tg_grid::GridError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] TgError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("origin {origin} has capacity {capacity}; a flow needs at least 2")]
    InvalidOrigin { origin: GridPos, capacity: u32 },

    #[error("destination {destination} has no road")]
    InvalidDestination { destination: GridPos },

    #[error("flow volume {volume} must lie in 1..{capacity}")]
    InvalidVolume { volume: u32, capacity: u32 },

    #[error("position {0} is outside the grid")]
    OutOfBounds(GridPos),
}

pub type SimResult<T> = Result<T, SimError>;
