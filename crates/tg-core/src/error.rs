//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TgError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `tg-core`.
#[derive(Debug, Error)]
pub enum TgError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `tg-core`.
pub type TgResult<T> = Result<T, TgError>;
