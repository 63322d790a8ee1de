//! Optional per-cell direction restrictions.
//!
//! Each cell carries a [`DirectionMask`] saying which ways a flow standing
//! on it may leave.  The mask of the flow's *current* cell decides; the mask
//! of the cell being entered is irrelevant.  Masks are configured once at
//! setup and are read-only while the simulation steps.

use tg_core::{DirectionMask, GridPos};

use crate::{GridError, GridResult, Matrix};

/// A `rows × cols` grid of exit-direction masks.  Every cell starts fully
/// permissive.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionGrid {
    masks: Matrix<DirectionMask>,
}

impl DirectionGrid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            masks: Matrix::filled(rows, cols, DirectionMask::ALL),
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.masks.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.masks.cols()
    }

    /// Restrict a single cell.
    pub fn set_direction(&mut self, pos: GridPos, dirs: impl Into<DirectionMask>) -> GridResult<()> {
        self.masks.set(pos, dirs.into())
    }

    /// Apply `dirs` to every cell of `row`.
    pub fn set_row(&mut self, row: usize, dirs: impl Into<DirectionMask>) -> GridResult<()> {
        self.masks.fill_row(row, dirs.into())
    }

    /// Apply `dirs` to every cell of `col`.
    pub fn set_col(&mut self, col: usize, dirs: impl Into<DirectionMask>) -> GridResult<()> {
        self.masks.fill_col(col, dirs.into())
    }

    /// Mask of `pos`.
    ///
    /// # Panics
    /// Panics if `pos` lies outside the grid.
    #[inline]
    pub fn get_direction(&self, pos: GridPos) -> DirectionMask {
        self.masks[pos]
    }

    /// Checked variant of [`get_direction`](Self::get_direction).
    pub fn try_direction(&self, pos: GridPos) -> GridResult<DirectionMask> {
        self.masks.get(pos).copied().ok_or(GridError::OutOfBounds(pos))
    }

    /// Whether a flow at `from` may step to `to` under `from`'s mask.
    ///
    /// Staying in place is always permitted.
    #[inline]
    pub fn permits(&self, from: GridPos, to: GridPos) -> bool {
        self.masks.get(from).is_none_or(|mask| mask.permits_step(from, to))
    }

    /// All masks.
    #[inline]
    pub fn masks(&self) -> &Matrix<DirectionMask> {
        &self.masks
    }
}
