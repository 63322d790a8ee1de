//! Grid coordinates and movement directions.
//!
//! `GridPos` uses signed components so that candidate moves one step off the
//! edge of the grid (`row = -1`, `col = cols`) are representable.  Whether a
//! position lies inside a particular grid is answered by the grid, never by
//! the position itself.

use std::fmt;

// ── GridPos ───────────────────────────────────────────────────────────────────

/// A `(row, col)` cell coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPos {
    pub row: i32,
    pub col: i32,
}

impl GridPos {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position `(row + d_row, col + d_col)`.
    #[inline]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Straight-line distance to `other` in cell units.
    #[inline]
    pub fn euclidean(self, other: GridPos) -> f64 {
        let d_row = f64::from(self.row - other.row);
        let d_col = f64::from(self.col - other.col);
        d_row.hypot(d_col)
    }

    /// Axis-aligned step count to `other`.
    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The unit direction of a one-cell step from `self` to `to`, if any.
    ///
    /// Returns `None` for staying in place and for anything that is not a
    /// single axis-aligned step.
    #[inline]
    pub fn step_direction(self, to: GridPos) -> Option<Direction> {
        Direction::from_delta(to.row - self.row, to.col - self.col)
    }
}

impl From<(i32, i32)> for GridPos {
    #[inline]
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four axis-aligned movement directions.
///
/// Rows grow downwards: moving to a smaller row index is `Up`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Map a `(d_row, d_col)` step to a direction.
    pub fn from_delta(d_row: i32, d_col: i32) -> Option<Direction> {
        match (d_row, d_col) {
            (-1, 0) => Some(Direction::Up),
            (1, 0) => Some(Direction::Down),
            (0, -1) => Some(Direction::Left),
            (0, 1) => Some(Direction::Right),
            _ => None,
        }
    }
}

// ── DirectionMask ─────────────────────────────────────────────────────────────

/// Which directions a flow may leave a cell in.
///
/// The default permits every direction.  Staying in place is never
/// restricted by a mask.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectionMask {
    pub up:    bool,
    pub down:  bool,
    pub left:  bool,
    pub right: bool,
}

impl DirectionMask {
    pub const ALL: DirectionMask = DirectionMask::new(true, true, true, true);
    pub const NONE: DirectionMask = DirectionMask::new(false, false, false, false);

    /// Build a mask in `(up, down, left, right)` order.
    #[inline]
    pub const fn new(up: bool, down: bool, left: bool, right: bool) -> Self {
        Self { up, down, left, right }
    }

    #[inline]
    pub fn allows(self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Whether a step from `from` to `to` is permitted by this mask.
    ///
    /// Steps that are not a single axis-aligned move (including staying put)
    /// are not governed by the mask and always pass.
    #[inline]
    pub fn permits_step(self, from: GridPos, to: GridPos) -> bool {
        from.step_direction(to).is_none_or(|dir| self.allows(dir))
    }
}

impl Default for DirectionMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<(bool, bool, bool, bool)> for DirectionMask {
    #[inline]
    fn from((up, down, left, right): (bool, bool, bool, bool)) -> Self {
        Self { up, down, left, right }
    }
}
