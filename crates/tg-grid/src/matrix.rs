//! Dense row-major matrix addressed by `GridPos`.
//!
//! # Data layout
//!
//! Cell `(row, col)` lives at `data[row * cols + col]`.  Rows are contiguous,
//! so row-major scans (sampling, volume rebuilds, CSV export) are linear
//! memory walks.
//!
//! Lookups come in two flavours: `get`/`get_mut` return `None` for positions
//! outside the matrix, while `Index<GridPos>` assumes the caller has already
//! validated the position and panics otherwise.

use std::ops::{Index, IndexMut};

use tg_core::GridPos;

use crate::{GridError, GridResult};

/// A `rows × cols` matrix of `T`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Matrix<T> {
    /// A matrix with every cell set to `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    /// Build from nested rows.  Every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> GridResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(height * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow { row: i, expected: width, got: row.len() });
            }
            data.extend(row);
        }
        Ok(Self { rows: height, cols: width, data })
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Set every cell of `row` to `value`.
    pub fn fill_row(&mut self, row: usize, value: T) -> GridResult<()> {
        if row >= self.rows {
            return Err(GridError::RowOutOfRange(row));
        }
        let start = row * self.cols;
        self.data[start..start + self.cols].fill(value);
        Ok(())
    }

    /// Set every cell of `col` to `value`.
    pub fn fill_col(&mut self, col: usize, value: T) -> GridResult<()> {
        if col >= self.cols {
            return Err(GridError::ColOutOfRange(col));
        }
        for row in 0..self.rows {
            self.data[row * self.cols + col] = value.clone();
        }
        Ok(())
    }
}

impl<T: Clone + Default> Matrix<T> {
    /// A matrix with every cell set to `T::default()`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::default())
    }
}

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// `true` if `pos` addresses a cell of this matrix.
    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.index_of(pos).is_some()
    }

    /// Flat index of `pos`, or `None` if it lies outside the matrix.
    #[inline]
    pub fn index_of(&self, pos: GridPos) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Position of flat index `idx`.
    ///
    /// Dimensions are bounded by `i32::MAX` at configuration time, so the
    /// casts cannot truncate for any index produced by this matrix.
    #[inline]
    pub fn pos_of(&self, idx: usize) -> GridPos {
        GridPos::new((idx / self.cols) as i32, (idx % self.cols) as i32)
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&T> {
        self.index_of(pos).map(|i| &self.data[i])
    }

    #[inline]
    pub fn get_mut(&mut self, pos: GridPos) -> Option<&mut T> {
        self.index_of(pos).map(|i| &mut self.data[i])
    }

    /// Overwrite one cell.
    pub fn set(&mut self, pos: GridPos, value: T) -> GridResult<()> {
        let cell = self.get_mut(pos).ok_or(GridError::OutOfBounds(pos))?;
        *cell = value;
        Ok(())
    }

    /// All cells in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Cells of one row.
    ///
    /// # Panics
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> + '_ {
        self.data.iter().enumerate().map(move |(i, v)| (self.pos_of(i), v))
    }

    /// `true` if `other` has the same dimensions.
    #[inline]
    pub fn same_shape<U>(&self, other: &Matrix<U>) -> bool {
        self.shape() == other.shape()
    }
}

impl<T> Index<GridPos> for Matrix<T> {
    type Output = T;

    /// # Panics
    /// Panics if `pos` lies outside the matrix.
    #[inline]
    fn index(&self, pos: GridPos) -> &T {
        match self.index_of(pos) {
            Some(i) => &self.data[i],
            None => panic!("position {pos} outside {}x{} matrix", self.rows, self.cols),
        }
    }
}

impl<T> IndexMut<GridPos> for Matrix<T> {
    #[inline]
    fn index_mut(&mut self, pos: GridPos) -> &mut T {
        match self.index_of(pos) {
            Some(i) => &mut self.data[i],
            None => panic!("position {pos} outside {}x{} matrix", self.rows, self.cols),
        }
    }
}
