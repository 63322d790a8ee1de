//! Optional per-cell congestion weights.
//!
//! `weight = 1 / (capacity + 1)`: wide roads are cheap to enter, narrow ones
//! expensive, and road-less cells (capacity 0) carry the maximum weight of
//! `1.0`.  Weights only scale move costs; they never block a move.

use tg_core::GridPos;

use crate::Matrix;

/// A `rows × cols` grid of cost multipliers derived from capacities.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightGrid {
    weights: Matrix<f64>,
}

impl WeightGrid {
    /// A zeroed grid.  Call [`set_weights`](Self::set_weights) before use.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            weights: Matrix::filled(rows, cols, 0.0),
        }
    }

    /// A grid already derived from `capacities`.
    pub fn from_capacities(capacities: &Matrix<u32>) -> Self {
        let mut grid = Self::new(capacities.rows(), capacities.cols());
        grid.set_weights(capacities);
        grid
    }

    /// Recompute every weight from `capacities`.
    ///
    /// Reshapes the grid if the dimensions differ.
    pub fn set_weights(&mut self, capacities: &Matrix<u32>) {
        if !self.weights.same_shape(capacities) {
            self.weights = Matrix::filled(capacities.rows(), capacities.cols(), 0.0);
        }
        for (pos, &capacity) in capacities.iter() {
            self.weights[pos] = 1.0 / (f64::from(capacity) + 1.0);
        }
    }

    /// Weight of `pos`.
    ///
    /// # Panics
    /// Panics if `pos` lies outside the grid.
    #[inline]
    pub fn weight(&self, pos: GridPos) -> f64 {
        self.weights[pos]
    }

    /// All weights.
    #[inline]
    pub fn weights(&self) -> &Matrix<f64> {
        &self.weights
    }
}
