//! Congestion statistics over volume matrices.
//!
//! A cell is *full* when it is occupied and its volume has reached exactly
//! its capacity.  Volumes can overshoot capacity when several flows enter an
//! empty cell in the same tick; those cells are counted separately by
//! [`over_capacity_cells`] rather than folded into the full count.

use tg_grid::Matrix;
use tg_sim::History;

/// Number of occupied cells whose volume equals their capacity.
///
/// # Panics
/// Panics if the matrices differ in shape.
pub fn full_cells(capacity: &Matrix<u32>, volume: &Matrix<u32>) -> usize {
    assert!(capacity.same_shape(volume), "capacity and volume shapes differ");
    capacity
        .as_slice()
        .iter()
        .zip(volume.as_slice())
        .filter(|&(&c, &v)| v > 0 && v == c)
        .count()
}

/// Number of cells whose volume exceeds their capacity.
///
/// # Panics
/// Panics if the matrices differ in shape.
pub fn over_capacity_cells(capacity: &Matrix<u32>, volume: &Matrix<u32>) -> usize {
    assert!(capacity.same_shape(volume), "capacity and volume shapes differ");
    capacity
        .as_slice()
        .iter()
        .zip(volume.as_slice())
        .filter(|&(&c, &v)| v > c)
        .count()
}

/// Full-cell count summed over every recorded tick.
pub fn history_full_cells(history: &History, capacity: &Matrix<u32>) -> usize {
    history
        .iter()
        .map(|entry| full_cells(capacity, &entry.volume))
        .sum()
}
