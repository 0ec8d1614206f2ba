// Pre-sized matrix and vector factories shared by the solvers
use nalgebra::{DMatrix, DVector};

/// Owned `rows x cols` matrix with every element set to `fill`.
pub fn matrix(rows: usize, cols: usize, fill: f64) -> DMatrix<f64> {
    DMatrix::from_element(rows, cols, fill)
}

/// Owned vector of length `n` with every element set to `fill`.
pub fn vector(n: usize, fill: f64) -> DVector<f64> {
    DVector::from_element(n, fill)
}
