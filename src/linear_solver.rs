use crate::error::{HydroError, Result};
use crate::matrix::vector;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Pivots smaller than this in magnitude mark the system as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Dense system `A x = b` solved by Gaussian elimination with partial pivoting.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    pub matrix: DMatrix<f64>,
    pub rhs: DVector<f64>,
}

impl LinearSystem {
    pub fn new(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(HydroError::ShapeMismatch {
                what: "coefficient matrix columns",
                expected: matrix.nrows(),
                actual: matrix.ncols(),
            });
        }
        if rhs.len() != matrix.nrows() {
            return Err(HydroError::ShapeMismatch {
                what: "right-hand side",
                expected: matrix.nrows(),
                actual: rhs.len(),
            });
        }
        Ok(LinearSystem { matrix, rhs })
    }

    /// Consume the system and return the solution vector.
    pub fn solve(self) -> Result<DVector<f64>> {
        let LinearSystem {
            matrix: mut a,
            rhs: mut b,
        } = self;
        let n = b.len();
        debug!(n, "solving dense linear system");

        // Forward elimination
        for k in 0..n {
            // Row with the largest magnitude in column k
            let mut m = k;
            let mut max_el = a[(k, k)].abs();
            for i in k + 1..n {
                if a[(i, k)].abs() > max_el {
                    max_el = a[(i, k)].abs();
                    m = i;
                }
            }
            if m != k {
                a.swap_rows(k, m);
                b.swap_rows(k, m);
            }

            let pivot = a[(k, k)];
            // Also catches NaN pivots
            if !(pivot.abs() >= PIVOT_TOLERANCE) {
                return Err(HydroError::SingularMatrix { row: k, pivot });
            }

            for j in k + 1..n {
                let factor = -a[(j, k)] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for i in k..n {
                    a[(j, i)] += factor * a[(k, i)];
                }
                b[j] += factor * b[k];
            }
        }

        // Back substitution
        let mut x = vector(n, 0.0);
        for k in (0..n).rev() {
            let mut acc = b[k];
            for i in k + 1..n {
                acc -= a[(k, i)] * x[i];
            }
            x[k] = acc / a[(k, k)];
        }
        Ok(x)
    }
}

/// Solve `A x = b` without keeping the system around.
pub fn solve(matrix: DMatrix<f64>, rhs: DVector<f64>) -> Result<DVector<f64>> {
    LinearSystem::new(matrix, rhs)?.solve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solves_two_by_two() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let b = DVector::from_vec(vec![3.0, 5.0]);
        let x = solve(a, b).unwrap();
        assert_relative_eq!(x[0], 0.8, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.4, epsilon = 1e-12);
    }

    #[test]
    fn needs_pivoting_for_zero_leading_entry() {
        let a = DMatrix::from_row_slice(3, 3, &[0.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 0.0]);
        let expected = DVector::from_vec(vec![1.0, -2.0, 3.0]);
        let b = &a * &expected;
        let x = solve(a, b).unwrap();
        for i in 0..3 {
            assert_relative_eq!(x[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn matches_nalgebra_lu_on_larger_system() {
        let n = 6;
        let a = DMatrix::from_fn(n, n, |i, j| {
            if i == j {
                10.0 + i as f64
            } else {
                1.0 / (1.0 + i as f64 + j as f64)
            }
        });
        let b = DVector::from_fn(n, |i, _| i as f64 - 2.5);
        let reference = a.clone().lu().solve(&b).unwrap();
        let x = solve(a, b).unwrap();
        for i in 0..n {
            assert_relative_eq!(x[i], reference[i], epsilon = 1e-10);
        }
    }

    #[test]
    fn singular_matrix_is_reported() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        let err = solve(a, b).unwrap_err();
        assert!(matches!(err, HydroError::SingularMatrix { row: 1, .. }));
    }

    #[test]
    fn non_square_matrix_is_rejected() {
        let a = DMatrix::zeros(2, 3);
        let b = DVector::zeros(2);
        assert!(matches!(
            LinearSystem::new(a, b),
            Err(HydroError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn rhs_length_is_checked() {
        let a = DMatrix::identity(3, 3);
        let b = DVector::zeros(2);
        assert!(matches!(
            solve(a, b),
            Err(HydroError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn nan_pivot_is_reported_singular() {
        let a = DMatrix::from_row_slice(2, 2, &[f64::NAN, 1.0, 1.0, 1.0]);
        let b = DVector::from_vec(vec![1.0, 2.0]);
        assert!(matches!(
            solve(a, b),
            Err(HydroError::SingularMatrix { row: 0, .. })
        ));
    }
}
