//! Symmetric positive semidefinite solve for the Schur complement.

use nalgebra::{DMatrix, DVector, Dyn, SymmetricEigen};

/// Eigenvalues below this fraction of the largest (after unit-diagonal
/// scaling) mark a dependent direction.
const RANK_TOLERANCE: f64 = 1e-12;

/// Pseudo-inverse of a symmetric positive semidefinite matrix.
///
/// Dependent rows (the redundant balance equation of a transportation
/// problem is one) only contribute zero eigenvalues, which are projected
/// out. This gives an exact solution whenever the system is consistent.
/// The matrix is Jacobi-scaled first so that the rank test does not depend
/// on how the rows are scaled. One factorization serves several solves.
pub(crate) struct SemidefiniteSolver {
    scale: DVector<f64>,
    eigen: Option<SymmetricEigen<f64, Dyn>>,
    cutoff: f64,
}

impl SemidefiniteSolver {
    pub(crate) fn new(matrix: &DMatrix<f64>) -> Self {
        let dim = matrix.nrows();
        let scale = DVector::from_fn(dim, |i, _| {
            let d = matrix[(i, i)];
            if d > 0.0 {
                1.0 / d.sqrt()
            } else {
                0.0
            }
        });
        if dim == 0 {
            return Self {
                scale,
                eigen: None,
                cutoff: 0.0,
            };
        }

        let scaled = DMatrix::from_fn(dim, dim, |i, j| matrix[(i, j)] * scale[i] * scale[j]);
        let eigen = scaled.symmetric_eigen();
        let largest = eigen.eigenvalues.iter().fold(0.0f64, |m, &v| m.max(v));
        Self {
            scale,
            cutoff: RANK_TOLERANCE * largest.max(1.0),
            eigen: Some(eigen),
        }
    }

    /// Minimum-norm (in the scaled space) solution of `S w = rhs`.
    pub(crate) fn solve(&self, rhs: &DVector<f64>) -> DVector<f64> {
        let Some(eigen) = &self.eigen else {
            return DVector::zeros(rhs.len());
        };
        let mut coords = eigen.eigenvectors.tr_mul(&rhs.component_mul(&self.scale));
        for (c, &lambda) in coords.iter_mut().zip(eigen.eigenvalues.iter()) {
            *c = if lambda > self.cutoff { *c / lambda } else { 0.0 };
        }
        (&eigen.eigenvectors * coords).component_mul(&self.scale)
    }
}
