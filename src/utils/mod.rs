//! Utility functions for building and inspecting kernel matrices

use crate::core::{KernelError, Result};
use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Conversion between nested rows and dense matrices
pub mod conversion {
    use super::*;

    /// Build a dense row-major matrix from nested rows
    ///
    /// Every row must have the length of the first one; a ragged row is
    /// reported as `DimensionMismatch`. An empty input yields a 0×0 matrix.
    pub fn matrix_from_rows(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
        let d = rows.first().map_or(0, Vec::len);

        if let Some(ragged) = rows.iter().find(|row| row.len() != d) {
            return Err(KernelError::DimensionMismatch {
                expected: d,
                actual: ragged.len(),
            });
        }

        let flat: Vec<f64> = rows.iter().flatten().copied().collect();
        Array2::from_shape_vec((rows.len(), d), flat)
            .map_err(|e| KernelError::InvalidParameter(e.to_string()))
    }

    /// Copy a matrix into nested rows (for JSON output)
    pub fn matrix_to_rows<S>(matrix: &ArrayBase<S, Ix2>) -> Vec<Vec<f64>>
    where
        S: Data<Elem = f64>,
    {
        matrix.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

/// Checks on computed kernel matrices
pub mod validation {
    use super::*;

    /// Whether a square matrix satisfies |K[i, j] - K[j, i]| <= tolerance
    ///
    /// Non-square matrices are never symmetric.
    pub fn is_symmetric<S>(matrix: &ArrayBase<S, Ix2>, tolerance: f64) -> bool
    where
        S: Data<Elem = f64>,
    {
        let (n, m) = matrix.dim();
        if n != m {
            return false;
        }

        (0..n).all(|i| (i + 1..n).all(|j| (matrix[[i, j]] - matrix[[j, i]]).abs() <= tolerance))
    }

    /// Whether every entry is finite
    pub fn all_finite<S>(matrix: &ArrayBase<S, Ix2>) -> bool
    where
        S: Data<Elem = f64>,
    {
        matrix.iter().all(|v| v.is_finite())
    }
}

/// Statistical utilities for kernel matrices
pub mod stats {
    use super::*;

    /// Summary statistics over all entries of a kernel matrix
    pub fn kernel_matrix_stats<S>(matrix: &ArrayBase<S, Ix2>) -> KernelMatrixStats
    where
        S: Data<Elem = f64>,
    {
        let (rows, cols) = matrix.dim();
        if matrix.is_empty() {
            return KernelMatrixStats {
                rows,
                cols,
                ..Default::default()
            };
        }

        let min = matrix.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = matrix.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let mean = matrix.iter().sum::<f64>() / matrix.len() as f64;

        KernelMatrixStats {
            rows,
            cols,
            min,
            max,
            mean,
        }
    }
}

/// Memory management utilities
pub mod memory {
    /// Bytes needed for a dense n×m f64 kernel matrix
    pub fn estimate_kernel_matrix_memory(n: usize, m: usize) -> usize {
        n.saturating_mul(m).saturating_mul(std::mem::size_of::<f64>())
    }
}

/// Statistics for kernel matrix analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KernelMatrixStats {
    pub rows: usize,
    pub cols: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}
