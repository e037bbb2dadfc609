//! Core type definitions for kernel matrix computation

use crate::core::{KernelError, Result};
use ndarray::ArrayView2;

/// How the rows of a kernel matrix are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    /// Evaluate rows one after another on the calling thread
    #[default]
    Sequential,
    /// Distribute output rows across the rayon thread pool
    Rows,
}

impl Parallelism {
    pub fn is_parallel(&self) -> bool {
        matches!(self, Self::Rows)
    }
}

/// Algorithm used to obtain squared distances for the RBF kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RbfStrategy {
    /// Direct difference-then-square per row of X (numerically stable)
    #[default]
    RowBroadcast,
    /// ||x||² + ||y||² - 2x·y through a single matrix product.
    ///
    /// Faster for large d, but suffers cancellation for near-identical rows,
    /// so K(x, x) may differ from 1.0 by a few ulps.
    Expanded,
}

/// Shape of a pair of feature matrices after validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairShape {
    /// Rows of X
    pub n: usize,
    /// Rows of Y
    pub m: usize,
    /// Shared feature dimension
    pub d: usize,
}

impl PairShape {
    /// Validate that X and Y can be paired row by row
    ///
    /// Both matrices need at least one row and the same number of columns.
    pub fn of(x: &ArrayView2<'_, f64>, y: &ArrayView2<'_, f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(KernelError::EmptyMatrix("X has no rows".to_string()));
        }
        if y.nrows() == 0 {
            return Err(KernelError::EmptyMatrix("Y has no rows".to_string()));
        }
        if x.ncols() != y.ncols() {
            return Err(KernelError::DimensionMismatch {
                expected: x.ncols(),
                actual: y.ncols(),
            });
        }

        Ok(Self {
            n: x.nrows(),
            m: y.nrows(),
            d: x.ncols(),
        })
    }
}
