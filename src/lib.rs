//! Dense kernel matrices for kernel-based classifiers
//!
//! Computes pairwise polynomial and Gaussian RBF kernels between the rows of
//! two feature matrices, for use as precomputed kernels in kernel SVM or
//! kernel ridge regression.

pub mod api;
pub mod core;
pub mod data;
pub mod kernel;
pub mod persistence;
pub mod utils;

// Re-export main types for convenience
pub use crate::api::{
    polynomial_kernel, rbf_kernel, rbf_kernel_expanded, KernelComputer, KernelSpec,
};
pub use crate::core::{KernelError, Parallelism, RbfStrategy, Result};
pub use crate::kernel::{Kernel, PolynomialKernel, RbfKernel};
pub use crate::persistence::KernelMatrixRecord;
pub use crate::utils::KernelMatrixStats;

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
