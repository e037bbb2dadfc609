//! High-level API for kernel matrix computation
//!
//! This module provides the two kernel functions as free functions plus a
//! builder for callers that need parallel evaluation or the expanded RBF form.
//!
//! # Quick Start
//!
//! ```rust
//! use kernmat::api::{polynomial_kernel, rbf_kernel};
//! use ndarray::array;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let x = array![[1.0, 0.0], [0.0, 1.0]];
//! let y = array![[1.0, 0.0]];
//!
//! let k = polynomial_kernel(&x, &y, 1.0, 2)?;
//! assert_eq!(k, array![[4.0], [1.0]]);
//!
//! let k = rbf_kernel(&x, &x, 0.5)?;
//! assert_eq!(k[[0, 0]], 1.0);
//! # Ok(())
//! # }
//! ```

use crate::core::{Parallelism, RbfStrategy, Result};
use crate::kernel::{Kernel, PolynomialKernel, RbfKernel};
use log::debug;
use ndarray::{Array2, ArrayBase, ArrayView2, Data, Ix2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polynomial kernel matrix: K[i, j] = (<X[i], Y[j]> + c)^p
///
/// # Errors
/// `DimensionMismatch` if X and Y have different column counts,
/// `EmptyMatrix` if either has no rows, `InvalidParameter` if `c` is not
/// finite.
pub fn polynomial_kernel<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    c: f64,
    p: u32,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    KernelComputer::new(KernelSpec::Polynomial { c, p }).compute(x, y)
}

/// Gaussian RBF kernel matrix: K[i, j] = exp(-gamma * ||X[i] - Y[j]||²)
///
/// Uses the direct difference-then-square distance, so identical rows give
/// exactly 1.0.
///
/// # Errors
/// Same shape errors as [`polynomial_kernel`]; `InvalidParameter` unless
/// gamma is finite and positive.
pub fn rbf_kernel<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    gamma: f64,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    KernelComputer::new(KernelSpec::Rbf { gamma }).compute(x, y)
}

/// RBF kernel matrix through ||x||² + ||y||² - 2x·y
///
/// Trades accuracy on near-identical rows for a single matrix product.
pub fn rbf_kernel_expanded<S1, S2>(
    x: &ArrayBase<S1, Ix2>,
    y: &ArrayBase<S2, Ix2>,
    gamma: f64,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    KernelComputer::new(KernelSpec::Rbf { gamma })
        .with_rbf_strategy(RbfStrategy::Expanded)
        .compute(x, y)
}

/// Kernel choice and parameters, as stored in saved records
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KernelSpec {
    /// (<x, y> + c)^p
    Polynomial { c: f64, p: u32 },
    /// exp(-gamma * ||x - y||²)
    Rbf { gamma: f64 },
}

impl KernelSpec {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Polynomial { .. } => "polynomial",
            Self::Rbf { .. } => "rbf",
        }
    }

    /// Check the parameters without computing anything
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Polynomial { c, p } => PolynomialKernel::new(c, p).map(|_| ()),
            Self::Rbf { gamma } => RbfKernel::new(gamma).map(|_| ()),
        }
    }

    /// Compute the kernel matrix sequentially with default settings
    pub fn compute<S1, S2>(
        &self,
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix2>,
    ) -> Result<Array2<f64>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        KernelComputer::new(*self).compute(x, y)
    }
}

impl fmt::Display for KernelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polynomial { c, p } => write!(f, "polynomial(c={c}, p={p})"),
            Self::Rbf { gamma } => write!(f, "rbf(gamma={gamma})"),
        }
    }
}

/// Kernel matrix builder with execution options
///
/// ```rust
/// use kernmat::api::{KernelComputer, KernelSpec};
/// use kernmat::core::Parallelism;
/// use ndarray::array;
///
/// let x = array![[0.0, 0.0], [1.0, 1.0]];
/// let gram = KernelComputer::new(KernelSpec::Rbf { gamma: 1.0 })
///     .with_parallelism(Parallelism::Rows)
///     .compute_gram(&x)
///     .unwrap();
/// assert_eq!(gram.dim(), (2, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelComputer {
    spec: KernelSpec,
    parallelism: Parallelism,
    rbf_strategy: RbfStrategy,
}

impl KernelComputer {
    /// Create a computer for the given kernel with sequential, row-broadcast defaults
    pub fn new(spec: KernelSpec) -> Self {
        Self {
            spec,
            parallelism: Parallelism::default(),
            rbf_strategy: RbfStrategy::default(),
        }
    }

    /// Set how output rows are scheduled
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    /// Set the RBF distance algorithm (ignored for the polynomial kernel)
    pub fn with_rbf_strategy(mut self, strategy: RbfStrategy) -> Self {
        self.rbf_strategy = strategy;
        self
    }

    pub fn spec(&self) -> KernelSpec {
        self.spec
    }

    /// Compute the n×m kernel matrix between the rows of X and Y
    pub fn compute<S1, S2>(
        &self,
        x: &ArrayBase<S1, Ix2>,
        y: &ArrayBase<S2, Ix2>,
    ) -> Result<Array2<f64>>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        match self.spec {
            KernelSpec::Polynomial { c, p } => {
                let kernel = PolynomialKernel::new(c, p)?;
                self.run(&kernel, x.view(), y.view())
            }
            KernelSpec::Rbf { gamma } => {
                let kernel = RbfKernel::new(gamma)?.with_strategy(self.rbf_strategy);
                self.run(&kernel, x.view(), y.view())
            }
        }
    }

    /// Compute the n×n Gram matrix of X against itself
    pub fn compute_gram<S>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>>
    where
        S: Data<Elem = f64>,
    {
        self.compute(x, x)
    }

    fn run<K: Kernel>(
        &self,
        kernel: &K,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
    ) -> Result<Array2<f64>> {
        debug!(
            "Computing {} kernel: X {:?}, Y {:?}, {:?}, {:?}",
            kernel.name(),
            x.dim(),
            y.dim(),
            self.parallelism,
            self.rbf_strategy
        );
        kernel.compute_matrix(x, y, self.parallelism)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KernelError;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    fn sample_data() -> Array2<f64> {
        array![
            [0.5, -1.0, 2.0],
            [1.5, 0.0, -0.5],
            [-2.0, 3.0, 1.0],
            [0.0, 0.25, 0.75]
        ]
    }

    #[test]
    fn test_polynomial_example() {
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![[1.0, 0.0]];

        let k = polynomial_kernel(&x, &y, 1.0, 2).unwrap();
        assert_eq!(k, array![[4.0], [1.0]]);
    }

    #[test]
    fn test_rbf_example() {
        let x = array![[0.0, 0.0]];
        let y = array![[3.0, 4.0]];

        let k = rbf_kernel(&x, &y, 1.0).unwrap();
        assert_relative_eq!(k[[0, 0]], (-25.0_f64).exp(), max_relative = 1e-12);
    }

    #[test]
    fn test_gram_matrices_symmetric() {
        let x = sample_data();

        let poly = polynomial_kernel(&x, &x, 1.0, 3).unwrap();
        let rbf = rbf_kernel(&x, &x, 0.3).unwrap();
        let expanded = rbf_kernel_expanded(&x, &x, 0.3).unwrap();

        for k in [&poly, &rbf, &expanded] {
            for i in 0..x.nrows() {
                for j in 0..x.nrows() {
                    assert_relative_eq!(k[[i, j]], k[[j, i]], max_relative = 1e-12);
                }
            }
        }
    }

    #[test]
    fn test_output_shape() {
        let x = sample_data();
        let y = array![[1.0, 1.0, 1.0], [0.0, 0.0, 0.0]];

        assert_eq!(polynomial_kernel(&x, &y, 0.0, 2).unwrap().dim(), (4, 2));
        assert_eq!(rbf_kernel(&x, &y, 1.0).unwrap().dim(), (4, 2));
        assert_eq!(rbf_kernel(&y, &x, 1.0).unwrap().dim(), (2, 4));
    }

    #[test]
    fn test_degenerate_polynomial_is_inner_product() {
        let x = sample_data();
        let y = array![[2.0, 0.5, -1.0], [1.0, 1.0, 1.0]];

        assert_eq!(polynomial_kernel(&x, &y, 0.0, 1).unwrap(), x.dot(&y.t()));
    }

    #[test]
    fn test_polynomial_degree_zero() {
        let x = sample_data();
        let k = polynomial_kernel(&x, &x, -3.5, 0).unwrap();
        assert!(k.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_rbf_decay_with_gamma() {
        let x = array![[0.0, 1.0]];
        let y = array![[1.0, 0.0]];

        let mut previous = 1.0;
        for gamma in [1e-6, 0.01, 0.1, 1.0, 10.0] {
            let value = rbf_kernel(&x, &y, gamma).unwrap()[[0, 0]];
            assert!(value < previous, "gamma {gamma} did not decrease the kernel");
            previous = value;
        }
        assert!(previous < 1e-8);
    }

    #[test]
    fn test_views_accepted() {
        let x = sample_data();
        let head = x.slice(ndarray::s![..2, ..]);

        let k = rbf_kernel(&head, &x, 0.5).unwrap();
        assert_eq!(k.dim(), (2, 4));
        assert_eq!(k[[1, 1]], 1.0);
    }

    #[test]
    fn test_errors_surface() {
        let x = sample_data();
        let narrow = array![[1.0, 2.0]];
        let empty = Array2::<f64>::zeros((0, 3));

        assert!(matches!(
            polynomial_kernel(&x, &narrow, 1.0, 2),
            Err(KernelError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            rbf_kernel(&empty, &x, 1.0),
            Err(KernelError::EmptyMatrix(_))
        ));
        assert!(matches!(
            rbf_kernel(&x, &x, 0.0),
            Err(KernelError::InvalidParameter(_))
        ));
        assert!(matches!(
            polynomial_kernel(&x, &x, f64::NAN, 2),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_computer_parallel_matches() {
        let x = Array2::from_shape_fn((31, 6), |(i, j)| ((i * 7 + j) % 5) as f64 - 2.0);

        for spec in [
            KernelSpec::Polynomial { c: 1.0, p: 2 },
            KernelSpec::Rbf { gamma: 0.2 },
        ] {
            let seq = KernelComputer::new(spec).compute_gram(&x).unwrap();
            let par = KernelComputer::new(spec)
                .with_parallelism(Parallelism::Rows)
                .compute_gram(&x)
                .unwrap();
            assert_eq!(seq, par, "{spec}");
        }
    }

    #[test]
    fn test_kernel_spec_json() {
        let spec = KernelSpec::Polynomial { c: 1.0, p: 2 };
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"type":"polynomial","c":1.0,"p":2}"#);

        let parsed: KernelSpec = serde_json::from_str(r#"{"type":"rbf","gamma":0.5}"#).unwrap();
        assert_eq!(parsed, KernelSpec::Rbf { gamma: 0.5 });
        assert_eq!(parsed.name(), "rbf");
        assert_eq!(parsed.to_string(), "rbf(gamma=0.5)");
    }

    #[test]
    fn test_kernel_spec_validate() {
        assert!(KernelSpec::Polynomial { c: 0.0, p: 0 }.validate().is_ok());
        assert!(KernelSpec::Rbf { gamma: -1.0 }.validate().is_err());
    }
}
