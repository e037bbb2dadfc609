//! Polynomial Kernel Implementation
//!
//! The polynomial kernel is defined as:
//! K(x, y) = (<x, y> + c)^p
//!
//! Where:
//! - c (coef0): independent term trading off high- and low-order terms
//! - p (degree): non-negative integer degree
//!
//! Common configurations:
//! - Linear kernel: p=1, c=0
//! - Quadratic kernel: p=2, c=1
//! - Cubic kernel: p=3, c=1

use crate::core::{KernelError, PairShape, Parallelism, Result};
use crate::kernel::traits::Kernel;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Polynomial kernel with configurable degree and coefficient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialKernel {
    /// Independent term in the polynomial (c)
    pub coef0: f64,
    /// Degree of the polynomial (p)
    pub degree: u32,
}

impl PolynomialKernel {
    /// Creates a new polynomial kernel (<x, y> + coef0)^degree
    ///
    /// # Errors
    /// Returns `InvalidParameter` if `coef0` is not finite or `degree`
    /// exceeds `i32::MAX`.
    ///
    /// # Examples
    /// ```
    /// use kernmat::kernel::PolynomialKernel;
    ///
    /// // Quadratic kernel: (x·y + 1)²
    /// let quad_kernel = PolynomialKernel::new(1.0, 2).unwrap();
    /// assert_eq!(quad_kernel.degree, 2);
    /// ```
    pub fn new(coef0: f64, degree: u32) -> Result<Self> {
        if !coef0.is_finite() {
            return Err(KernelError::InvalidParameter(format!(
                "coef0 must be finite, got: {coef0}"
            )));
        }
        if i32::try_from(degree).is_err() {
            return Err(KernelError::InvalidParameter(format!(
                "degree must not exceed {}, got: {degree}",
                i32::MAX
            )));
        }

        Ok(Self { coef0, degree })
    }

    /// Plain inner product: (<x, y> + 0)^1
    pub fn linear() -> Self {
        Self {
            coef0: 0.0,
            degree: 1,
        }
    }

    /// Creates a quadratic kernel: (<x, y> + coef0)²
    pub fn quadratic(coef0: f64) -> Result<Self> {
        Self::new(coef0, 2)
    }

    /// Creates a cubic kernel: (<x, y> + coef0)³
    pub fn cubic(coef0: f64) -> Result<Self> {
        Self::new(coef0, 3)
    }

    /// Apply (v + coef0)^degree to an inner product `v`
    ///
    /// Negative bases are raised as-is; `powi(0)` yields 1.0 even for a zero
    /// base.
    #[inline]
    fn transform(&self, inner: f64) -> f64 {
        (inner + self.coef0).powi(self.degree as i32)
    }
}

impl Kernel for PolynomialKernel {
    fn name(&self) -> &'static str {
        "polynomial"
    }

    fn compute(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        self.transform(x.dot(&y))
    }

    fn compute_matrix(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Result<Array2<f64>> {
        PairShape::of(&x, &y)?;

        // Dense X·Yᵗ, then the element-wise polynomial
        let mut kernel = x.dot(&y.t());
        let kernel_fn = *self;
        match parallelism {
            Parallelism::Sequential => kernel.mapv_inplace(|v| kernel_fn.transform(v)),
            Parallelism::Rows => kernel.par_mapv_inplace(|v| kernel_fn.transform(v)),
        }

        Ok(kernel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn matrix(kernel: &PolynomialKernel, x: &Array2<f64>, y: &Array2<f64>) -> Array2<f64> {
        kernel
            .compute_matrix(x.view(), y.view(), Parallelism::Sequential)
            .unwrap()
    }

    #[test]
    fn test_polynomial_kernel_creation() {
        let kernel = PolynomialKernel::new(0.5, 3).unwrap();
        assert_eq!(kernel.degree, 3);
        assert_eq!(kernel.coef0, 0.5);
    }

    #[test]
    fn test_named_constructors() {
        let linear = PolynomialKernel::linear();
        assert_eq!(linear.degree, 1);
        assert_eq!(linear.coef0, 0.0);

        let quad = PolynomialKernel::quadratic(2.0).unwrap();
        assert_eq!(quad.degree, 2);
        assert_eq!(quad.coef0, 2.0);

        let cubic = PolynomialKernel::cubic(1.0).unwrap();
        assert_eq!(cubic.degree, 3);
    }

    #[test]
    fn test_invalid_coef0() {
        assert!(matches!(
            PolynomialKernel::new(f64::NAN, 2),
            Err(KernelError::InvalidParameter(_))
        ));
        assert!(matches!(
            PolynomialKernel::new(f64::INFINITY, 2),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_invalid_degree() {
        assert!(matches!(
            PolynomialKernel::new(1.0, u32::MAX),
            Err(KernelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_polynomial_kernel_computation() {
        let kernel = PolynomialKernel::new(1.0, 2).unwrap();

        let x = array![1.0, 2.0];
        let y = array![2.0, 1.0];

        // Dot product: 1*2 + 2*1 = 4
        // Kernel: (4 + 1)² = 25
        assert_relative_eq!(kernel.compute(x.view(), y.view()), 25.0, epsilon = 1e-10);
    }

    #[test]
    fn test_polynomial_kernel_same_vector() {
        let kernel = PolynomialKernel::new(2.0, 3).unwrap();
        let x = array![3.0, 4.0];

        // (25 + 2)³ = 19683
        assert_relative_eq!(kernel.compute(x.view(), x.view()), 19683.0, epsilon = 1e-6);
    }

    #[test]
    fn test_negative_base_kept() {
        let kernel = PolynomialKernel::new(-3.0, 3).unwrap();
        let x = array![1.0];
        let y = array![1.0];

        // (1 - 3)³ = -8
        assert_eq!(kernel.compute(x.view(), y.view()), -8.0);
    }

    #[test]
    fn test_matrix_example() {
        let kernel = PolynomialKernel::new(1.0, 2).unwrap();
        let x = array![[1.0, 0.0], [0.0, 1.0]];
        let y = array![[1.0, 0.0]];

        assert_eq!(matrix(&kernel, &x, &y), array![[4.0], [1.0]]);
    }

    #[test]
    fn test_linear_matches_inner_products() {
        let x = array![[1.5, -2.0, 0.25], [3.0, 0.5, -1.0]];
        let y = array![[0.5, 1.0, 2.0], [-1.0, 4.0, 0.0], [2.0, 2.0, 2.0]];

        let k = matrix(&PolynomialKernel::linear(), &x, &y);
        assert_eq!(k, x.dot(&y.t()));
    }

    #[test]
    fn test_degree_zero_all_ones() {
        // Row [1, 0] against [-1, 0] with c = 1 gives a zero base
        let kernel = PolynomialKernel::new(1.0, 0).unwrap();
        let x = array![[1.0, 0.0], [2.0, 3.0]];
        let y = array![[-1.0, 0.0], [4.0, -5.0]];

        let k = matrix(&kernel, &x, &y);
        assert!(k.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_matrix_agrees_with_pairwise() {
        let kernel = PolynomialKernel::new(0.5, 3).unwrap();
        let x = array![[1.0, 2.0], [-0.5, 0.25], [3.0, -1.0]];
        let y = array![[0.0, 1.0], [2.0, 2.0]];

        let k = matrix(&kernel, &x, &y);
        for (i, xi) in x.rows().into_iter().enumerate() {
            for (j, yj) in y.rows().into_iter().enumerate() {
                assert_relative_eq!(k[[i, j]], kernel.compute(xi, yj), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let kernel = PolynomialKernel::new(1.0, 4).unwrap();
        let x = Array2::from_shape_fn((17, 5), |(i, j)| ((i * 5 + j) as f64).sin());
        let y = Array2::from_shape_fn((9, 5), |(i, j)| ((i + 2 * j) as f64).cos());

        let seq = kernel
            .compute_matrix(x.view(), y.view(), Parallelism::Sequential)
            .unwrap();
        let par = kernel
            .compute_matrix(x.view(), y.view(), Parallelism::Rows)
            .unwrap();

        assert_eq!(seq, par);
    }

    #[test]
    fn test_dimension_mismatch() {
        let kernel = PolynomialKernel::linear();
        let x = array![[1.0, 2.0]];
        let y = array![[1.0, 2.0, 3.0]];

        let result = kernel.compute_matrix(x.view(), y.view(), Parallelism::Sequential);
        assert!(matches!(
            result,
            Err(KernelError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
