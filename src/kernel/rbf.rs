//! RBF (Radial Basis Function) kernel implementation
//!
//! The RBF kernel is defined as: K(x, y) = exp(-γ * ||x - y||²)
//! where γ (gamma) is a hyperparameter that controls the kernel width.

use crate::core::{KernelError, PairShape, Parallelism, RbfStrategy, Result};
use crate::kernel::traits::{fill_rows, Kernel};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

/// RBF (Radial Basis Function) kernel: K(x, y) = exp(-γ * ||x - y||²)
///
/// The gamma parameter controls the "reach" of each example:
/// - High gamma: only close points look similar
/// - Low gamma: distant points still look similar, values tend to 1
///
/// A common starting point is gamma = 1.0 / n_features.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RbfKernel {
    gamma: f64,
    strategy: RbfStrategy,
}

impl RbfKernel {
    /// Create a new RBF kernel with specified gamma parameter
    ///
    /// # Errors
    /// Returns `InvalidParameter` unless gamma is finite and positive.
    pub fn new(gamma: f64) -> Result<Self> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(KernelError::InvalidParameter(format!(
                "Gamma must be positive, got: {gamma}"
            )));
        }

        Ok(Self {
            gamma,
            strategy: RbfStrategy::default(),
        })
    }

    /// Create RBF kernel with gamma = 1.0 / n_features
    pub fn with_auto_gamma(n_features: usize) -> Result<Self> {
        if n_features == 0 {
            return Err(KernelError::InvalidParameter(
                "Number of features must be positive".to_string(),
            ));
        }
        Self::new(1.0 / n_features as f64)
    }

    /// Create RBF kernel with gamma = 1.0
    pub fn unit_gamma() -> Self {
        Self {
            gamma: 1.0,
            strategy: RbfStrategy::default(),
        }
    }

    /// Select the squared-distance algorithm used by `compute_matrix`
    pub fn with_strategy(mut self, strategy: RbfStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Get the gamma parameter
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn strategy(&self) -> RbfStrategy {
        self.strategy
    }

    /// Direct difference-then-square form, row by row
    fn row_broadcast_matrix(
        &self,
        x: &ArrayView2<'_, f64>,
        y: &ArrayView2<'_, f64>,
        shape: PairShape,
        parallelism: Parallelism,
    ) -> Array2<f64> {
        let gamma = self.gamma;
        let mut kernel = Array2::zeros((shape.n, shape.m));

        fill_rows(&mut kernel, x, parallelism, |xi, mut out| {
            Zip::from(&mut out).and(y.rows()).for_each(|k, yj| {
                *k = (-gamma * squared_euclidean_distance(xi, yj)).exp();
            });
        });

        kernel
    }

    /// ||x||² + ||y||² - 2x·y through one matrix product
    fn expanded_matrix(
        &self,
        x: &ArrayView2<'_, f64>,
        y: &ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Array2<f64> {
        let gamma = self.gamma;
        let x_norms = squared_row_norms(x);
        let y_norms = squared_row_norms(y);
        let mut kernel = x.dot(&y.t());

        let zip = Zip::from(&mut kernel)
            .and_broadcast(x_norms.view().insert_axis(Axis(1)))
            .and_broadcast(y_norms.view().insert_axis(Axis(0)));

        // Cancellation can push the distance slightly below zero
        let apply = |k: &mut f64, &xn: &f64, &yn: &f64| {
            let distance_sq = (xn + yn - 2.0 * *k).max(0.0);
            *k = (-gamma * distance_sq).exp();
        };
        match parallelism {
            Parallelism::Sequential => zip.for_each(apply),
            Parallelism::Rows => zip.par_for_each(apply),
        }

        kernel
    }
}

impl Default for RbfKernel {
    /// Default RBF kernel with gamma = 1.0
    fn default() -> Self {
        Self::unit_gamma()
    }
}

impl Kernel for RbfKernel {
    fn name(&self) -> &'static str {
        "rbf"
    }

    fn compute(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
        (-self.gamma * squared_euclidean_distance(x, y)).exp()
    }

    fn compute_matrix(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Result<Array2<f64>> {
        let shape = PairShape::of(&x, &y)?;

        Ok(match self.strategy {
            RbfStrategy::RowBroadcast => self.row_broadcast_matrix(&x, &y, shape, parallelism),
            RbfStrategy::Expanded => self.expanded_matrix(&x, &y, parallelism),
        })
    }
}

/// ||x - y||² = Σᵢ (xᵢ - yᵢ)²
fn squared_euclidean_distance(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64 {
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| {
            let diff = a - b;
            diff * diff
        })
        .sum()
}

/// ||row||² for every row of a matrix
fn squared_row_norms(m: &ArrayView2<'_, f64>) -> Array1<f64> {
    m.map_axis(Axis(1), |row| row.dot(&row))
}
