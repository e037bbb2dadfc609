//! Kernel trait definition

use crate::core::{PairShape, Parallelism, Result};
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, Zip};

/// Kernel function trait
///
/// A kernel function K(x, y) measures the similarity of two feature vectors.
/// Implementations provide the pairwise value and may override the full
/// matrix computation with a faster algorithm.
pub trait Kernel: Send + Sync {
    /// Short identifier used in logs and saved records
    fn name(&self) -> &'static str;

    /// Compute kernel value K(x, y)
    fn compute(&self, x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> f64;

    /// Compute the n×m matrix K[i, j] = K(X[i], Y[j])
    ///
    /// The default is the plain double loop over row pairs, evaluating
    /// `compute` for each. Both built-in kernels override it with matrix
    /// algorithms; it remains the reference path for other kernels.
    fn compute_matrix(
        &self,
        x: ArrayView2<'_, f64>,
        y: ArrayView2<'_, f64>,
        parallelism: Parallelism,
    ) -> Result<Array2<f64>> {
        let shape = PairShape::of(&x, &y)?;
        let mut kernel = Array2::zeros((shape.n, shape.m));

        fill_rows(&mut kernel, &x, parallelism, |xi, mut out| {
            Zip::from(&mut out)
                .and(y.rows())
                .for_each(|k, yj| *k = self.compute(xi, yj));
        });

        Ok(kernel)
    }
}

/// Fill every row of `kernel` from the matching row of `x`
///
/// Each output row only reads `x` and whatever the closure captures, so rows
/// can be handed to rayon without synchronization.
pub(crate) fn fill_rows<F>(
    kernel: &mut Array2<f64>,
    x: &ArrayView2<'_, f64>,
    parallelism: Parallelism,
    fill: F,
) where
    F: Fn(ArrayView1<'_, f64>, ArrayViewMut1<'_, f64>) + Send + Sync,
{
    let rows = Zip::from(kernel.rows_mut()).and(x.rows());
    match parallelism {
        Parallelism::Sequential => rows.for_each(|out, xi| fill(xi, out)),
        Parallelism::Rows => rows.par_for_each(|out, xi| fill(xi, out)),
    }
}
