//! Tikhonov learning traits.

use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::graph::LaplacianGraph;
use crate::learning::error::LearningResult;

use super::types::{ClassificationSolution, TikhonovOptions, TikhonovSolution};

/// Semi-supervised learning on graphs via Tikhonov minimization.
///
/// The caller's signal is never modified; unobserved entries may hold any
/// value, including NaN.
pub trait TikhonovAlgorithms<R: Runtime<DType = DType>> {
    /// Reconstruct a graph signal from partial observations.
    ///
    /// If `options.tau > 0`:
    ///
    /// ```text
    /// argmin_x ‖M x − y‖² + tau · xᵀ L x      i.e.  (diag(M) + tau·L) x = M y
    /// ```
    ///
    /// otherwise:
    ///
    /// ```text
    /// argmin_x xᵀ L x   s.t.   x_i = y_i  for every observed i
    /// ```
    ///
    /// # Arguments
    ///
    /// * `graph` - Node count and Laplacian (dense or sparse)
    /// * `y` - F64 measurements, `[n]` or `[n, c]` (one system per column)
    /// * `mask` - Observation mask of length `n`
    /// * `options` - Regularization weight and solver settings
    ///
    /// # Returns
    ///
    /// The reconstruction (same shape as `y`) and per-column solve diagnostics.
    fn regression_tik(
        &self,
        graph: &LaplacianGraph<R>,
        y: &Tensor<R>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<TikhonovSolution<R>>;

    /// Classify nodes from partially observed integer labels.
    ///
    /// Labels are one-hot encoded into logits `Y` (`[n, max(label) + 1]`),
    /// reconstructed with [`regression_tik`](Self::regression_tik), and each
    /// node is assigned the class with the largest logit (lowest class on ties).
    ///
    /// `y` is F64 `[n]`; observed entries must be non-negative integers.
    fn classification_tik(
        &self,
        graph: &LaplacianGraph<R>,
        y: &Tensor<R>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<ClassificationSolution<R>>;
}
