//! Options and result types for Tikhonov learning.

use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::linalg::{CgConfig, SparseLuConfig};

/// Options for Tikhonov regression and classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TikhonovOptions {
    /// Regularization weight.
    ///
    /// `tau > 0` solves the penalized problem
    /// `argmin_x ‖M x − y‖² + tau · xᵀ L x`; `tau == 0` holds observed values
    /// fixed and minimizes `xᵀ L x` over the unobserved ones.
    pub tau: f64,
    /// Conjugate gradient settings (sparse Laplacian, `tau > 0`).
    pub cg: CgConfig,
    /// Sparse LU settings (sparse Laplacian, `tau == 0`).
    pub lu: SparseLuConfig,
}

impl Default for TikhonovOptions {
    fn default() -> Self {
        Self {
            tau: 0.0,
            cg: CgConfig::default(),
            lu: SparseLuConfig::default(),
        }
    }
}

impl TikhonovOptions {
    /// Default options with the given regularization weight.
    pub fn with_tau(tau: f64) -> Self {
        Self {
            tau,
            ..Default::default()
        }
    }
}

/// Which linear system was solved, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverPath {
    /// `tau > 0`, dense Laplacian: dense LU on `diag(M) + tau·L`.
    DenseDirect,
    /// `tau > 0`, sparse Laplacian: conjugate gradient per column.
    ConjugateGradient,
    /// `tau == 0`, dense Laplacian: dense LU on the unobserved block.
    DenseReduced,
    /// `tau == 0`, sparse Laplacian: sparse LU on the unobserved block.
    SparseReduced,
    /// `tau == 0` with every node observed: nothing to solve.
    FullyObserved,
    /// The signal has no nodes or no columns: nothing to solve.
    Empty,
}

/// Per-column solve diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnReport {
    /// Iterations, for iterative solves.
    pub iterations: Option<usize>,
    /// `‖b − A x‖₂` of the solved system.
    pub residual_norm: f64,
    /// Whether the solver met its tolerance (always true for direct solves).
    pub converged: bool,
}

/// Diagnostics for one regression solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub path: SolverPath,
    /// One entry per signal column, empty when nothing was solved.
    pub columns: Vec<ColumnReport>,
}

impl SolveReport {
    /// True when every column converged.
    pub fn converged(&self) -> bool {
        self.columns.iter().all(|c| c.converged)
    }

    /// Largest residual norm over the columns (0 when nothing was solved).
    pub fn max_residual(&self) -> f64 {
        self.columns
            .iter()
            .map(|c| c.residual_norm)
            .fold(0.0, f64::max)
    }
}

/// Result of Tikhonov regression.
#[derive(Debug, Clone)]
pub struct TikhonovSolution<R: Runtime<DType = DType>> {
    /// Reconstructed signal, same shape as the input.
    pub solution: Tensor<R>,
    pub report: SolveReport,
}

/// Result of Tikhonov classification.
#[derive(Debug, Clone)]
pub struct ClassificationSolution<R: Runtime<DType = DType>> {
    /// Predicted class per node, I64 `[n]`.
    pub labels: Tensor<R>,
    /// Reconstructed logits `[n, num_classes]`.
    pub logits: Tensor<R>,
    /// Number of classes, `max(label) + 1`.
    pub num_classes: usize,
    pub report: SolveReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_use_hard_constraints() {
        let options = TikhonovOptions::default();
        assert_eq!(options.tau, 0.0);
        assert_eq!(TikhonovOptions::with_tau(0.5).tau, 0.5);
        assert_eq!(TikhonovOptions::with_tau(0.5).cg, CgConfig::default());
    }

    #[test]
    fn test_solve_report_summary() {
        let report = SolveReport {
            path: SolverPath::ConjugateGradient,
            columns: vec![
                ColumnReport {
                    iterations: Some(4),
                    residual_norm: 1e-9,
                    converged: true,
                },
                ColumnReport {
                    iterations: Some(1000),
                    residual_norm: 1e-3,
                    converged: false,
                },
            ],
        };
        assert!(!report.converged());
        assert_eq!(report.max_residual(), 1e-3);

        let empty = SolveReport {
            path: SolverPath::FullyObserved,
            columns: Vec::new(),
        };
        assert!(empty.converged());
        assert_eq!(empty.max_residual(), 0.0);
    }
}
