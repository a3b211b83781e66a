//! Solver configuration and result types.

use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Configuration for the conjugate gradient solver.
///
/// Defaults follow the usual scipy `cg` settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Relative tolerance on the residual norm.
    pub rtol: f64,
    /// Absolute tolerance on the residual norm.
    pub atol: f64,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            rtol: 1e-5,
            atol: 0.0,
        }
    }
}

impl CgConfig {
    /// Reject non-finite or negative tolerances and a zero iteration cap.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(Error::InvalidArgument {
                arg: "max_iter",
                reason: "CG needs at least one iteration".to_string(),
            });
        }
        if !self.rtol.is_finite() || self.rtol < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "rtol",
                reason: format!("must be finite and >= 0, got {}", self.rtol),
            });
        }
        if !self.atol.is_finite() || self.atol < 0.0 {
            return Err(Error::InvalidArgument {
                arg: "atol",
                reason: format!("must be finite and >= 0, got {}", self.atol),
            });
        }
        Ok(())
    }
}

/// Configuration for the direct sparse LU solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparseLuConfig {
    /// Pivot tolerance for partial pivoting (1.0 = always choose largest).
    pub pivot_tolerance: f64,
    /// Minimum acceptable pivot magnitude.
    pub pivot_threshold: f64,
    /// Shift added to pivots below `pivot_threshold` instead of failing (0 = fail).
    pub diagonal_shift: f64,
    /// Apply a symmetric COLAMD permutation before factoring.
    pub fill_reducing: bool,
}

impl Default for SparseLuConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: 1.0,
            pivot_threshold: 1e-12,
            diagonal_shift: 0.0,
            fill_reducing: true,
        }
    }
}

/// Result of an iterative solve of a single right-hand side.
#[derive(Debug, Clone)]
pub struct IterativeSolution<R: Runtime<DType = DType>> {
    /// Final iterate `[n]`.
    pub solution: Tensor<R>,
    /// Iterations performed.
    pub iterations: usize,
    /// Residual norm reported by the solver.
    pub residual_norm: f64,
    /// Whether the tolerance was met.
    pub converged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cg_config_validate() {
        assert!(CgConfig::default().validate().is_ok());

        let zero_iter = CgConfig {
            max_iter: 0,
            ..Default::default()
        };
        assert!(zero_iter.validate().is_err());

        let bad_rtol = CgConfig {
            rtol: f64::NAN,
            ..Default::default()
        };
        assert!(bad_rtol.validate().is_err());

        let bad_atol = CgConfig {
            atol: -1.0,
            ..Default::default()
        };
        assert!(bad_atol.validate().is_err());
    }
}
