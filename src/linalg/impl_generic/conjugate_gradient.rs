//! Conjugate gradient solve of a sparse SPD system through numr.

use numr::algorithm::iterative::{CgOptions, IterativeSolvers};
use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::ops::{BinaryOps, ReduceOps};
use numr::runtime::Runtime;
use numr::sparse::{CsrData, SparseStorage};
use numr::tensor::Tensor;

use crate::linalg::traits::types::{CgConfig, IterativeSolution};

/// Solve `A x = b` with conjugate gradient, starting from zero.
///
/// `b` is a `[n]` vector. Non-convergence is reported through
/// [`IterativeSolution::converged`], not as an error; only failures of the
/// solver itself are returned as `Err`.
pub fn conjugate_gradient_impl<R, C>(
    client: &C,
    a: &CsrData<R>,
    b: &Tensor<R>,
    config: &CgConfig,
) -> Result<IterativeSolution<R>>
where
    R: Runtime<DType = DType>,
    C: IterativeSolvers<R> + BinaryOps<R> + ReduceOps<R>,
{
    config.validate()?;

    let n = a.nrows();
    if b.shape().len() != 1 || b.shape()[0] != n {
        return Err(Error::ShapeMismatch {
            expected: vec![n],
            got: b.shape().to_vec(),
        });
    }

    // A zero right-hand side has the zero solution; skip the solver.
    let b_norm_sq: f64 = client
        .sum(&client.mul(b, b)?, &[0], false)?
        .to_vec::<f64>()
        .first()
        .copied()
        .unwrap_or(0.0);
    if b_norm_sq == 0.0 {
        return Ok(IterativeSolution {
            solution: Tensor::<R>::zeros(&[n], DType::F64, b.device()),
            iterations: 0,
            residual_norm: 0.0,
            converged: true,
        });
    }

    let options = CgOptions {
        max_iter: config.max_iter,
        rtol: config.rtol,
        atol: config.atol,
        ..Default::default()
    };

    let result = client
        .cg(a, &b.contiguous(), None, options)
        .map_err(|e| Error::Internal(format!("CG failed in Tikhonov solve: {}", e)))?;

    Ok(IterativeSolution {
        solution: result.solution,
        iterations: result.iterations,
        residual_norm: result.residual_norm,
        converged: result.converged,
    })
}
