//! Tikhonov regression on graphs.
//!
//! Dispatch on `tau` and on the Laplacian representation:
//!
//! | `tau` | Laplacian | System                               | Solver          |
//! |-------|-----------|--------------------------------------|-----------------|
//! | > 0   | dense     | `(diag(M) + tau·L) x = M y`          | dense LU        |
//! | > 0   | sparse    | same, assembled in CSR               | CG per column   |
//! | 0     | dense     | `L_uu x_u = −L_ul y_l`               | dense LU        |
//! | 0     | sparse    | same, CSR blocks                     | sparse LU       |
//!
//! Signals are handled as `[n, c]` blocks on the device. Unobserved rows are
//! never read: observed rows are gathered with `index_select` and scattered
//! back through a selection matrix, so placeholders such as NaN cannot leak
//! into the arithmetic.

use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::dtype::DType;
use numr::error::Result;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::graph::{Laplacian, LaplacianGraph};
use crate::learning::error::{LearningError, LearningResult};
use crate::learning::traits::types::{
    ColumnReport, SolveReport, SolverPath, TikhonovOptions, TikhonovSolution,
};
use crate::linalg::impl_generic::{column, index_tensor, scatter_matrix};
use crate::linalg::{
    CsrOperator, DenseOperator, FnOperator, LinearOperator, MaskedTikhonovOperator,
    SparseLuSolver, conjugate_gradient_impl, residual_norms,
};

use super::client::TikhonovClient;
use super::helpers::{SignalLayout, partition_mask, validate_mask, validate_tau};

/// Solve a regression problem on a graph via Tikhonov minimization.
pub fn regression_tik_impl<R, C>(
    client: &C,
    graph: &LaplacianGraph<R>,
    y: &Tensor<R>,
    mask: &[bool],
    options: &TikhonovOptions,
) -> LearningResult<TikhonovSolution<R>>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
{
    validate_tau(options.tau)?;
    let n = graph.num_nodes();
    validate_mask(mask, n)?;
    let layout = SignalLayout::of(y, n)?;

    if n == 0 || layout.num_columns == 0 {
        tracing::debug!(nodes = n, columns = layout.num_columns, "empty signal, nothing to solve");
        return Ok(TikhonovSolution {
            solution: y.contiguous(),
            report: SolveReport {
                path: SolverPath::Empty,
                columns: Vec::new(),
            },
        });
    }

    let signal = y.contiguous().reshape(&[n, layout.num_columns])?;
    let (solution, report) = if options.tau > 0.0 {
        solve_penalized(client, graph.laplacian(), &signal, mask, options)?
    } else {
        solve_constrained(client, graph.laplacian(), &signal, mask, options)?
    };

    tracing::debug!(
        path = ?report.path,
        nodes = n,
        columns = layout.num_columns,
        tau = options.tau,
        max_residual = report.max_residual(),
        "tikhonov regression solved"
    );

    Ok(TikhonovSolution {
        solution: solution.reshape(&layout.shape())?,
        report,
    })
}

/// `tau > 0`: solve `(diag(M) + tau·L) x = M y`.
fn solve_penalized<R, C>(
    client: &C,
    laplacian: &Laplacian<R>,
    signal: &Tensor<R>,
    mask: &[bool],
    options: &TikhonovOptions,
) -> LearningResult<(Tensor<R>, SolveReport)>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
{
    let (observed, _) = partition_mask(mask);
    let rhs = masked_signal(client, signal, &observed)?;

    match laplacian {
        Laplacian::Dense(dense) => {
            let lap = DenseOperator::new(client, dense.clone())?;
            let system = MaskedTikhonovOperator::new(client, mask, options.tau, &lap)?;
            let a = system.assemble()?;

            let x = LinearAlgebraAlgorithms::solve(client, &a, &rhs)
                .map_err(|e| LearningError::solve_failed("dense Tikhonov solve", e))?;
            let columns = direct_reports(client, &system, &x, &rhs)?;
            Ok((
                x,
                SolveReport {
                    path: SolverPath::DenseDirect,
                    columns,
                },
            ))
        }
        Laplacian::Sparse(csr) => {
            let lap = CsrOperator::new(client, csr.clone());
            let system = MaskedTikhonovOperator::new(client, mask, options.tau, &lap)?;
            let a = system.assemble()?;

            let num_columns = rhs.shape()[1];
            let mut solutions = Vec::with_capacity(num_columns);
            let mut columns = Vec::with_capacity(num_columns);
            for j in 0..num_columns {
                let b = column(client, &rhs, j)?;
                let result = conjugate_gradient_impl(client, &a, &b, &options.cg)
                    .map_err(|e| LearningError::solve_failed("conjugate gradient", e))?;

                if !result.converged {
                    tracing::warn!(
                        column = j,
                        iterations = result.iterations,
                        residual = result.residual_norm,
                        "conjugate gradient did not converge"
                    );
                }

                columns.push(ColumnReport {
                    iterations: Some(result.iterations),
                    residual_norm: column_residual(client, &system, &result.solution, &b)?,
                    converged: result.converged,
                });
                solutions.push(result.solution);
            }

            let solutions: Vec<&Tensor<R>> = solutions.iter().collect();
            Ok((
                client.stack(&solutions, 1)?,
                SolveReport {
                    path: SolverPath::ConjugateGradient,
                    columns,
                },
            ))
        }
    }
}

/// `tau == 0`: hold observed rows fixed and solve `L_uu x_u = −L_ul y_l`.
fn solve_constrained<R, C>(
    client: &C,
    laplacian: &Laplacian<R>,
    signal: &Tensor<R>,
    mask: &[bool],
    options: &TikhonovOptions,
) -> LearningResult<(Tensor<R>, SolveReport)>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
{
    let (observed, unobserved) = partition_mask(mask);
    if unobserved.is_empty() {
        return Ok((
            signal.clone(),
            SolveReport {
                path: SolverPath::FullyObserved,
                columns: Vec::new(),
            },
        ));
    }

    let device = client.device();
    let y_l = if observed.is_empty() {
        None
    } else {
        Some(client.index_select(signal, 0, &index_tensor::<R>(&observed, device))?)
    };

    let (x_u, path, columns) = match laplacian {
        Laplacian::Dense(dense) => {
            let lap = DenseOperator::new(client, dense.clone())?;
            let l_uu = lap.submatrix(&unobserved, &unobserved)?;
            let rhs = coupling_rhs(client, &lap, &observed, &unobserved, y_l.as_ref(), signal)?;

            let x_u = LinearAlgebraAlgorithms::solve(client, l_uu.matrix(), &rhs)
                .map_err(|e| LearningError::solve_failed("dense reduced Laplacian solve", e))?;
            let columns = direct_reports(client, &l_uu, &x_u, &rhs)?;
            (x_u, SolverPath::DenseReduced, columns)
        }
        Laplacian::Sparse(csr) => {
            let lap = CsrOperator::new(client, csr.clone());
            let l_uu = lap.submatrix(&unobserved, &unobserved)?;
            let rhs = coupling_rhs(client, &lap, &observed, &unobserved, y_l.as_ref(), signal)?;

            let solver = SparseLuSolver::<R>::factor(client, l_uu.csr(), &options.lu)
                .map_err(|e| LearningError::solve_failed("sparse LU factorization", e))?;

            let num_columns = rhs.shape()[1];
            let mut solutions = Vec::with_capacity(num_columns);
            let mut columns = Vec::with_capacity(num_columns);
            for j in 0..num_columns {
                let b = column(client, &rhs, j)?;
                let x = solver
                    .solve(client, &b)
                    .map_err(|e| LearningError::solve_failed("sparse LU solve", e))?;
                columns.push(ColumnReport {
                    iterations: None,
                    residual_norm: column_residual(client, &l_uu, &x, &b)?,
                    converged: true,
                });
                solutions.push(x);
            }

            let solutions: Vec<&Tensor<R>> = solutions.iter().collect();
            (client.stack(&solutions, 1)?, SolverPath::SparseReduced, columns)
        }
    };

    let solution = match y_l {
        None => x_u,
        Some(y_l) => {
            // Row i of the result is row positions[i] of [y_l; x_u]
            let nl = observed.len();
            let mut positions = vec![0usize; mask.len()];
            for (k, &i) in observed.iter().enumerate() {
                positions[i] = k;
            }
            for (k, &i) in unobserved.iter().enumerate() {
                positions[i] = nl + k;
            }
            let stacked = client.cat(&[&y_l, &x_u], 0)?;
            client.index_select(&stacked, 0, &index_tensor::<R>(&positions, device))?
        }
    };

    Ok((solution, SolveReport { path, columns }))
}

/// `M y` for a `[n, c]` signal: observed rows kept, the others zero whatever
/// they held.
fn masked_signal<R, C>(client: &C, signal: &Tensor<R>, observed: &[usize]) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
{
    let shape = signal.shape().to_vec();
    let device = client.device();
    if observed.is_empty() {
        return Ok(Tensor::<R>::zeros(&shape, DType::F64, device));
    }
    let rows = client.index_select(signal, 0, &index_tensor::<R>(observed, device))?;
    CsrOperator::new(client, scatter_matrix::<R>(observed, shape[0], device)?).apply(&rows)
}

/// `−L[u, l] y_l`, applied through `L` without extracting the block.
///
/// With nothing observed the right-hand side is zero.
fn coupling_rhs<R, C, L>(
    client: &C,
    laplacian: &L,
    observed: &[usize],
    unobserved: &[usize],
    y_l: Option<&Tensor<R>>,
    signal: &Tensor<R>,
) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
    L: LinearOperator<R>,
{
    let n = laplacian.dim();
    let num_columns = signal.shape()[1];
    let device = client.device();
    let Some(y_l) = y_l else {
        return Ok(Tensor::<R>::zeros(
            &[unobserved.len(), num_columns],
            DType::F64,
            device,
        ));
    };

    let scatter = CsrOperator::new(client, scatter_matrix::<R>(observed, n, device)?);
    let rows = index_tensor::<R>(unobserved, device);
    let coupling = FnOperator::new([unobserved.len(), observed.len()], |y_l: &Tensor<R>| {
        let spread = laplacian.apply(&scatter.apply(y_l)?)?;
        client.mul_scalar(&client.index_select(&spread, 0, &rows)?, -1.0)
    });
    coupling.apply(y_l)
}

/// Residual diagnostics for a direct solve of `A X = B` (`[n, c]` blocks).
fn direct_reports<R, C, A>(
    client: &C,
    a: &A,
    x: &Tensor<R>,
    b: &Tensor<R>,
) -> LearningResult<Vec<ColumnReport>>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
    A: LinearOperator<R>,
{
    Ok(residual_norms(client, a, x, b)?
        .into_iter()
        .map(|residual_norm| ColumnReport {
            iterations: None,
            residual_norm,
            converged: true,
        })
        .collect())
}

fn column_residual<R, C, A>(client: &C, a: &A, x: &Tensor<R>, b: &Tensor<R>) -> Result<f64>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
    A: LinearOperator<R>,
{
    Ok(residual_norms(client, a, x, b)?.first().copied().unwrap_or(0.0))
}
