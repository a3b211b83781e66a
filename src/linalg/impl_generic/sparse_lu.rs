//! Direct sparse LU solver.
//!
//! The matrix is optionally reordered with a symmetric COLAMD permutation
//! (`B = P A Pᵀ`), which keeps the diagonal on the diagonal so no row matching
//! is needed. `P A Pᵀ` is formed as a product of selection matrices and the
//! right-hand side and solution are permuted with `index_select`; numr
//! performs the numeric factorization and the triangular solves.
//!
//! ```text
//! factor:  CSR → CSC pattern → COLAMD → P A Pᵀ → LuSymbolic → numeric LU
//! solve:   b → P b → LU solve → Pᵀ z
//! ```

use numr::algorithm::sparse_linalg::{
    ColamdOptions, LuFactors, LuOptions, LuWorkspace, colamd,
    sparse_lu_cpu_with_workspace_and_metrics, sparse_lu_solve_cpu,
};
use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::ops::IndexingOps;
use numr::runtime::Runtime;
use numr::sparse::{CsrData, SparseOps, SparseStorage, SparseTensor};
use numr::tensor::Tensor;

use crate::linalg::impl_generic::operator::{index_tensor, scatter_matrix, selection_matrix};
use crate::linalg::impl_generic::symbolic_analysis::lu_symbolic;
use crate::linalg::traits::types::SparseLuConfig;

/// A factored sparse matrix, reusable across right-hand sides.
pub struct SparseLuSolver<R: Runtime<DType = DType>> {
    n: usize,
    /// I64 `[n]`: position `i` holds original index `perm[i]`.
    perm: Tensor<R>,
    /// I64 `[n]`: inverse of `perm`.
    inverse_perm: Tensor<R>,
    factors: LuFactors<R>,
}

impl<R: Runtime<DType = DType>> SparseLuSolver<R> {
    /// Factor a square sparse matrix.
    pub fn factor<C>(client: &C, matrix: &CsrData<R>, config: &SparseLuConfig) -> Result<Self>
    where
        C: SparseOps<R>,
    {
        let [n, cols] = matrix.shape();
        if n != cols {
            return Err(Error::ShapeMismatch {
                expected: vec![n, n],
                got: vec![n, cols],
            });
        }
        if n == 0 {
            return Err(Error::InvalidArgument {
                arg: "matrix",
                reason: "cannot factor an empty matrix".to_string(),
            });
        }
        let device = matrix.values().device();

        let perm: Vec<usize> = if config.fill_reducing {
            let csc = matrix.to_csc()?;
            let col_ptrs: Vec<i64> = csc.col_ptrs().to_vec();
            let row_indices: Vec<i64> = csc.row_indices().to_vec();
            let (perm, _stats) = colamd(n, n, &col_ptrs, &row_indices, &ColamdOptions::default())?;
            perm
        } else {
            (0..n).collect()
        };

        let permuted = if perm.iter().enumerate().all(|(i, &p)| i == p) {
            matrix.clone()
        } else {
            let select = SparseTensor::Csr(selection_matrix::<R>(&perm, n, device)?);
            let scatter = SparseTensor::Csr(scatter_matrix::<R>(&perm, n, device)?);
            let left = client.sparse_matmul(&select, &SparseTensor::Csr(matrix.clone()))?;
            match client.sparse_matmul(&left, &scatter)?.to_csr()? {
                SparseTensor::Csr(csr) => csr,
                _ => {
                    return Err(Error::Internal(
                        "permuted matrix is not in CSR format".to_string(),
                    ));
                }
            }
        };

        let csc = permuted.to_csc()?;
        let col_ptrs: Vec<i64> = csc.col_ptrs().to_vec();
        let row_indices: Vec<i64> = csc.row_indices().to_vec();
        let symbolic = lu_symbolic(n, &col_ptrs, &row_indices);
        let mut workspace = LuWorkspace::new(n, &symbolic);
        let options = LuOptions {
            pivot_tolerance: config.pivot_tolerance,
            pivot_threshold: config.pivot_threshold,
            diagonal_shift: config.diagonal_shift,
            check_zeros: true,
        };

        let (factors, metrics) =
            sparse_lu_cpu_with_workspace_and_metrics(&csc, &symbolic, &options, &mut workspace)?;

        tracing::debug!(
            n,
            nnz = matrix.nnz(),
            l_nnz = metrics.l_nnz,
            u_nnz = metrics.u_nnz,
            pivot_growth = metrics.pivot_growth,
            small_pivots = metrics.small_pivots,
            "sparse LU factored"
        );

        let mut inverse = vec![0usize; n];
        for (i, &p) in perm.iter().enumerate() {
            inverse[p] = i;
        }

        Ok(Self {
            n,
            perm: index_tensor::<R>(&perm, device),
            inverse_perm: index_tensor::<R>(&inverse, device),
            factors,
        })
    }

    /// Solve `A x = b` for a `[n]` right-hand side with the cached factors.
    pub fn solve<C>(&self, client: &C, b: &Tensor<R>) -> Result<Tensor<R>>
    where
        C: IndexingOps<R>,
    {
        if b.shape().len() != 1 || b.shape()[0] != self.n {
            return Err(Error::ShapeMismatch {
                expected: vec![self.n],
                got: b.shape().to_vec(),
            });
        }

        let b_perm = client.index_select(b, 0, &self.perm)?;
        let z = sparse_lu_solve_cpu(&self.factors, &b_perm)?;
        client.index_select(&z, 0, &self.inverse_perm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::impl_generic::operator::CsrOperator;
    use crate::linalg::traits::operator::LinearOperator;
    use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    fn setup() -> (CpuDevice, CpuClient) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (device, client)
    }

    fn tridiagonal(n: usize, device: &CpuDevice) -> CsrData<CpuRuntime> {
        let mut row_ptrs = vec![0i64];
        let mut cols = Vec::new();
        let mut vals = Vec::new();
        for i in 0..n {
            if i > 0 {
                cols.push(i as i64 - 1);
                vals.push(-1.0f64);
            }
            cols.push(i as i64);
            vals.push(2.0);
            if i + 1 < n {
                cols.push(i as i64 + 1);
                vals.push(-1.0);
            }
            row_ptrs.push(cols.len() as i64);
        }
        CsrData::from_slices(&row_ptrs, &cols, &vals, [n, n], device).unwrap()
    }

    #[test]
    fn test_solve_tridiagonal() {
        let (device, client) = setup();
        let a = tridiagonal(5, &device);
        let x_true = [1.0, -2.0, 3.0, 0.5, 4.0];
        let x_tensor = Tensor::<CpuRuntime>::from_slice(&x_true, &[5], &device);
        let b = CsrOperator::new(&client, a.clone()).apply(&x_tensor).unwrap();

        for fill_reducing in [true, false] {
            let config = SparseLuConfig {
                fill_reducing,
                ..Default::default()
            };
            let solver = SparseLuSolver::<CpuRuntime>::factor(&client, &a, &config).unwrap();
            let x: Vec<f64> = solver.solve(&client, &b).unwrap().to_vec();
            for (xi, ti) in x.iter().zip(&x_true) {
                assert!((xi - ti).abs() < 1e-10, "x = {:?}", x);
            }
        }
    }

    #[test]
    fn test_solve_unsymmetric_pattern() {
        let (device, client) = setup();
        // [[4, 0, 1], [0, 5, 0], [2, 0, 6]]
        let a = CsrData::<CpuRuntime>::from_slices(
            &[0, 2, 3, 5],
            &[0, 2, 1, 0, 2],
            &[4.0f64, 1.0, 5.0, 2.0, 6.0],
            [3, 3],
            &device,
        )
        .unwrap();
        let b = Tensor::<CpuRuntime>::from_slice(&[5.0, 10.0, 8.0], &[3], &device);

        let solver = SparseLuSolver::<CpuRuntime>::factor(&client, &a, &SparseLuConfig::default())
            .unwrap();
        let x: Vec<f64> = solver.solve(&client, &b).unwrap().to_vec();
        for (xi, ti) in x.iter().zip(&[1.0, 2.0, 1.0]) {
            assert!((xi - ti).abs() < 1e-10, "x = {:?}", x);
        }
    }

    #[test]
    fn test_solve_rejects_wrong_rhs_length() {
        let (device, client) = setup();
        let solver = SparseLuSolver::<CpuRuntime>::factor(
            &client,
            &tridiagonal(3, &device),
            &SparseLuConfig::default(),
        )
        .unwrap();
        let b = Tensor::<CpuRuntime>::from_slice(&[1.0, 2.0], &[2], &device);
        assert!(solver.solve(&client, &b).is_err());
    }

    #[test]
    fn test_factor_rejects_non_square() {
        let (device, client) = setup();
        let a = CsrData::<CpuRuntime>::from_slices(&[0, 1], &[1], &[1.0f64], [1, 2], &device)
            .unwrap();
        assert!(
            SparseLuSolver::<CpuRuntime>::factor(&client, &a, &SparseLuConfig::default()).is_err()
        );
    }

    #[test]
    fn test_factor_reports_singular_matrix() {
        let (device, client) = setup();
        // Two disconnected blocks, the second all zero
        let a = CsrData::<CpuRuntime>::from_slices(
            &[0, 1, 2],
            &[0, 1],
            &[1.0f64, 0.0],
            [2, 2],
            &device,
        )
        .unwrap();
        assert!(
            SparseLuSolver::<CpuRuntime>::factor(&client, &a, &SparseLuConfig::default()).is_err()
        );
    }
}
