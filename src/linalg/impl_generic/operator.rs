//! Matrix-backed, closure-backed and composite linear operators.
//!
//! Operators borrow a numr client and apply themselves on the device: SpMV or
//! SpMM for CSR, matmul for dense. Index sets such as the observed nodes or a
//! fill-reducing ordering become selection matrices or I64 index tensors, so
//! submatrices and permutations are numr products as well.

use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::ops::{BinaryOps, IndexingOps, MatmulOps, ReduceOps, ScalarOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::sparse::{CsrData, SparseOps, SparseStorage, SparseTensor};
use numr::tensor::Tensor;

use crate::linalg::traits::operator::{LinearOperator, check_input};

/// Magnitude below which dense entries are dropped when converting to CSR.
pub const DROP_TOLERANCE: f64 = 1e-15;

/// I64 index tensor for `index_select`.
pub fn index_tensor<R: Runtime<DType = DType>>(indices: &[usize], device: &R::Device) -> Tensor<R> {
    let indices: Vec<i64> = indices.iter().map(|&i| i as i64).collect();
    Tensor::<R>::from_slice(&indices, &[indices.len()], device)
}

/// Selection matrix `S` (`[k, n]`) with `(S x)[r] = x[indices[r]]`.
pub fn selection_matrix<R: Runtime<DType = DType>>(
    indices: &[usize],
    n: usize,
    device: &R::Device,
) -> Result<CsrData<R>> {
    check_indices(indices, n, "indices")?;
    let row_ptrs: Vec<i64> = (0..=indices.len() as i64).collect();
    let col_indices: Vec<i64> = indices.iter().map(|&i| i as i64).collect();
    let values = vec![1.0f64; indices.len()];
    CsrData::from_slices(&row_ptrs, &col_indices, &values, [indices.len(), n], device)
}

/// Scatter matrix `Sᵀ` (`[n, k]`): places row `r` of its input at `indices[r]`
/// and leaves the other rows zero.
pub fn scatter_matrix<R: Runtime<DType = DType>>(
    indices: &[usize],
    n: usize,
    device: &R::Device,
) -> Result<CsrData<R>> {
    selection_matrix::<R>(indices, n, device)?.transpose().to_csr()
}

/// Euclidean norm of `b − A x` for each column of `x`.
///
/// Returns one norm for a vector `[n]` and `k` norms for a block `[n, k]`.
pub fn residual_norms<R, C, A>(client: &C, a: &A, x: &Tensor<R>, b: &Tensor<R>) -> Result<Vec<f64>>
where
    R: Runtime<DType = DType>,
    C: BinaryOps<R> + ReduceOps<R>,
    A: LinearOperator<R> + ?Sized,
{
    let ax = a.apply(x)?;
    if ax.shape() != b.shape() {
        return Err(Error::ShapeMismatch {
            expected: ax.shape().to_vec(),
            got: b.shape().to_vec(),
        });
    }
    let r = client.sub(b, &ax)?;
    let squared = client.sum(&client.mul(&r, &r)?, &[0], false)?;
    Ok(squared
        .contiguous()
        .to_vec::<f64>()
        .into_iter()
        .map(f64::sqrt)
        .collect())
}

/// Column `j` of a `[n, k]` block, as a `[n]` vector.
pub fn column<R, C>(client: &C, x: &Tensor<R>, j: usize) -> Result<Tensor<R>>
where
    R: Runtime<DType = DType>,
    C: IndexingOps<R>,
{
    let n = x.shape()[0];
    let index = index_tensor::<R>(&[j], x.device());
    client.index_select(x, 1, &index)?.reshape(&[n])
}

/// Sparse matrix in CSR layout, applied with numr SpMV/SpMM.
#[derive(Debug, Clone)]
pub struct CsrOperator<'a, R: Runtime<DType = DType>, C> {
    client: &'a C,
    csr: CsrData<R>,
}

impl<'a, R, C> CsrOperator<'a, R, C>
where
    R: Runtime<DType = DType>,
    C: SparseOps<R>,
{
    pub fn new(client: &'a C, csr: CsrData<R>) -> Self {
        Self { client, csr }
    }

    /// Sparse copy of a dense matrix, dropping entries below [`DROP_TOLERANCE`].
    pub fn from_dense(client: &'a C, dense: &Tensor<R>) -> Result<Self> {
        if dense.shape().len() != 2 {
            return Err(Error::InvalidArgument {
                arg: "dense",
                reason: format!("expected a 2D matrix, got shape {:?}", dense.shape()),
            });
        }
        let csr = client.dense_to_csr(dense, DROP_TOLERANCE)?;
        Ok(Self { client, csr })
    }

    pub fn csr(&self) -> &CsrData<R> {
        &self.csr
    }

    pub fn into_csr(self) -> CsrData<R> {
        self.csr
    }

    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    fn sparse(&self) -> SparseTensor<R> {
        SparseTensor::Csr(self.csr.clone())
    }

    /// Dense copy.
    pub fn to_dense(&self) -> Result<Tensor<R>> {
        self.client.sparse_to_dense(&self.sparse())
    }

    /// Multiply every stored value by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Self> {
        let scaled = self.client.sparse_scale(&self.sparse(), factor)?;
        Ok(Self {
            client: self.client,
            csr: expect_csr(scaled)?,
        })
    }

    /// Extract `A[rows, cols]` as `S_rows · A · S_colsᵀ`, keeping the order
    /// given by `rows` and `cols`.
    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Result<Self> {
        let [n_rows, n_cols] = self.shape();
        let device = self.csr.values().device();
        let select_rows = selection_matrix::<R>(rows, n_rows, device)?;
        let scatter_cols = scatter_matrix::<R>(cols, n_cols, device)?;

        let left = self
            .client
            .sparse_matmul(&SparseTensor::Csr(select_rows), &self.sparse())?;
        let block = self
            .client
            .sparse_matmul(&left, &SparseTensor::Csr(scatter_cols))?;
        Ok(Self {
            client: self.client,
            csr: expect_csr(block)?,
        })
    }
}

impl<R, C> LinearOperator<R> for CsrOperator<'_, R, C>
where
    R: Runtime<DType = DType>,
    C: SparseOps<R>,
{
    fn shape(&self) -> [usize; 2] {
        self.csr.shape()
    }

    fn apply(&self, x: &Tensor<R>) -> Result<Tensor<R>> {
        check_input(self.shape(), x)?;
        let x = x.contiguous();
        if x.shape().len() == 1 {
            self.client.spmv(&self.sparse(), &x)
        } else {
            self.client.spmm(&self.sparse(), &x)
        }
    }
}

/// Dense `[rows, cols]` F64 matrix, applied with numr matmul.
#[derive(Debug, Clone)]
pub struct DenseOperator<'a, R: Runtime<DType = DType>, C> {
    client: &'a C,
    matrix: Tensor<R>,
}

impl<'a, R, C> DenseOperator<'a, R, C>
where
    R: Runtime<DType = DType>,
    C: MatmulOps<R> + IndexingOps<R>,
{
    pub fn new(client: &'a C, matrix: Tensor<R>) -> Result<Self> {
        if matrix.shape().len() != 2 {
            return Err(Error::InvalidArgument {
                arg: "matrix",
                reason: format!("expected a 2D matrix, got shape {:?}", matrix.shape()),
            });
        }
        if matrix.dtype() != DType::F64 {
            return Err(Error::InvalidArgument {
                arg: "matrix",
                reason: "expected an F64 matrix".to_string(),
            });
        }
        Ok(Self {
            client,
            matrix: matrix.contiguous(),
        })
    }

    pub fn matrix(&self) -> &Tensor<R> {
        &self.matrix
    }

    /// Extract `A[rows, cols]`.
    pub fn submatrix(&self, rows: &[usize], cols: &[usize]) -> Result<Self> {
        let [n_rows, n_cols] = self.shape();
        check_indices(rows, n_rows, "rows")?;
        check_indices(cols, n_cols, "cols")?;
        let device = self.matrix.device();
        let picked = self
            .client
            .index_select(&self.matrix, 0, &index_tensor::<R>(rows, device))?;
        let block = self
            .client
            .index_select(&picked, 1, &index_tensor::<R>(cols, device))?;
        Ok(Self {
            client: self.client,
            matrix: block,
        })
    }
}

impl<R, C> LinearOperator<R> for DenseOperator<'_, R, C>
where
    R: Runtime<DType = DType>,
    C: MatmulOps<R> + IndexingOps<R>,
{
    fn shape(&self) -> [usize; 2] {
        let shape = self.matrix.shape();
        [shape[0], shape[1]]
    }

    fn apply(&self, x: &Tensor<R>) -> Result<Tensor<R>> {
        let [rows, cols] = self.shape();
        check_input([rows, cols], x)?;
        let x = x.contiguous();
        if x.shape().len() == 1 {
            let column = x.reshape(&[cols, 1])?;
            self.client.matmul(&self.matrix, &column)?.reshape(&[rows])
        } else {
            self.client.matmul(&self.matrix, &x)
        }
    }
}

/// Operator defined by a closure over tensors.
pub struct FnOperator<R, F>
where
    R: Runtime<DType = DType>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
{
    shape: [usize; 2],
    f: F,
    _runtime: std::marker::PhantomData<R>,
}

impl<R, F> FnOperator<R, F>
where
    R: Runtime<DType = DType>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
{
    /// Wrap `f`, which must map `[shape[1]]` or `[shape[1], k]` inputs to
    /// `[shape[0]]` or `[shape[0], k]`.
    pub fn new(shape: [usize; 2], f: F) -> Self {
        Self {
            shape,
            f,
            _runtime: std::marker::PhantomData,
        }
    }
}

impl<R, F> LinearOperator<R> for FnOperator<R, F>
where
    R: Runtime<DType = DType>,
    F: Fn(&Tensor<R>) -> Result<Tensor<R>>,
{
    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn apply(&self, x: &Tensor<R>) -> Result<Tensor<R>> {
        check_input(self.shape, x)?;
        let y = (self.f)(x)?;
        let rows = y.shape().first().copied();
        if rows != Some(self.shape[0]) || y.shape().len() != x.shape().len() {
            return Err(Error::ShapeMismatch {
                expected: vec![self.shape[0]],
                got: y.shape().to_vec(),
            });
        }
        Ok(y)
    }
}

/// The Tikhonov system operator `x ↦ M⊙x + tau·(L x)`.
///
/// `M` is the observation mask and `L` any square operator, usually a graph
/// Laplacian.
pub struct MaskedTikhonovOperator<'a, R: Runtime<DType = DType>, C, L> {
    client: &'a C,
    mask: &'a [bool],
    /// `M` as an F64 `[n]` tensor of zeros and ones.
    weights: Tensor<R>,
    tau: f64,
    laplacian: &'a L,
}

impl<'a, R, C, L> MaskedTikhonovOperator<'a, R, C, L>
where
    R: Runtime<DType = DType>,
    C: RuntimeClient<R>,
    L: LinearOperator<R>,
{
    pub fn new(client: &'a C, mask: &'a [bool], tau: f64, laplacian: &'a L) -> Result<Self> {
        let [rows, cols] = laplacian.shape();
        if rows != cols {
            return Err(Error::ShapeMismatch {
                expected: vec![rows, rows],
                got: vec![rows, cols],
            });
        }
        if mask.len() != rows {
            return Err(Error::ShapeMismatch {
                expected: vec![rows],
                got: vec![mask.len()],
            });
        }
        let weights: Vec<f64> = mask.iter().map(|&m| if m { 1.0 } else { 0.0 }).collect();
        Ok(Self {
            client,
            mask,
            weights: Tensor::<R>::from_slice(&weights, &[rows], client.device()),
            tau,
            laplacian,
        })
    }
}

impl<R, C> MaskedTikhonovOperator<'_, R, C, CsrOperator<'_, R, C>>
where
    R: Runtime<DType = DType>,
    C: SparseOps<R> + RuntimeClient<R>,
{
    /// Materialize `diag(M) + tau·L` as a CSR matrix: the pattern of `L` plus
    /// any missing diagonal entries of observed rows.
    pub fn assemble(&self) -> Result<CsrData<R>> {
        let scaled = self.laplacian.scaled(self.tau)?;
        let observed: Vec<usize> = (0..self.mask.len()).filter(|&i| self.mask[i]).collect();
        if observed.is_empty() {
            return Ok(scaled.into_csr());
        }

        let n = self.mask.len();
        let device = self.client.device();
        let mut row_ptrs = Vec::with_capacity(n + 1);
        row_ptrs.push(0i64);
        for &m in self.mask {
            let last = row_ptrs[row_ptrs.len() - 1];
            row_ptrs.push(last + i64::from(m));
        }
        let cols: Vec<i64> = observed.iter().map(|&i| i as i64).collect();
        let ones = vec![1.0f64; cols.len()];
        let diagonal = CsrData::<R>::from_slices(&row_ptrs, &cols, &ones, [n, n], device)?;

        let system = self.client.sparse_add(
            &SparseTensor::Csr(scaled.into_csr()),
            &SparseTensor::Csr(diagonal),
        )?;
        expect_csr(system)
    }
}

impl<R, C> MaskedTikhonovOperator<'_, R, C, DenseOperator<'_, R, C>>
where
    R: Runtime<DType = DType>,
    C: LinearAlgebraAlgorithms<R>
        + MatmulOps<R>
        + IndexingOps<R>
        + BinaryOps<R>
        + ScalarOps<R>
        + RuntimeClient<R>,
{
    /// Materialize `diag(M) + tau·L` densely.
    pub fn assemble(&self) -> Result<Tensor<R>> {
        let scaled = self.client.mul_scalar(self.laplacian.matrix(), self.tau)?;
        let diagonal = LinearAlgebraAlgorithms::diagflat(self.client, &self.weights)?;
        self.client.add(&scaled, &diagonal)
    }
}

impl<R, C, L> LinearOperator<R> for MaskedTikhonovOperator<'_, R, C, L>
where
    R: Runtime<DType = DType>,
    C: BinaryOps<R> + ScalarOps<R>,
    L: LinearOperator<R>,
{
    fn shape(&self) -> [usize; 2] {
        self.laplacian.shape()
    }

    fn apply(&self, x: &Tensor<R>) -> Result<Tensor<R>> {
        check_input(self.shape(), x)?;
        let smooth = self
            .client
            .mul_scalar(&self.laplacian.apply(x)?, self.tau)?;
        let weights = if x.shape().len() == 2 {
            self.weights.reshape(&[self.mask.len(), 1])?
        } else {
            self.weights.clone()
        };
        let data = self.client.mul(x, &weights)?;
        self.client.add(&data, &smooth)
    }
}

fn expect_csr<R: Runtime<DType = DType>>(sparse: SparseTensor<R>) -> Result<CsrData<R>> {
    match sparse {
        SparseTensor::Csr(csr) => Ok(csr),
        other => match other.to_csr()? {
            SparseTensor::Csr(csr) => Ok(csr),
            _ => Err(Error::Internal("sparse conversion did not produce CSR".to_string())),
        },
    }
}

fn check_indices(indices: &[usize], bound: usize, arg: &'static str) -> Result<()> {
    if let Some(&i) = indices.iter().find(|&&i| i >= bound) {
        return Err(Error::InvalidArgument {
            arg,
            reason: format!("index {i} out of range for dimension {bound}"),
        });
    }
    Ok(())
}
