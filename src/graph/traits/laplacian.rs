//! Laplacian representations consumed by the learning solvers.

use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::sparse::{CsrData, SparseOps, SparseStorage, SparseTensor};
use numr::tensor::Tensor;

use crate::linalg::CsrOperator;

use super::matrices::GraphMatrixAlgorithms;
use super::types::GraphData;

/// Graph Laplacian in either dense or CSR form.
///
/// The representation decides which solver path the learning algorithms take:
/// dense Laplacians are solved with dense LU, sparse ones with conjugate
/// gradient (soft penalty) or sparse LU (hard constraint).
#[derive(Debug, Clone)]
pub enum Laplacian<R: Runtime<DType = DType>> {
    /// Dense `[n, n]` F64 tensor.
    Dense(Tensor<R>),
    /// CSR sparse `[n, n]` matrix.
    Sparse(CsrData<R>),
}

impl<R: Runtime<DType = DType>> Laplacian<R> {
    /// Matrix shape as `[rows, cols]`.
    pub fn shape(&self) -> [usize; 2] {
        match self {
            Laplacian::Dense(dense) => {
                let shape = dense.shape();
                match shape.len() {
                    2 => [shape[0], shape[1]],
                    1 => [shape[0], 0],
                    _ => [0, 0],
                }
            }
            Laplacian::Sparse(csr) => csr.shape(),
        }
    }

    /// Whether the Laplacian is stored as a sparse matrix.
    pub fn is_sparse(&self) -> bool {
        matches!(self, Laplacian::Sparse(_))
    }

    /// Convert to the dense representation.
    ///
    /// A dense Laplacian is returned as a clone.
    pub fn to_dense<C: SparseOps<R>>(&self, client: &C) -> Result<Laplacian<R>> {
        match self {
            Laplacian::Dense(_) => Ok(self.clone()),
            Laplacian::Sparse(csr) => Ok(Laplacian::Dense(
                CsrOperator::new(client, csr.clone()).to_dense()?,
            )),
        }
    }

    /// Convert to the CSR representation, dropping entries below
    /// [`DROP_TOLERANCE`](crate::linalg::impl_generic::DROP_TOLERANCE) in
    /// magnitude.
    ///
    /// A sparse Laplacian is returned as a clone.
    pub fn to_sparse<C: SparseOps<R>>(&self, client: &C) -> Result<Laplacian<R>> {
        match self {
            Laplacian::Sparse(_) => Ok(self.clone()),
            Laplacian::Dense(dense) => Ok(Laplacian::Sparse(
                CsrOperator::from_dense(client, dense)?.into_csr(),
            )),
        }
    }
}

/// A graph as seen by the learning solvers: a node count and its Laplacian.
///
/// # Construction
///
/// ```ignore
/// use learnr::graph::{GraphData, LaplacianGraph};
///
/// // From a precomputed Laplacian
/// let graph = LaplacianGraph::from_dense(laplacian_tensor)?;
///
/// // From an edge list, through the combinatorial Laplacian
/// let edges = GraphData::from_edge_list::<f64>(&src, &dst, None, n, false, &device)?;
/// let graph = LaplacianGraph::from_graph(&client, &edges, false)?;
/// ```
#[derive(Debug, Clone)]
pub struct LaplacianGraph<R: Runtime<DType = DType>> {
    num_nodes: usize,
    laplacian: Laplacian<R>,
}

impl<R: Runtime<DType = DType>> LaplacianGraph<R> {
    /// Wrap a Laplacian, checking that it is square.
    pub fn new(laplacian: Laplacian<R>) -> Result<Self> {
        let [rows, cols] = laplacian.shape();
        if let Laplacian::Dense(dense) = &laplacian {
            if dense.shape().len() != 2 {
                return Err(Error::InvalidArgument {
                    arg: "laplacian",
                    reason: format!("dense Laplacian must be 2D, got shape {:?}", dense.shape()),
                });
            }
            if dense.dtype() != DType::F64 {
                return Err(Error::InvalidArgument {
                    arg: "laplacian",
                    reason: "dense Laplacian must be F64".to_string(),
                });
            }
        }
        if rows != cols {
            return Err(Error::ShapeMismatch {
                expected: vec![rows, rows],
                got: vec![rows, cols],
            });
        }
        Ok(Self {
            num_nodes: rows,
            laplacian,
        })
    }

    /// Graph with a dense `[n, n]` Laplacian.
    pub fn from_dense(laplacian: Tensor<R>) -> Result<Self> {
        Self::new(Laplacian::Dense(laplacian))
    }

    /// Graph with a CSR `[n, n]` Laplacian.
    pub fn from_sparse(laplacian: CsrData<R>) -> Result<Self> {
        Self::new(Laplacian::Sparse(laplacian))
    }

    /// Build the (optionally normalized) Laplacian of `graph` and wrap it.
    pub fn from_graph<C>(client: &C, graph: &GraphData<R>, normalized: bool) -> Result<Self>
    where
        C: GraphMatrixAlgorithms<R>,
    {
        match client.laplacian_matrix(graph, normalized)?.to_csr()? {
            SparseTensor::Csr(csr) => Self::from_sparse(csr),
            _ => Err(Error::Internal(
                "Laplacian conversion did not produce CSR".to_string(),
            )),
        }
    }

    /// Number of nodes `N`.
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// The Laplacian operator.
    pub fn laplacian(&self) -> &Laplacian<R> {
        &self.laplacian
    }

    /// Same graph with a dense Laplacian.
    pub fn to_dense<C: SparseOps<R>>(&self, client: &C) -> Result<Self> {
        Ok(Self {
            num_nodes: self.num_nodes,
            laplacian: self.laplacian.to_dense(client)?,
        })
    }

    /// Same graph with a sparse Laplacian.
    pub fn to_sparse<C: SparseOps<R>>(&self, client: &C) -> Result<Self> {
        Ok(Self {
            num_nodes: self.num_nodes,
            laplacian: self.laplacian.to_sparse(client)?,
        })
    }
}
