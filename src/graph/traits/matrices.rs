//! Graph matrix construction traits.

use numr::dtype::DType;
use numr::error::Result;
use numr::runtime::Runtime;
use numr::sparse::SparseTensor;

use super::types::GraphData;

/// Graph matrix construction algorithms.
pub trait GraphMatrixAlgorithms<R: Runtime<DType = DType>> {
    /// Compute the graph Laplacian matrix in CSR form.
    ///
    /// L = D - W, where W holds the edge weights and D the weighted degrees
    /// (row sums of W, self-loops excluded).
    /// If normalized: L_norm = I - D^{-1/2} W D^{-1/2}. Isolated nodes keep a
    /// unit diagonal.
    fn laplacian_matrix(&self, graph: &GraphData<R>, normalized: bool) -> Result<SparseTensor<R>>;
}
