//! Shared helper functions for graph matrix construction.

use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::sparse::{SparseStorage, SparseTensor};

use crate::graph::traits::types::GraphData;

/// Host copy of a CSR adjacency matrix.
pub struct CsrArrays<R: Runtime<DType = DType>> {
    pub row_ptrs: Vec<i64>,
    pub col_indices: Vec<i64>,
    pub values: Vec<f64>,
    pub num_nodes: usize,
    pub device: R::Device,
}

/// Extract the CSR arrays of a graph's adjacency as CPU vecs.
///
/// Laplacian assembly walks rows sequentially, so the arrays are pulled to
/// the host once at the API boundary.
pub fn extract_csr_arrays<R: Runtime<DType = DType>>(
    graph: &GraphData<R>,
) -> Result<CsrArrays<R>> {
    let csr = match &graph.adjacency {
        SparseTensor::Csr(csr) => csr,
        _ => {
            return Err(Error::InvalidArgument {
                arg: "graph",
                reason: "Graph adjacency must be in CSR format. Call to_csr() first.".to_string(),
            });
        }
    };

    let [rows, cols] = csr.shape();
    if rows != cols || rows != graph.num_nodes {
        return Err(Error::ShapeMismatch {
            expected: vec![graph.num_nodes, graph.num_nodes],
            got: vec![rows, cols],
        });
    }

    Ok(CsrArrays {
        row_ptrs: csr.row_ptrs().to_vec(),
        col_indices: csr.col_indices().to_vec(),
        values: csr.values().to_vec(),
        num_nodes: graph.num_nodes,
        device: csr.values().device().clone(),
    })
}
