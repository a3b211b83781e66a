//! CPU implementation of graph matrix algorithms.

use crate::graph::impl_generic::laplacian_matrix_impl;
use crate::graph::traits::matrices::GraphMatrixAlgorithms;
use crate::graph::traits::types::GraphData;
use numr::error::Result;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::sparse::SparseTensor;

impl GraphMatrixAlgorithms<CpuRuntime> for CpuClient {
    fn laplacian_matrix(
        &self,
        graph: &GraphData<CpuRuntime>,
        normalized: bool,
    ) -> Result<SparseTensor<CpuRuntime>> {
        laplacian_matrix_impl(self, graph, normalized)
    }
}
