//! CUDA implementation of Tikhonov learning.
//!
//! Graph-sized bookkeeping runs on the host; the dense solves, products and
//! CG iterations run on the device.

use crate::graph::LaplacianGraph;
use crate::learning::error::LearningResult;
use crate::learning::impl_generic::{classification_tik_impl, regression_tik_impl};
use crate::learning::traits::tikhonov::TikhonovAlgorithms;
use crate::learning::traits::types::{
    ClassificationSolution, TikhonovOptions, TikhonovSolution,
};
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl TikhonovAlgorithms<CudaRuntime> for CudaClient {
    fn regression_tik(
        &self,
        graph: &LaplacianGraph<CudaRuntime>,
        y: &Tensor<CudaRuntime>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<TikhonovSolution<CudaRuntime>> {
        regression_tik_impl(self, graph, y, mask, options)
    }

    fn classification_tik(
        &self,
        graph: &LaplacianGraph<CudaRuntime>,
        y: &Tensor<CudaRuntime>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<ClassificationSolution<CudaRuntime>> {
        classification_tik_impl(self, graph, y, mask, options)
    }
}
