//! CPU implementation of Tikhonov learning.

use crate::graph::LaplacianGraph;
use crate::learning::error::LearningResult;
use crate::learning::impl_generic::{classification_tik_impl, regression_tik_impl};
use crate::learning::traits::tikhonov::TikhonovAlgorithms;
use crate::learning::traits::types::{
    ClassificationSolution, TikhonovOptions, TikhonovSolution,
};
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl TikhonovAlgorithms<CpuRuntime> for CpuClient {
    fn regression_tik(
        &self,
        graph: &LaplacianGraph<CpuRuntime>,
        y: &Tensor<CpuRuntime>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<TikhonovSolution<CpuRuntime>> {
        regression_tik_impl(self, graph, y, mask, options)
    }

    fn classification_tik(
        &self,
        graph: &LaplacianGraph<CpuRuntime>,
        y: &Tensor<CpuRuntime>,
        mask: &[bool],
        options: &TikhonovOptions,
    ) -> LearningResult<ClassificationSolution<CpuRuntime>> {
        classification_tik_impl(self, graph, y, mask, options)
    }
}
