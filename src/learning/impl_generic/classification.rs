//! Tikhonov classification: one-hot logits, regression, arg-max.

use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::graph::LaplacianGraph;
use crate::learning::error::{LearningError, LearningResult};
use crate::learning::traits::types::{ClassificationSolution, TikhonovOptions};

use super::client::TikhonovClient;
use super::helpers::{SignalLayout, argmax_rows, observed_labels, one_hot, validate_mask};
use super::regression::regression_tik_impl;

/// Solve a classification problem on a graph via Tikhonov minimization.
///
/// The number of classes is `max(label) + 1` over the observed labels
/// (unobserved nodes count as class 0), so with no observed node every
/// prediction is class 0.
pub fn classification_tik_impl<R, C>(
    client: &C,
    graph: &LaplacianGraph<R>,
    y: &Tensor<R>,
    mask: &[bool],
    options: &TikhonovOptions,
) -> LearningResult<ClassificationSolution<R>>
where
    R: Runtime<DType = DType>,
    C: TikhonovClient<R>,
{
    let n = graph.num_nodes();
    validate_mask(mask, n)?;
    let layout = SignalLayout::of(y, n)?;
    if !layout.is_vector {
        return Err(LearningError::InvalidParameter {
            parameter: "y".to_string(),
            message: format!("labels must be a [n] vector, got shape {:?}", y.shape()),
        });
    }

    let values: Vec<f64> = y.contiguous().to_vec();
    let labels = observed_labels(&values, mask)?;
    let (logits, num_classes) = one_hot(&labels)?;

    let device = client.device();
    let logits = Tensor::<R>::from_slice(&logits, &[n, num_classes], device);
    let reconstructed = regression_tik_impl(client, graph, &logits, mask, options)?;

    let scores: Vec<f64> = reconstructed.solution.contiguous().to_vec();
    let predicted = argmax_rows(&scores, num_classes);

    tracing::debug!(nodes = n, num_classes, "tikhonov classification solved");

    Ok(ClassificationSolution {
        labels: Tensor::<R>::from_slice(&predicted, &[n], device),
        logits: reconstructed.solution,
        num_classes,
        report: reconstructed.report,
    })
}
