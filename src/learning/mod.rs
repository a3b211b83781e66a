//! Semi-supervised learning on graphs.
//!
//! Given a graph Laplacian and a signal observed on a subset of the nodes,
//! reconstruct the signal everywhere by Tikhonov minimization:
//!
//! - [`TikhonovAlgorithms::regression_tik`]: real-valued `[n]` or `[n, c]`
//!   signals
//! - [`TikhonovAlgorithms::classification_tik`]: integer class labels,
//!   solved as one-hot regression followed by a row-wise arg-max
//!
//! `tau > 0` trades data fidelity against smoothness; `tau == 0` keeps the
//! observed values exactly and interpolates harmonically.
//!
//! # Example
//!
//! ```ignore
//! use learnr::graph::{GraphData, LaplacianGraph};
//! use learnr::learning::{TikhonovAlgorithms, TikhonovOptions};
//! use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let graph = GraphData::from_edge_list::<f64>(&[0, 1, 2], &[1, 2, 3], None, 4, false, &device)?;
//! let graph = LaplacianGraph::from_graph(&client, &graph, false)?;
//!
//! let y = Tensor::<CpuRuntime>::from_slice(&[0.0, f64::NAN, f64::NAN, 3.0], &[4], &device);
//! let mask = [true, false, false, true];
//! let result = client.regression_tik(&graph, &y, &mask, &TikhonovOptions::default())?;
//! // result.solution == [0, 1, 2, 3]
//! ```

mod cpu;
pub mod error;
pub mod impl_generic;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

pub use error::{LearningError, LearningResult};
pub use traits::*;
