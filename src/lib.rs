//! learnr - Semi-Supervised Learning on Graphs
//!
//! learnr reconstructs a signal defined on the nodes of a graph from a partial
//! observation by Tikhonov minimization. Real-valued signals are recovered by
//! regression; integer class labels by one-hot regression followed by an
//! arg-max. Built on numr's tensors and solvers, it works on the CPU and,
//! with the `cuda` feature, on NVIDIA GPUs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  learning   regression_tik / classification_tik          │
//! └──────────────┬───────────────────────────┬──────────────┘
//!                │ uses                      │ uses
//! ┌──────────────▼──────────────┐ ┌──────────▼──────────────┐
//! │  graph                       │ │  linalg                  │
//! │  GraphData, Laplacians       │ │  operators, CG, sparse LU│
//! └──────────────┬──────────────┘ └──────────┬──────────────┘
//!                │                           │
//! ┌──────────────▼───────────────────────────▼──────────────┐
//! │                       numr                               │
//! │     (tensors, sparse formats, dense/sparse solvers)      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`graph`] - Graph construction and Laplacian matrices (dense or sparse)
//! - [`linalg`] - Linear operators, conjugate gradient, sparse LU
//! - [`learning`] - Tikhonov regression and classification
//!
//! # Backend Support
//!
//! learnr is generic over numr's `Runtime` trait. Backends:
//! - CPU
//! - CUDA (NVIDIA GPUs), behind the `cuda` feature
//!
//! The sparse hard-constraint path factors on the host, since numr's sparse
//! LU runs on the CPU.
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | CUDA 12.x, numr/cuda |
//!
//! # Example
//!
//! ```ignore
//! use learnr::{LaplacianGraph, TikhonovAlgorithms, TikhonovOptions};
//! use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! // Path graph 0 - 1 - 2 - 3
//! let lap = Tensor::<CpuRuntime>::from_slice(
//!     &[1.0, -1.0, 0.0, 0.0,
//!       -1.0, 2.0, -1.0, 0.0,
//!       0.0, -1.0, 2.0, -1.0,
//!       0.0, 0.0, -1.0, 1.0],
//!     &[4, 4],
//!     &device,
//! );
//! let graph = LaplacianGraph::from_dense(lap)?;
//!
//! let y = Tensor::<CpuRuntime>::from_slice(&[0.0, f64::NAN, f64::NAN, 3.0], &[4], &device);
//! let result = client.regression_tik(&graph, &y, &[true, false, false, true], &TikhonovOptions::default())?;
//! assert_eq!(result.solution.to_vec::<f64>(), vec![0.0, 1.0, 2.0, 3.0]);
//! ```

pub mod graph;
pub mod learning;
pub mod linalg;

// Re-export main types for convenience
pub use graph::{GraphData, GraphMatrixAlgorithms, Laplacian, LaplacianGraph};
pub use learning::{
    ClassificationSolution, ColumnReport, LearningError, LearningResult, SolveReport, SolverPath,
    TikhonovAlgorithms, TikhonovOptions, TikhonovSolution,
};
pub use linalg::{CgConfig, LinearOperator, SparseLuConfig};

// Re-export numr types that users will commonly need
pub use numr::dtype::DType;
pub use numr::error::{Error, Result};
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
