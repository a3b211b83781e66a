//! Graphs and their Laplacians.
//!
//! - [`GraphData`]: sparse adjacency built from an edge list
//! - [`GraphMatrixAlgorithms`]: combinatorial and normalized Laplacians
//! - [`LaplacianGraph`]: a node count plus a dense or sparse Laplacian, the
//!   input of the learning solvers

mod cpu;
pub mod impl_generic;
pub mod traits;

#[cfg(feature = "cuda")]
mod cuda;

pub use traits::*;
