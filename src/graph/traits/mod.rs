pub mod laplacian;
pub mod matrices;
pub mod types;

pub use laplacian::{Laplacian, LaplacianGraph};
pub use matrices::GraphMatrixAlgorithms;
pub use types::GraphData;
