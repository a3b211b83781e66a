pub mod tikhonov;
pub mod types;

pub use tikhonov::TikhonovAlgorithms;
pub use types::{
    ClassificationSolution, ColumnReport, SolveReport, SolverPath, TikhonovOptions,
    TikhonovSolution,
};
