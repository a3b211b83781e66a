//! Generic implementations of the linear-algebra building blocks.

pub mod conjugate_gradient;
pub mod operator;
pub mod sparse_lu;
pub mod symbolic_analysis;

pub use conjugate_gradient::conjugate_gradient_impl;
pub use operator::{
    CsrOperator, DROP_TOLERANCE, DenseOperator, FnOperator, MaskedTikhonovOperator, column,
    index_tensor, residual_norms, scatter_matrix, selection_matrix,
};
pub use sparse_lu::SparseLuSolver;
