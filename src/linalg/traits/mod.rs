pub mod operator;
pub mod types;

pub use operator::LinearOperator;
pub use types::{CgConfig, IterativeSolution, SparseLuConfig};
