//! Linear algebra building blocks for the learning solvers.
//!
//! - [`LinearOperator`] and its matrix-backed, closure-backed and composite
//!   implementations, all applied on the device through numr
//! - Conjugate gradient on sparse SPD systems (delegated to numr)
//! - Direct sparse LU with a fill-reducing symmetric ordering

pub mod impl_generic;
pub mod traits;

pub use impl_generic::{
    CsrOperator, DenseOperator, FnOperator, MaskedTikhonovOperator, SparseLuSolver,
    conjugate_gradient_impl, residual_norms,
};
pub use traits::{CgConfig, IterativeSolution, LinearOperator, SparseLuConfig};
