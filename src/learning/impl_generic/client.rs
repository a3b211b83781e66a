//! Unified client trait for the Tikhonov solvers.

use numr::algorithm::iterative::IterativeSolvers;
use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::dtype::DType;
use numr::ops::{BinaryOps, IndexingOps, MatmulOps, ReduceOps, ScalarOps, ShapeOps};
use numr::runtime::{Runtime, RuntimeClient};
use numr::sparse::SparseOps;

/// Client capabilities needed by regression and classification.
///
/// Dense solves go through `LinearAlgebraAlgorithms`, sparse products and
/// conversions through `SparseOps`, CG through `IterativeSolvers`. Row
/// selection, permutations and residuals use the elementwise, indexing,
/// reduction and shape ops.
pub trait TikhonovClient<R: Runtime<DType = DType>>:
    LinearAlgebraAlgorithms<R>
    + IterativeSolvers<R>
    + SparseOps<R>
    + MatmulOps<R>
    + IndexingOps<R>
    + BinaryOps<R>
    + ScalarOps<R>
    + ReduceOps<R>
    + ShapeOps<R>
    + RuntimeClient<R>
{
}

impl<R, T> TikhonovClient<R> for T
where
    R: Runtime<DType = DType>,
    T: LinearAlgebraAlgorithms<R>
        + IterativeSolvers<R>
        + SparseOps<R>
        + MatmulOps<R>
        + IndexingOps<R>
        + BinaryOps<R>
        + ScalarOps<R>
        + ReduceOps<R>
        + ShapeOps<R>
        + RuntimeClient<R>,
{
}
