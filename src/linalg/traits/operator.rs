//! Linear operator abstraction.

use numr::dtype::DType;
use numr::error::{Error, Result};
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// A linear map `X ↦ A X` over device tensors.
///
/// `X` is a vector `[cols]` or a block of vectors `[cols, k]`; the result has
/// `rows` in place of `cols`.
///
/// Implemented by matrix-backed operators ([`CsrOperator`], [`DenseOperator`]),
/// closures ([`FnOperator`]) and composite operators such as
/// [`MaskedTikhonovOperator`], so an implicit system can be described without
/// materializing its matrix.
///
/// [`CsrOperator`]: crate::linalg::CsrOperator
/// [`DenseOperator`]: crate::linalg::DenseOperator
/// [`FnOperator`]: crate::linalg::FnOperator
/// [`MaskedTikhonovOperator`]: crate::linalg::MaskedTikhonovOperator
pub trait LinearOperator<R: Runtime<DType = DType>> {
    /// Operator shape as `[rows, cols]`.
    fn shape(&self) -> [usize; 2];

    /// Apply the operator to `x`.
    fn apply(&self, x: &Tensor<R>) -> Result<Tensor<R>>;

    /// Dimension of a square operator.
    fn dim(&self) -> usize {
        self.shape()[0]
    }
}

/// Check that `x` is `[cols]` or `[cols, k]` for an operator of `shape`.
pub(crate) fn check_input<R>(shape: [usize; 2], x: &Tensor<R>) -> Result<()>
where
    R: Runtime<DType = DType>,
{
    let dims = x.shape();
    if dims.is_empty() || dims.len() > 2 || dims[0] != shape[1] {
        return Err(Error::ShapeMismatch {
            expected: vec![shape[1]],
            got: dims.to_vec(),
        });
    }
    Ok(())
}
