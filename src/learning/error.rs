//! Error types for graph learning operations.

use std::fmt;

/// Result type for graph learning operations.
pub type LearningResult<T> = Result<T, LearningError>;

/// Errors that can occur while solving a learning problem on a graph.
#[derive(Debug, Clone)]
pub enum LearningError {
    /// Input sizes disagree (mask length, signal rows, Laplacian shape).
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Invalid parameter value.
    InvalidParameter { parameter: String, message: String },

    /// An observed class label is negative, fractional or not finite.
    InvalidLabel { index: usize, value: f64 },

    /// A linear solve failed (singular system, solver breakdown).
    NumericalError { message: String },

    /// Error from underlying numr operation.
    NumrError(String),
}

impl fmt::Display for LearningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            Self::InvalidParameter { parameter, message } => {
                write!(f, "Invalid parameter '{}': {}", parameter, message)
            }
            Self::InvalidLabel { index, value } => {
                write!(
                    f,
                    "Invalid class label {} at node {}: labels must be non-negative integers",
                    value, index
                )
            }
            Self::NumericalError { message } => {
                write!(f, "Numerical error: {}", message)
            }
            Self::NumrError(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for LearningError {}

impl From<numr::error::Error> for LearningError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}

impl LearningError {
    /// Wrap a failed solve, keeping the backend message.
    pub(crate) fn solve_failed(context: &str, err: impl fmt::Display) -> Self {
        Self::NumericalError {
            message: format!("{} failed: {}", context, err),
        }
    }
}
