//! Input validation and label encoding shared by the solvers.

use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

use crate::learning::error::{LearningError, LearningResult};

/// Shape of a graph signal: `[n]` or `[n, c]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalLayout {
    pub num_nodes: usize,
    pub num_columns: usize,
    /// True for a rank-1 `[n]` signal.
    pub is_vector: bool,
}

impl SignalLayout {
    /// Layout of `y`, checked against the graph size.
    pub fn of<R: Runtime<DType = DType>>(y: &Tensor<R>, num_nodes: usize) -> LearningResult<Self> {
        if y.dtype() != DType::F64 {
            return Err(LearningError::InvalidParameter {
                parameter: "y".to_string(),
                message: "signal must be F64".to_string(),
            });
        }
        let shape = y.shape();
        let (rows, num_columns, is_vector) = match shape.len() {
            1 => (shape[0], 1, true),
            2 => (shape[0], shape[1], false),
            _ => {
                return Err(LearningError::InvalidParameter {
                    parameter: "y".to_string(),
                    message: format!("signal must be [n] or [n, c], got shape {:?}", shape),
                });
            }
        };
        if rows != num_nodes {
            return Err(LearningError::ShapeMismatch {
                expected: num_nodes,
                actual: rows,
                context: "signal rows vs graph nodes".to_string(),
            });
        }
        Ok(Self {
            num_nodes,
            num_columns,
            is_vector,
        })
    }

    /// Tensor shape of the signal.
    pub fn shape(&self) -> Vec<usize> {
        if self.is_vector {
            vec![self.num_nodes]
        } else {
            vec![self.num_nodes, self.num_columns]
        }
    }
}

/// Reject NaN, infinite and negative regularization weights.
pub fn validate_tau(tau: f64) -> LearningResult<()> {
    if !tau.is_finite() || tau < 0.0 {
        return Err(LearningError::InvalidParameter {
            parameter: "tau".to_string(),
            message: format!("must be finite and >= 0, got {}", tau),
        });
    }
    Ok(())
}

/// The mask must have one entry per node.
pub fn validate_mask(mask: &[bool], num_nodes: usize) -> LearningResult<()> {
    if mask.len() != num_nodes {
        return Err(LearningError::ShapeMismatch {
            expected: num_nodes,
            actual: mask.len(),
            context: "mask length vs graph nodes".to_string(),
        });
    }
    Ok(())
}

/// Split node indices into `(observed, unobserved)`.
pub fn partition_mask(mask: &[bool]) -> (Vec<usize>, Vec<usize>) {
    let mut observed = Vec::new();
    let mut unobserved = Vec::new();
    for (i, &m) in mask.iter().enumerate() {
        if m {
            observed.push(i);
        } else {
            unobserved.push(i);
        }
    }
    (observed, unobserved)
}

/// Upper bound on the `n · C` entries of the one-hot logits.
pub const MAX_LOGIT_ENTRIES: usize = 1 << 28;

/// Convert observed entries of a label signal to class indices.
///
/// Unobserved entries become class 0 whatever they hold. A label is rejected
/// when it is negative, fractional or not finite, or when the `[n, label + 1]`
/// one-hot matrix it implies would exceed [`MAX_LOGIT_ENTRIES`].
pub fn observed_labels(values: &[f64], mask: &[bool]) -> LearningResult<Vec<usize>> {
    let n = values.len();
    values
        .iter()
        .zip(mask)
        .enumerate()
        .map(|(index, (&value, &observed))| {
            if !observed {
                return Ok(0);
            }
            let invalid = LearningError::InvalidLabel { index, value };
            if !value.is_finite()
                || value < 0.0
                || value.fract() != 0.0
                || value >= usize::MAX as f64
            {
                return Err(invalid);
            }
            let label = value as usize;
            let fits = label
                .checked_add(1)
                .and_then(|classes| classes.checked_mul(n))
                .is_some_and(|entries| entries <= MAX_LOGIT_ENTRIES);
            if !fits {
                return Err(invalid);
            }
            Ok(label)
        })
        .collect()
}

/// One-hot encode class indices into a row-major `[n, c]` buffer with
/// `c = max(label) + 1`.
pub fn one_hot(labels: &[usize]) -> LearningResult<(Vec<f64>, usize)> {
    let num_classes = labels.iter().copied().max().unwrap_or(0).checked_add(1);
    let entries = num_classes.and_then(|c| c.checked_mul(labels.len()));
    let (Some(num_classes), Some(entries)) = (num_classes, entries) else {
        return Err(too_many_classes());
    };
    if entries > MAX_LOGIT_ENTRIES {
        return Err(too_many_classes());
    }

    let mut logits = vec![0.0; entries];
    for (i, &label) in labels.iter().enumerate() {
        logits[i * num_classes + label] = 1.0;
    }
    Ok((logits, num_classes))
}

fn too_many_classes() -> LearningError {
    LearningError::InvalidParameter {
        parameter: "y".to_string(),
        message: format!("one-hot logits would exceed {} entries", MAX_LOGIT_ENTRIES),
    }
}

/// Row-wise arg-max of a row-major `[n, c]` buffer.
///
/// Ties resolve to the lowest index; NaN never wins over a number.
pub fn argmax_rows(values: &[f64], num_columns: usize) -> Vec<i64> {
    values
        .chunks(num_columns.max(1))
        .map(|row| {
            let mut best = 0usize;
            for (j, &v) in row.iter().enumerate().skip(1) {
                if v > row[best] || (row[best].is_nan() && !v.is_nan()) {
                    best = j;
                }
            }
            best as i64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_tau() {
        assert!(validate_tau(0.0).is_ok());
        assert!(validate_tau(3.5).is_ok());
        assert!(validate_tau(-1e-9).is_err());
        assert!(validate_tau(f64::NAN).is_err());
        assert!(validate_tau(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_mask() {
        assert!(validate_mask(&[true, false], 2).is_ok());
        let err = validate_mask(&[true], 2).unwrap_err();
        assert!(matches!(
            err,
            LearningError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_partition_mask() {
        let (obs, unobs) = partition_mask(&[true, false, false, true]);
        assert_eq!(obs, vec![0, 3]);
        assert_eq!(unobs, vec![1, 2]);
    }

    #[test]
    fn test_observed_labels() {
        let labels = observed_labels(&[2.0, f64::NAN, 0.0], &[true, false, true]).unwrap();
        assert_eq!(labels, vec![2, 0, 0]);

        let err = observed_labels(&[1.0, -1.0], &[true, true]).unwrap_err();
        assert!(matches!(err, LearningError::InvalidLabel { index: 1, .. }));
        assert!(observed_labels(&[1.5], &[true]).is_err());
        assert!(observed_labels(&[f64::NAN], &[true]).is_err());
    }

    #[test]
    fn test_observed_labels_rejects_huge_classes() {
        // 2^64 saturates the cast, so label + 1 would overflow
        let err = observed_labels(&[0.0, 1.0, 1.8446744073709552e19], &[true; 3]).unwrap_err();
        assert!(matches!(err, LearningError::InvalidLabel { index: 2, .. }));

        // Fits in usize, but the one-hot matrix would not fit in memory
        let err = observed_labels(&[1e12, 0.0, 0.0], &[true; 3]).unwrap_err();
        assert!(matches!(err, LearningError::InvalidLabel { index: 0, .. }));

        let largest = (MAX_LOGIT_ENTRIES / 2 - 1) as f64;
        assert!(observed_labels(&[largest, 0.0], &[true, true]).is_ok());
        assert!(observed_labels(&[largest + 1.0, 0.0], &[true, true]).is_err());
    }

    #[test]
    fn test_one_hot() {
        let (logits, c) = one_hot(&[0, 2, 1]).unwrap();
        assert_eq!(c, 3);
        assert_eq!(
            logits,
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0]
        );

        let (_, c) = one_hot(&[0, 0]).unwrap();
        assert_eq!(c, 1);

        assert!(one_hot(&[usize::MAX]).is_err());
        assert!(one_hot(&[MAX_LOGIT_ENTRIES]).is_err());
    }

    #[test]
    fn test_argmax_ties_and_nan() {
        let values = [0.2, 0.7, 0.7, f64::NAN, 0.1, 0.0, 0.5, 0.5, 0.5];
        assert_eq!(argmax_rows(&values, 3), vec![1, 1, 0]);
    }
}
