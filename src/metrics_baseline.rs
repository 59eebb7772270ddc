//! Baseline metrics for continuous targets
//!
//! This module implements the deviation summaries of the constant-mean
//! predictor. They provide the reference numbers a fitted model has to beat
//! and the contiguous grouping helper used for cross-validation style walks
//! over an example list.

use crate::dataset::Float;
use crate::error::{Error, Result};

/// Arithmetic mean of the values.
///
/// Panics when `values` is empty.
pub fn average<F: Float>(values: &[F]) -> F {
    assert!(!values.is_empty(), "cannot average an empty list");

    values.iter().copied().sum::<F>() / F::cast(values.len())
}

/// Root mean square deviation of the values from their own mean, the error
/// of the constant predictor that always answers the average.
///
/// Panics when `values` is empty.
pub fn root_mean_square<F: Float>(values: &[F]) -> F {
    assert!(!values.is_empty(), "cannot summarize an empty list");

    let mean = average(values);
    let sum = values
        .iter()
        .map(|&v| (v - mean) * (v - mean))
        .sum::<F>();

    (sum / F::cast(values.len())).sqrt()
}

/// Same as [`root_mean_square`], divided by the spread between the largest
/// and the smallest squared deviation.
///
/// Returns [`Error::DegenerateSpread`] when all squared deviations are equal,
/// which also covers a single-element list. Panics when `values` is empty.
pub fn normalized_root_mean_square<F: Float>(values: &[F]) -> Result<F> {
    assert!(!values.is_empty(), "cannot summarize an empty list");

    let mean = average(values);
    let mut sum = F::zero();
    let mut min = F::infinity();
    let mut max = F::neg_infinity();

    for &v in values {
        let squared = (v - mean) * (v - mean);
        sum += squared;
        if squared < min {
            min = squared;
        }
        if squared > max {
            max = squared;
        }
    }

    if max <= min {
        return Err(Error::DegenerateSpread);
    }

    let rms = (sum / F::cast(values.len())).sqrt();
    Ok(rms / (max - min))
}

/// Splits a list into `groups` contiguous, non-overlapping groups.
///
/// Every group holds `values.len() / groups` elements; the last group also
/// absorbs the remainder. With more groups than elements the leading groups
/// come out empty.
///
/// Panics when `groups` is zero.
pub fn split_list<T>(values: &[T], groups: usize) -> Vec<&[T]> {
    assert!(groups > 0, "cannot split a list into zero groups");

    let size = values.len() / groups;
    (0..groups)
        .map(|i| {
            if i + 1 == groups {
                &values[i * size..]
            } else {
                &values[i * size..(i + 1) * size]
            }
        })
        .collect()
}
