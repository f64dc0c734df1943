//! Robust scale estimation using the median absolute deviation.
//!
//! The noise scale of a signal is `median(|r - median(r)|)`. It ignores the
//! spikes it is meant to detect, unlike the standard deviation.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

/// Median absolute deviation of `vals` about their median.
///
/// Returns zero for an empty slice. The input is left untouched.
pub fn median_absolute_deviation<T: Float>(vals: &[T]) -> T {
    let mut scratch: Vec<T> = vals.to_vec();
    mad_inplace(&mut scratch)
}

/// Median of `vals`. Returns zero for an empty slice.
pub fn median<T: Float>(vals: &[T]) -> T {
    let mut scratch: Vec<T> = vals.to_vec();
    median_inplace(&mut scratch)
}

/// Compute the MAD, reordering and overwriting `vals`.
#[inline]
pub fn mad_inplace<T: Float>(vals: &mut [T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }

    // Step 1: Compute median of the values
    let median = median_inplace(vals);

    // Step 2: Compute absolute deviations from median
    for val in vals.iter_mut() {
        *val = (*val - median).abs();
    }

    // Step 3: Return median of absolute deviations
    median_inplace(vals)
}

/// Median via Quickselect; reorders `vals`.
#[inline]
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n.is_multiple_of(2) {
        // Even length: average with the largest value of the lower half
        let lower = vals[..mid]
            .iter()
            .copied()
            .fold(vals[0], |acc, v| if v > acc { v } else { acc });

        (lower + upper) / (T::one() + T::one())
    } else {
        upper
    }
}
