//! Local polynomial replacement of spike groups.
//!
//! ## Purpose
//!
//! For a spike group `[I1, I2]`, this module selects the near samples within
//! `length / 2` on either side, fits a low-order polynomial through them, and
//! overwrites the group with the polynomial's values.
//!
//! ## Design notes
//!
//! * **Real-valued window**: The bounds `I1 - length/2` and `I2 + length/2`
//!   are compared as reals, so odd lengths behave like the half-integer they are.
//! * **Order fallback**: One window point gives a constant, two a line, more a
//!   quadratic.
//! * **Near-only**: Window points come from the near set, which is fixed for a
//!   whole sweep, so patched values never feed a later fit.
//!
//! ## Invariants
//!
//! * Only indices inside the group are written.
//! * Window indices are ascending and disjoint from the group.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::{debug, warn};
use num_traits::Float;

// Internal dependencies
use crate::math::polynomial::{PolySolver, Polynomial, abscissa};
use crate::primitives::errors::DespikeError;
use crate::primitives::groups::SpikeGroup;

/// Order of the local fit when the window has enough points.
pub const DEFAULT_PATCH_ORDER: usize = 2;

// ============================================================================
// Fit Window
// ============================================================================

/// Near indices surrounding a spike group, used as support for the local fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitWindow {
    indices: Vec<usize>,
}

impl FitWindow {
    /// Collect the near indices in `(I1 - length/2, I1) ∪ (I2, I2 + length/2)`.
    ///
    /// `near` must be ascending.
    pub fn new(near: &[usize], group: SpikeGroup, length: usize) -> Self {
        let half = length as f64 / 2.0;
        let left_bound = group.start as f64 - half;
        let right_bound = group.end as f64 + half;

        // Left side: near indices below I1 and strictly above I1 - length/2
        let left_end = near.partition_point(|&k| k < group.start);
        let left_begin = near[..left_end].partition_point(|&k| (k as f64) <= left_bound);

        // Right side: near indices above I2 and strictly below I2 + length/2
        let right_begin = near.partition_point(|&k| k <= group.end);
        let right_end =
            right_begin + near[right_begin..].partition_point(|&k| (k as f64) < right_bound);

        let indices = near[left_begin..left_end]
            .iter()
            .chain(&near[right_begin..right_end])
            .copied()
            .collect();

        Self { indices }
    }

    /// Window indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of support points.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no near sample falls inside the window.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Positions and signal values of the support points.
    pub fn points<T: Float>(&self, signal: &[T]) -> (Vec<T>, Vec<T>) {
        self.indices
            .iter()
            .map(|&k| (abscissa::<T>(k), signal[k]))
            .unzip()
    }
}

/// Order of the local fit for a window with `points` support points.
///
/// Returns `None` for an empty window.
#[inline]
pub fn patch_order(points: usize) -> Option<usize> {
    match points {
        0 => None,
        n => Some((n - 1).min(DEFAULT_PATCH_ORDER)),
    }
}

// ============================================================================
// Outcome
// ============================================================================

/// What the sweep did with one spike group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOutcome {
    /// Replaced by a local polynomial.
    Patched {
        /// The replaced group.
        group: SpikeGroup,
        /// Order of the local polynomial.
        fit_order: usize,
        /// Number of support points in the fit window.
        points: usize,
    },

    /// Wide enough to be a genuine feature; left untouched.
    Preserved {
        /// The preserved group.
        group: SpikeGroup,
    },

    /// No near sample in the fit window; left untouched.
    SkippedEmptyWindow {
        /// The skipped group.
        group: SpikeGroup,
    },
}

impl GroupOutcome {
    /// The group this outcome refers to.
    pub fn group(&self) -> SpikeGroup {
        match *self {
            Self::Patched { group, .. }
            | Self::Preserved { group }
            | Self::SkippedEmptyWindow { group } => group,
        }
    }

    /// Whether the group was overwritten.
    pub fn is_patched(&self) -> bool {
        matches!(self, Self::Patched { .. })
    }
}

// ============================================================================
// Patching
// ============================================================================

/// Replace `group` in `signal` by a polynomial through its fit window.
///
/// # Errors
///
/// Propagates `SingularSystem` from the local fit. The signal is untouched
/// in that case.
pub fn patch_group<T: PolySolver>(
    signal: &mut [T],
    near: &[usize],
    group: SpikeGroup,
    length: usize,
) -> Result<GroupOutcome, DespikeError> {
    let window = FitWindow::new(near, group, length);

    let Some(fit_order) = patch_order(window.len()) else {
        warn!(
            "patch: no near samples around [{}, {}] (length {}), group left untouched",
            group.start, group.end, length
        );
        return Ok(GroupOutcome::SkippedEmptyWindow { group });
    };

    let (x_fit, y_fit) = window.points(signal);
    let poly = Polynomial::fit(&x_fit, &y_fit, fit_order)?;

    for i in group.indices() {
        signal[i] = poly.evaluate(abscissa(i));
    }

    debug!(
        "patch: replaced [{}, {}] with order {} fit through {} points",
        group.start,
        group.end,
        fit_order,
        window.len()
    );

    Ok(GroupOutcome::Patched {
        group,
        fit_order,
        points: window.len(),
    })
}
