//! Output types for despiking operations.
//!
//! ## Purpose
//!
//! This module defines `DespikeReport`, returned by a despike sweep next to
//! the in-place modified signal. It records the noise scale, the background,
//! and what happened to every spike group.
//!
//! ## Design notes
//!
//! * **Ergonomics**: Implements `Display` for a human-readable summary.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Invariants
//!
//! * `outcomes` are in ascending group order and cover every far index once.
//! * `background` has the same length as the processed signal.
//!
//! ## Non-goals
//!
//! * This module does not hold a copy of the signal; it is modified in place.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::patch::GroupOutcome;

// ============================================================================
// Report Structure
// ============================================================================

/// Summary of a despike sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct DespikeReport<T> {
    /// Noise scale (MAD of the background residuals).
    pub noise: T,

    /// Absolute deviation above which a sample was classified as far.
    pub cutoff: T,

    /// Robust polynomial background of the original signal.
    pub background: Vec<T>,

    /// Iterations used by the background fit.
    pub background_iterations: usize,

    /// Whether the background fit converged.
    pub background_converged: bool,

    /// Outcome of every spike group, in ascending order.
    pub outcomes: Vec<GroupOutcome>,
}

impl<T: Float> DespikeReport<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Number of groups replaced by a local fit.
    pub fn patched_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_patched()).count()
    }

    /// Number of groups kept as genuine features.
    pub fn preserved_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GroupOutcome::Preserved { .. }))
            .count()
    }

    /// Number of groups left untouched for lack of support points.
    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, GroupOutcome::SkippedEmptyWindow { .. }))
            .count()
    }

    /// Total number of far samples.
    pub fn far_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.group().len()).sum()
    }

    /// Whether the sweep changed the signal at all.
    pub fn is_unchanged(&self) -> bool {
        self.patched_count() == 0
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for DespikeReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Data points: {}", self.background.len())?;
        writeln!(f, "  Noise (MAD): {}", self.noise)?;
        writeln!(f, "  Cutoff:      {}", self.cutoff)?;
        writeln!(
            f,
            "  Background:  {} iterations{}",
            self.background_iterations,
            if self.background_converged {
                ""
            } else {
                " (not converged)"
            }
        )?;
        writeln!(
            f,
            "  Groups:      {} patched, {} preserved, {} skipped",
            self.patched_count(),
            self.preserved_count(),
            self.skipped_count()
        )?;

        if self.outcomes.is_empty() {
            return Ok(());
        }

        writeln!(f)?;
        writeln!(f, "Spike Groups:")?;
        writeln!(f, "{:>8} {:>8} {:>10} {:>6} {:>7}", "Start", "End", "Outcome", "Order", "Points")?;
        writeln!(f, "{:-<43}", "")?;

        for outcome in &self.outcomes {
            let group = outcome.group();
            match outcome {
                GroupOutcome::Patched {
                    fit_order, points, ..
                } => writeln!(
                    f,
                    "{:>8} {:>8} {:>10} {:>6} {:>7}",
                    group.start, group.end, "patched", fit_order, points
                )?,
                GroupOutcome::Preserved { .. } => writeln!(
                    f,
                    "{:>8} {:>8} {:>10} {:>6} {:>7}",
                    group.start, group.end, "preserved", "-", "-"
                )?,
                GroupOutcome::SkippedEmptyWindow { .. } => writeln!(
                    f,
                    "{:>8} {:>8} {:>10} {:>6} {:>7}",
                    group.start, group.end, "skipped", "-", 0
                )?,
            }
        }

        Ok(())
    }
}
