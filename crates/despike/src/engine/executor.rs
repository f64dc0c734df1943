//! Execution engine for the despike sweep.
//!
//! ## Purpose
//!
//! This module runs the complete despiking procedure on a signal buffer:
//! noise estimation once, then a single left-to-right sweep over the far
//! indices that either patches or preserves each spike group.
//!
//! ## Design notes
//!
//! * **In place**: The caller's buffer is modified directly; nothing is copied
//!   except the background and index sets.
//! * **No rollback**: A fitting error aborts the sweep and leaves already
//!   patched groups patched.
//!
//! ## Key concepts
//!
//! * A group with `end - start < length` is a spike and is replaced.
//! * Wider groups are genuine features and are preserved.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::background::BackgroundOptions;
use crate::algorithms::noise::{NoiseEstimate, estimate_noise_with};
use crate::algorithms::patch::{GroupOutcome, patch_group};
use crate::engine::output::DespikeReport;
use crate::engine::validator::Validator;
use crate::math::cost::CostFunction;
use crate::math::polynomial::PolySolver;
use crate::primitives::errors::DespikeError;
use crate::primitives::groups::SpikeGroups;

// ============================================================================
// Configuration
// ============================================================================

/// Default detection threshold (noise units).
pub const DEFAULT_THRESHOLD: f64 = 3.5;

/// Default order of the background polynomial.
pub const DEFAULT_ORDER: usize = 6;

/// Resolved configuration of a despike sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DespikeConfig<T> {
    /// Minimum size of real peaks; narrower groups are patched.
    pub length: usize,

    /// Detection threshold in noise units.
    pub threshold: T,

    /// Order of the background polynomial.
    pub order: usize,

    /// Cost function of the background fit.
    pub cost_function: CostFunction,

    /// Convergence settings of the background fit.
    pub background: BackgroundOptions<T>,
}

impl<T: Float> DespikeConfig<T> {
    /// Configuration with the given spike length and default everything else.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            threshold: T::from(DEFAULT_THRESHOLD).unwrap_or_else(T::one),
            order: DEFAULT_ORDER,
            cost_function: CostFunction::SymmetricTruncatedQuadratic,
            background: BackgroundOptions::default(),
        }
    }

    /// Check all parameters.
    pub fn validate(&self) -> Result<(), DespikeError> {
        Validator::validate_length(self.length)?;
        Validator::validate_threshold(self.threshold)?;
        self.background.validate()
    }
}

// ============================================================================
// Executor
// ============================================================================

/// Runs noise estimation and the despike sweep.
pub struct DespikeExecutor;

impl DespikeExecutor {
    /// Estimate noise and near/far partition under `config`.
    pub fn estimate<T: PolySolver>(
        signal: &[T],
        config: &DespikeConfig<T>,
    ) -> Result<NoiseEstimate<T>, DespikeError> {
        estimate_noise_with(
            signal,
            config.threshold,
            config.order,
            config.cost_function,
            &config.background,
        )
    }

    /// Despike `signal` in place under `config`.
    pub fn run<T: PolySolver>(
        signal: &mut [T],
        config: &DespikeConfig<T>,
    ) -> Result<DespikeReport<T>, DespikeError> {
        config.validate()?;

        let estimate = Self::estimate(signal, config)?;
        let outcomes = Self::sweep(signal, &estimate, config.length)?;

        debug!(
            "despike: {} far samples in {} groups",
            estimate.far.len(),
            outcomes.len()
        );

        Ok(DespikeReport {
            noise: estimate.noise,
            cutoff: config.threshold * estimate.noise,
            background: estimate.background,
            background_iterations: estimate.iterations,
            background_converged: estimate.converged,
            outcomes,
        })
    }

    /// Walk the far groups left to right, patching the narrow ones.
    pub fn sweep<T: PolySolver>(
        signal: &mut [T],
        estimate: &NoiseEstimate<T>,
        length: usize,
    ) -> Result<Vec<GroupOutcome>, DespikeError> {
        let mut outcomes = Vec::new();

        for group in SpikeGroups::new(&estimate.far) {
            let outcome = if group.is_spike(length) {
                patch_group(signal, &estimate.near, group, length)?
            } else {
                debug!(
                    "despike: [{}, {}] spans {} >= {}, kept as a real feature",
                    group.start,
                    group.end,
                    group.span(),
                    length
                );
                GroupOutcome::Preserved { group }
            };
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }
}
