//! Noise estimation and near/far classification.
//!
//! ## Purpose
//!
//! This module estimates the background of a signal, measures the noise as
//! the median absolute deviation of the residuals, and partitions the sample
//! indices into those close to the background ("near") and those further than
//! `threshold` noise units from it ("far").
//!
//! ## Key concepts
//!
//! 1. A first MAD of the raw signal seeds the background fitter.
//! 2. The background is fitted robustly (see `background`).
//! 3. The MAD of `signal - background` is the noise scale.
//! 4. `|deviation| > threshold * noise` marks a sample as far.
//!
//! ## Invariants
//!
//! * `near` and `far` are ascending, disjoint, and together cover `0..len`.
//! * The input signal is never modified.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::debug;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::background::{BackgroundOptions, fit_background_with};
use crate::engine::validator::Validator;
use crate::math::cost::CostFunction;
use crate::math::polynomial::{PolySolver, abscissa};
use crate::math::scaling::median_absolute_deviation;
use crate::primitives::errors::DespikeError;

// ============================================================================
// Result
// ============================================================================

/// Noise scale, near/far partition and background of a signal.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseEstimate<T> {
    /// MAD of the residuals `signal - background`.
    pub noise: T,

    /// Indices whose deviation is within `threshold * noise`, ascending.
    pub near: Vec<usize>,

    /// Indices whose deviation exceeds `threshold * noise`, ascending.
    pub far: Vec<usize>,

    /// Robust polynomial background.
    pub background: Vec<T>,

    /// Iterations used by the background fit.
    pub iterations: usize,

    /// Whether the background fit converged.
    pub converged: bool,
}

impl<T: Float> NoiseEstimate<T> {
    /// Number of classified samples.
    pub fn len(&self) -> usize {
        self.near.len() + self.far.len()
    }

    /// True when no samples were classified.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when no sample lies far from the background.
    pub fn is_clean(&self) -> bool {
        self.far.is_empty()
    }
}

// ============================================================================
// Estimation
// ============================================================================

/// Estimate noise, background and near/far partition with default fit settings.
///
/// # Errors
///
/// * `EmptyInput` or `InvalidNumericValue` for a bad signal.
/// * `InvalidThreshold` for a negative or non-finite threshold.
/// * `TooFewPoints` if the signal has `order` samples or fewer.
pub fn estimate_noise<T: PolySolver>(
    signal: &[T],
    threshold: T,
    order: usize,
    cost_function: CostFunction,
) -> Result<NoiseEstimate<T>, DespikeError> {
    estimate_noise_with(
        signal,
        threshold,
        order,
        cost_function,
        &BackgroundOptions::default(),
    )
}

/// Estimate noise, background and near/far partition with explicit fit settings.
pub fn estimate_noise_with<T: PolySolver>(
    signal: &[T],
    threshold: T,
    order: usize,
    cost_function: CostFunction,
    options: &BackgroundOptions<T>,
) -> Result<NoiseEstimate<T>, DespikeError> {
    Validator::validate_signal(signal)?;
    Validator::validate_threshold(threshold)?;

    // First estimation, only used to seed the background fit
    let first_mad = median_absolute_deviation(signal);
    debug!(
        "noise: first MAD estimate {}",
        first_mad.to_f64().unwrap_or(f64::NAN)
    );

    let positions: Vec<T> = (0..signal.len()).map(abscissa).collect();
    let fit = fit_background_with(&positions, signal, order, first_mad, cost_function, options)?;

    let deviation: Vec<T> = signal
        .iter()
        .zip(&fit.background)
        .map(|(&s, &b)| s - b)
        .collect();

    let noise = median_absolute_deviation(&deviation);
    let level = threshold * noise;
    debug!(
        "noise: MAD {}, threshold level {}",
        noise.to_f64().unwrap_or(f64::NAN),
        level.to_f64().unwrap_or(f64::NAN)
    );

    let (far, near): (Vec<usize>, Vec<usize>) = (0..deviation.len())
        .partition(|&i| deviation[i] < -level || deviation[i] > level);

    Ok(NoiseEstimate {
        noise,
        near,
        far,
        background: fit.background,
        iterations: fit.iterations,
        converged: fit.converged,
    })
}
