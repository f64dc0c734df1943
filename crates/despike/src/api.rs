//! High-level API for despiking.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry points: the two free functions
//! [`estimate_noise`] and [`despike`], and a fluent builder for configuring
//! every parameter of a run.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters but `length`.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DespikeBuilder`] via `Despike::new()`.
//! 2. Chain configuration methods (`.length()`, `.threshold()`, etc.).
//! 3. Call `.build()` to obtain a reusable [`Despiker`].

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::DespikeExecutor;
use crate::engine::validator::Validator;
use crate::math::polynomial::PolySolver;

// Publicly re-exported types
pub use crate::algorithms::background::{
    BackgroundFit, BackgroundOptions, fit_background, fit_background_with,
};
pub use crate::algorithms::noise::{NoiseEstimate, estimate_noise_with};
pub use crate::algorithms::patch::{FitWindow, GroupOutcome, patch_order};
pub use crate::engine::executor::DespikeConfig;
pub use crate::engine::output::DespikeReport;
pub use crate::math::cost::CostFunction;
pub use crate::math::polynomial::Polynomial;
pub use crate::math::scaling::median_absolute_deviation;
pub use crate::primitives::errors::DespikeError;
pub use crate::primitives::groups::{SpikeGroup, SpikeGroups};

// ============================================================================
// Free Functions
// ============================================================================

/// Estimate the noise, near/far partition and background of `signal`.
///
/// Samples whose deviation from the robust background exceeds
/// `threshold * noise` are far; all others are near.
pub fn estimate_noise<T: PolySolver>(
    signal: &[T],
    threshold: T,
    order: usize,
    cost_function: CostFunction,
) -> Result<NoiseEstimate<T>, DespikeError> {
    crate::algorithms::noise::estimate_noise(signal, threshold, order, cost_function)
}

/// Remove spikes narrower than `length` from `signal`, in place.
///
/// The background is fitted with a polynomial of degree `order` under the
/// symmetric truncated quadratic cost. Groups of far samples with
/// `end - start < length` are replaced by a local polynomial through the
/// surrounding near samples; wider groups are left untouched.
pub fn despike<T: PolySolver>(
    signal: &mut [T],
    length: usize,
    threshold: T,
    order: usize,
) -> Result<DespikeReport<T>, DespikeError> {
    let config = DespikeConfig {
        threshold,
        order,
        ..DespikeConfig::new(length)
    };
    DespikeExecutor::run(signal, &config)
}

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring a despike run.
#[derive(Debug, Clone)]
pub struct DespikeBuilder<T> {
    /// Minimum size of real peaks (required).
    pub length: Option<usize>,

    /// Detection threshold in noise units (default 3.5).
    pub threshold: Option<T>,

    /// Background polynomial order (default 6).
    pub order: Option<usize>,

    /// Background cost function (default `stq`).
    pub cost_function: Option<CostFunction>,

    /// Background convergence tolerance (default 1e-9).
    pub tolerance: Option<T>,

    /// Background iteration cap (default 1000).
    pub max_iterations: Option<usize>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for DespikeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> DespikeBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            length: None,
            threshold: None,
            order: None,
            cost_function: None,
            tolerance: None,
            max_iterations: None,
            duplicate_param: None,
        }
    }

    /// Set the minimum size of real peaks.
    pub fn length(mut self, length: usize) -> Self {
        if self.length.is_some() {
            self.duplicate_param = Some("length");
        }
        self.length = Some(length);
        self
    }

    /// Set the detection threshold (noise units).
    pub fn threshold(mut self, threshold: T) -> Self {
        if self.threshold.is_some() {
            self.duplicate_param = Some("threshold");
        }
        self.threshold = Some(threshold);
        self
    }

    /// Set the background polynomial order.
    pub fn order(mut self, order: usize) -> Self {
        if self.order.is_some() {
            self.duplicate_param = Some("order");
        }
        self.order = Some(order);
        self
    }

    /// Set the background cost function.
    pub fn cost_function(mut self, cost_function: CostFunction) -> Self {
        if self.cost_function.is_some() {
            self.duplicate_param = Some("cost_function");
        }
        self.cost_function = Some(cost_function);
        self
    }

    /// Set the background convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Set the background iteration cap.
    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        if self.max_iterations.is_some() {
            self.duplicate_param = Some("max_iterations");
        }
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Resolve defaults and validate the configuration.
    pub fn build(self) -> Result<Despiker<T>, DespikeError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let length = self
            .length
            .ok_or(DespikeError::MissingParameter { parameter: "length" })?;

        let defaults = DespikeConfig::<T>::new(length);
        let config = DespikeConfig {
            length,
            threshold: self.threshold.unwrap_or(defaults.threshold),
            order: self.order.unwrap_or(defaults.order),
            cost_function: self.cost_function.unwrap_or(defaults.cost_function),
            background: BackgroundOptions {
                tolerance: self.tolerance.unwrap_or(defaults.background.tolerance),
                max_iterations: self
                    .max_iterations
                    .unwrap_or(defaults.background.max_iterations),
            },
        };

        config.validate()?;

        Ok(Despiker { config })
    }
}

// ============================================================================
// Despiker
// ============================================================================

/// A validated, reusable despike configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Despiker<T> {
    config: DespikeConfig<T>,
}

impl<T: PolySolver> Despiker<T> {
    /// The resolved configuration.
    pub fn config(&self) -> &DespikeConfig<T> {
        &self.config
    }

    /// Remove spikes from `signal` in place.
    pub fn apply(&self, signal: &mut [T]) -> Result<DespikeReport<T>, DespikeError> {
        DespikeExecutor::run(signal, &self.config)
    }

    /// Classify `signal` without modifying it.
    pub fn estimate(&self, signal: &[T]) -> Result<NoiseEstimate<T>, DespikeError> {
        DespikeExecutor::estimate(signal, &self.config)
    }
}
