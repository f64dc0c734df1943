//! Error types for despiking operations.
//!
//! ## Purpose
//!
//! This module defines the error conditions that can occur while fitting the
//! background, estimating the noise, or sweeping the signal for spikes,
//! including input validation, parameter constraints and numerical failures.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors carry the offending values (e.g., points vs. required points).
//! * **Deferred**: Builder errors are stored and surfaced when `build()` is called.
//! * **No-std**: Uses `alloc` for dynamic messages when `std` is disabled.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty signals, mismatched lengths, non-finite values.
//! 2. **Insufficient data**: Fewer samples than the polynomial order requires.
//! 3. **Parameter validation**: Threshold, spike length, tolerance, iteration cap.
//! 4. **Numerical failure**: Least-squares normal equations that cannot be solved.
//!
//! ## Non-goals
//!
//! * A degenerate fit window is not an error; the patch order is lowered instead.
//! * An empty far set is not an error; the sweep is a no-op.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for despiking operations.
#[derive(Debug, Clone, PartialEq)]
pub enum DespikeError {
    /// The signal (or position array) is empty.
    EmptyInput,

    /// Position and value arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of positions.
        x_len: usize,
        /// Number of values.
        y_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Fewer samples than the requested polynomial order can be fitted with.
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points (`order + 1`).
        min: usize,
    },

    /// Detection threshold (in noise units) must be finite and non-negative.
    InvalidThreshold(f64),

    /// Minimum real-peak size must be at least 1.
    InvalidLength(usize),

    /// Initial noise estimate handed to the background fitter must be finite and non-negative.
    InvalidNoise(f64),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Background fitting requires at least one iteration.
    InvalidIterations(usize),

    /// The least-squares normal equations are singular.
    SingularSystem {
        /// Order of the polynomial that could not be fitted.
        order: usize,
    },

    /// Cost function tag is not one of `sh`, `ah`, `stq`, `atq`.
    UnknownCostFunction(String),

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for DespikeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input signal is empty"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(
                    f,
                    "Length mismatch: positions has {x_len} points, values has {y_len}"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidThreshold(threshold) => {
                write!(f, "Invalid threshold: {threshold} (must be >= 0 and finite)")
            }
            Self::InvalidLength(length) => {
                write!(f, "Invalid length: {length} (must be >= 1)")
            }
            Self::InvalidNoise(noise) => {
                write!(f, "Invalid noise estimate: {noise} (must be >= 0 and finite)")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid max_iterations: {iter} (must be in [1, 100000])")
            }
            Self::SingularSystem { order } => {
                write!(
                    f,
                    "Singular system: cannot fit a polynomial of order {order}"
                )
            }
            Self::UnknownCostFunction(tag) => {
                write!(
                    f,
                    "Unknown cost function: '{tag}' (expected one of sh, ah, stq, atq)"
                )
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Parameter '{parameter}' is required but was not set")
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for DespikeError {}
