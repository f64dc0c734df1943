//! Input validation for despiking configuration and data.
//!
//! ## Purpose
//!
//! This module checks signals and parameters before any fitting happens:
//! input lengths, finite values, polynomial order against sample count,
//! threshold and spike length bounds, and background-fit convergence settings.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::DespikeError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for despiking configuration and input data.
///
/// All methods return `Result<(), DespikeError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    /// Upper bound on background-fit iterations.
    pub const MAX_ITERATIONS: usize = 100_000;

    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a signal: non-empty and finite.
    pub fn validate_signal<T: Float>(signal: &[T]) -> Result<(), DespikeError> {
        if signal.is_empty() {
            return Err(DespikeError::EmptyInput);
        }

        Self::validate_finite(signal, "signal")
    }

    /// Validate paired position/value arrays for the background fitter.
    pub fn validate_inputs<T: Float>(positions: &[T], values: &[T]) -> Result<(), DespikeError> {
        // Check 1: Non-empty arrays
        if positions.is_empty() || values.is_empty() {
            return Err(DespikeError::EmptyInput);
        }

        // Check 2: Matching lengths
        if positions.len() != values.len() {
            return Err(DespikeError::MismatchedInputs {
                x_len: positions.len(),
                y_len: values.len(),
            });
        }

        // Check 3: All values finite
        Self::validate_finite(positions, "positions")?;
        Self::validate_finite(values, "values")
    }

    fn validate_finite<T: Float>(vals: &[T], name: &str) -> Result<(), DespikeError> {
        match vals.iter().position(|v| !v.is_finite()) {
            Some(i) => Err(DespikeError::InvalidNumericValue(format!(
                "{}[{}]={}",
                name,
                i,
                vals[i].to_f64().unwrap_or(f64::NAN)
            ))),
            None => Ok(()),
        }
    }

    /// Validate that `n` samples can determine a polynomial of degree `order`.
    pub fn validate_order(order: usize, n: usize) -> Result<(), DespikeError> {
        let min = order.saturating_add(1);
        if n < min {
            return Err(DespikeError::TooFewPoints { got: n, min });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the detection threshold (noise units).
    pub fn validate_threshold<T: Float>(threshold: T) -> Result<(), DespikeError> {
        if !threshold.is_finite() || threshold < T::zero() {
            return Err(DespikeError::InvalidThreshold(
                threshold.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the minimum real-peak size.
    pub fn validate_length(length: usize) -> Result<(), DespikeError> {
        if length == 0 {
            return Err(DespikeError::InvalidLength(length));
        }
        Ok(())
    }

    /// Validate the noise estimate handed to the background fitter.
    pub fn validate_noise<T: Float>(noise: T) -> Result<(), DespikeError> {
        if !noise.is_finite() || noise < T::zero() {
            return Err(DespikeError::InvalidNoise(
                noise.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the background-fit convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), DespikeError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(DespikeError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the background-fit iteration cap.
    pub fn validate_max_iterations(max_iterations: usize) -> Result<(), DespikeError> {
        if max_iterations == 0 || max_iterations > Self::MAX_ITERATIONS {
            return Err(DespikeError::InvalidIterations(max_iterations));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), DespikeError> {
        if let Some(param) = duplicate_param {
            return Err(DespikeError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
