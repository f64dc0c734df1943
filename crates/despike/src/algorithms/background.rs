//! Robust polynomial background estimation.
//!
//! ## Purpose
//!
//! This module fits a slowly varying polynomial background to a signal while
//! ignoring the peaks that sit on top of it. It is an iterative re-weighted
//! least-squares scheme: each pass computes residuals against the current
//! background, turns them into a correction through the selected
//! [`CostFunction`], and refits an ordinary least-squares polynomial to the
//! corrected data.
//!
//! ## Design notes
//!
//! * **Rescaling**: Positions are mapped to `[-1, 1]` and values so that the
//!   maximum maps to 1 and the minimum to -1. The noise estimate is divided by
//!   the same factor so it stays commensurate with the rescaled residuals.
//! * **Convergence**: Iteration stops when `Σ(z - z_prev)² / Σ z_prev²`
//!   drops to the tolerance or the iteration cap is reached.
//! * **Constant input**: A signal with no spread is its own background.
//!
//! ## Invariants
//!
//! * The returned background has the same length as the input.
//! * The polynomial order never exceeds `len - 1`.
//!
//! ## Non-goals
//!
//! * This module does not classify samples or remove spikes.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use log::{debug, warn};
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::math::cost::CostFunction;
use crate::math::polynomial::{PolySolver, Polynomial};
use crate::primitives::errors::DespikeError;

// ============================================================================
// Options
// ============================================================================

/// Default convergence tolerance of the background fit.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Default iteration cap of the background fit.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Convergence settings for the background fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundOptions<T> {
    /// Relative squared change below which the fit is considered converged.
    pub tolerance: T,

    /// Hard cap on re-weighting iterations.
    pub max_iterations: usize,
}

impl<T: Float> BackgroundOptions<T> {
    /// Check tolerance and iteration cap.
    pub fn validate(&self) -> Result<(), DespikeError> {
        Validator::validate_tolerance(self.tolerance)?;
        Validator::validate_max_iterations(self.max_iterations)
    }
}

impl<T: Float> Default for BackgroundOptions<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::epsilon),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

// ============================================================================
// Result
// ============================================================================

/// Output of the background fitter.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundFit<T> {
    /// Background evaluated at every input position.
    pub background: Vec<T>,

    /// Fitted polynomial; evaluates directly at the input positions.
    pub polynomial: Polynomial<T>,

    /// Number of re-weighting iterations performed.
    pub iterations: usize,

    /// Whether the tolerance was reached before the iteration cap.
    pub converged: bool,
}

impl<T: Float> BackgroundFit<T> {
    /// Polynomial coefficients (ascending powers of the normalised position).
    pub fn coefficients(&self) -> &[T] {
        &self.polynomial.coefficients
    }
}

// ============================================================================
// Fitting
// ============================================================================

/// Scale parameter of the cost functions.
const ALPHA: f64 = 0.99 * 0.5;

/// Fit a robust polynomial background with default convergence settings.
///
/// # Errors
///
/// * `EmptyInput`, `MismatchedInputs`, `InvalidNumericValue` for bad arrays.
/// * `TooFewPoints` if `order >= positions.len()`.
/// * `InvalidNoise` for a negative or non-finite noise estimate.
/// * `SingularSystem` if the positions cannot determine the polynomial.
pub fn fit_background<T: PolySolver>(
    positions: &[T],
    values: &[T],
    order: usize,
    noise: T,
    cost_function: CostFunction,
) -> Result<BackgroundFit<T>, DespikeError> {
    fit_background_with(
        positions,
        values,
        order,
        noise,
        cost_function,
        &BackgroundOptions::default(),
    )
}

/// Fit a robust polynomial background with explicit convergence settings.
pub fn fit_background_with<T: PolySolver>(
    positions: &[T],
    values: &[T],
    order: usize,
    noise: T,
    cost_function: CostFunction,
    options: &BackgroundOptions<T>,
) -> Result<BackgroundFit<T>, DespikeError> {
    Validator::validate_inputs(positions, values)?;
    Validator::validate_order(order, values.len())?;
    Validator::validate_noise(noise)?;
    options.validate()?;

    let n = values.len();
    let two = T::one() + T::one();

    // Position mapping to [-1, 1]
    let (x_min, x_max) = min_max(positions);
    let center = (x_min + x_max) / two;
    let half_range = (x_max - x_min) / two;
    let scale = if half_range > T::zero() {
        half_range
    } else {
        T::one()
    };

    // Value mapping: max -> 1, min -> -1
    let (y_min, y_max) = min_max(values);
    let dely = (y_max - y_min) / two;

    if dely <= T::zero() {
        debug!("background: constant signal, no fit required");
        let mut coefficients = vec![T::zero(); order + 1];
        coefficients[0] = y_max;
        return Ok(BackgroundFit {
            background: values.to_vec(),
            polynomial: Polynomial {
                coefficients,
                center,
                scale,
            },
            iterations: 0,
            converged: true,
        });
    }

    let u: Vec<T> = positions.iter().map(|&x| (x - center) / scale).collect();
    let y: Vec<T> = values
        .iter()
        .map(|&v| (v - y_max) / dely + T::one())
        .collect();
    let threshold = noise / dely;
    let alpha = T::from(ALPHA).unwrap_or_else(|| T::one() / two);

    // Initial estimate: ordinary least squares
    let mut poly = Polynomial::fit(&u, &y, order)?;
    let mut z: Vec<T> = u.iter().map(|&x| poly.evaluate(x)).collect();
    let mut z_prev = vec![T::one(); n];
    let mut corrected = vec![T::zero(); n];

    let mut iterations = 0;
    let mut converged = relative_change(&z, &z_prev) <= options.tolerance;

    while !converged && iterations < options.max_iterations {
        iterations += 1;
        z_prev.copy_from_slice(&z);

        for ((c, &yi), &zi) in corrected.iter_mut().zip(&y).zip(&z) {
            *c = yi + cost_function.correction(yi - zi, threshold, alpha);
        }

        poly = Polynomial::fit(&u, &corrected, order)?;
        for (zi, &ui) in z.iter_mut().zip(&u) {
            *zi = poly.evaluate(ui);
        }

        converged = relative_change(&z, &z_prev) <= options.tolerance;
    }

    if converged {
        debug!(
            "background: order {} ({}) converged after {} iterations",
            order, cost_function, iterations
        );
    } else {
        warn!(
            "background: order {} ({}) did not converge within {} iterations",
            order, cost_function, options.max_iterations
        );
    }

    // Undo the value mapping
    let background: Vec<T> = z.iter().map(|&zi| (zi - T::one()) * dely + y_max).collect();

    let mut coefficients: Vec<T> = poly.coefficients.iter().map(|&a| a * dely).collect();
    coefficients[0] = coefficients[0] - dely + y_max;

    Ok(BackgroundFit {
        background,
        polynomial: Polynomial {
            coefficients,
            center: center + scale * poly.center,
            scale: scale * poly.scale,
        },
        iterations,
        converged,
    })
}

// ============================================================================
// Helpers
// ============================================================================

fn min_max<T: Float>(vals: &[T]) -> (T, T) {
    vals.iter()
        .fold((vals[0], vals[0]), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

// Relative squared change `Σ(z - z_prev)² / Σ z_prev²`.
fn relative_change<T: Float>(z: &[T], z_prev: &[T]) -> T {
    let (num, den) = z
        .iter()
        .zip(z_prev)
        .fold((T::zero(), T::zero()), |(num, den), (&a, &b)| {
            let d = a - b;
            (num + d * d, den + b * b)
        });

    if den > T::zero() {
        num / den
    } else if num > T::zero() {
        T::infinity()
    } else {
        T::zero()
    }
}
