//! Tests for robust polynomial background fitting.
//!
//! ## Test Organization
//!
//! 1. **Exact Fits** - Noise-free polynomials are reproduced
//! 2. **Robustness** - Peaks do not drag the background up
//! 3. **Edge Cases** - Constant signals, short signals, bad input

use approx::{assert_abs_diff_eq, assert_relative_eq};

use despike::prelude::*;

fn positions(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

// ============================================================================
// Exact Fit Tests
// ============================================================================

/// Test that a noise-free quadratic is reproduced.
#[test]
fn test_exact_quadratic() {
    let x = positions(21);
    let y: Vec<f64> = x.iter().map(|&t| 1.0 + 0.5 * t + 0.02 * t * t).collect();

    for cost in CostFunction::ALL {
        let fit = fit_background(&x, &y, 2, 0.1, cost).unwrap();

        assert!(fit.converged);
        for (&b, &v) in fit.background.iter().zip(&y) {
            assert_abs_diff_eq!(b, v, epsilon = 1e-8);
        }
    }
}

/// Test that the returned polynomial evaluates to the background.
#[test]
fn test_polynomial_matches_background() {
    let x = positions(21);
    let y: Vec<f64> = x
        .iter()
        .map(|&t| 3.0 - 0.2 * t + 0.01 * t * t + if t == 10.0 { 5.0 } else { 0.0 })
        .collect();

    let fit = fit_background(&x, &y, 2, 0.5, AsymmetricTruncatedQuadratic).unwrap();

    assert_eq!(fit.coefficients().len(), 3);
    assert_eq!(fit.polynomial.order(), 2);
    for (&t, &b) in x.iter().zip(&fit.background) {
        assert_relative_eq!(fit.polynomial.evaluate(t), b, epsilon = 1e-9);
    }
}

/// Test that non-integer positions are handled.
#[test]
fn test_scaled_positions() {
    let x: Vec<f64> = (0..15).map(|i| 400.0 + 2.5 * i as f64).collect();
    let y: Vec<f64> = x.iter().map(|&t| 0.5 * t - 100.0).collect();

    let fit = fit_background(&x, &y, 1, 0.1, SymmetricHuber).unwrap();

    for (&b, &v) in fit.background.iter().zip(&y) {
        assert_abs_diff_eq!(b, v, epsilon = 1e-8);
    }
    assert_abs_diff_eq!(fit.polynomial.evaluate(400.0), 100.0, epsilon = 1e-8);
}

// ============================================================================
// Robustness Tests
// ============================================================================

/// Test that a Gaussian peak does not lift the background.
#[test]
fn test_peak_ignored() {
    let x = positions(101);
    let baseline: Vec<f64> = x.iter().map(|&t| 2.0 + 0.05 * t).collect();
    let y: Vec<f64> = x
        .iter()
        .zip(&baseline)
        .map(|(&t, &b)| b + 8.0 * (-((t - 50.0) / 4.0).powi(2)).exp())
        .collect();
    let noise = median_absolute_deviation(&y);

    for cost in CostFunction::ALL {
        let fit = fit_background(&x, &y, 2, noise, cost).unwrap();
        let lift = fit.background[50] - baseline[50];
        assert!(lift < 1.0, "{} lifted the background by {}", cost, lift);
    }

    // Truncated quadratic costs ignore the peak almost entirely
    for cost in [SymmetricTruncatedQuadratic, AsymmetricTruncatedQuadratic] {
        let fit = fit_background(&x, &y, 2, noise, cost).unwrap();
        for (&b, &v) in fit.background.iter().zip(&baseline) {
            assert_abs_diff_eq!(b, v, epsilon = 0.2);
        }
    }
}

/// Test that hitting the iteration cap is not an error.
#[test]
fn test_iteration_cap() {
    let x = positions(101);
    let y: Vec<f64> = x
        .iter()
        .map(|&t| 2.0 + 0.05 * t + 8.0 * (-((t - 50.0) / 4.0).powi(2)).exp())
        .collect();
    let options = BackgroundOptions {
        tolerance: 1e-9,
        max_iterations: 2,
    };

    let fit =
        fit_background_with(&x, &y, 2, 0.1, AsymmetricTruncatedQuadratic, &options).unwrap();

    assert_eq!(fit.iterations, 2);
    assert!(!fit.converged);
    assert_eq!(fit.background.len(), 101);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

/// Test that a constant signal is its own background.
#[test]
fn test_constant_signal() {
    let x = positions(8);
    let y = vec![-3.0f64; 8];

    let fit = fit_background(&x, &y, 3, 0.0, SymmetricTruncatedQuadratic).unwrap();

    assert_eq!(fit.iterations, 0);
    assert!(fit.converged);
    assert_eq!(fit.background, y);
    assert_eq!(fit.coefficients(), &[-3.0, 0.0, 0.0, 0.0]);
    assert_relative_eq!(fit.polynomial.evaluate(2.5), -3.0);
}

/// Test that the order must be below the number of samples.
#[test]
fn test_too_few_points() {
    let x = positions(4);
    let y = vec![1.0f64, 2.0, 0.0, 3.0];

    assert_eq!(
        fit_background(&x, &y, 4, 0.1, AsymmetricTruncatedQuadratic).unwrap_err(),
        DespikeError::TooFewPoints { got: 4, min: 5 }
    );
    assert!(fit_background(&x, &y, 3, 0.1, AsymmetricTruncatedQuadratic).is_ok());
}

/// Test input validation.
#[test]
fn test_invalid_input() {
    let x = positions(5);
    let y = vec![1.0f64, 2.0, 3.0];
    assert_eq!(
        fit_background(&x, &y, 1, 0.1, SymmetricHuber).unwrap_err(),
        DespikeError::MismatchedInputs { x_len: 5, y_len: 3 }
    );

    let empty: Vec<f64> = Vec::new();
    assert_eq!(
        fit_background(&empty, &empty, 1, 0.1, SymmetricHuber).unwrap_err(),
        DespikeError::EmptyInput
    );

    let y = vec![1.0f64, 2.0, f64::INFINITY, 4.0, 5.0];
    assert!(matches!(
        fit_background(&x, &y, 1, 0.1, SymmetricHuber),
        Err(DespikeError::InvalidNumericValue(_))
    ));

    let y = vec![1.0f64, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(
        fit_background(&x, &y, 1, -0.1, SymmetricHuber).unwrap_err(),
        DespikeError::InvalidNoise(-0.1)
    );
}
