#![cfg(feature = "dev")]
//! Tests for input and parameter validation.
//!
//! ## Test Organization
//!
//! 1. **Input Validation** - Signals and paired arrays
//! 2. **Parameter Validation** - Bounds on each parameter

use despike::internals::engine::validator::Validator;
use despike::internals::primitives::errors::DespikeError;

// ============================================================================
// Input Validation Tests
// ============================================================================

/// Test signal checks.
#[test]
fn test_validate_signal() {
    assert!(Validator::validate_signal(&[1.0f64, 2.0]).is_ok());

    let empty: [f64; 0] = [];
    assert_eq!(
        Validator::validate_signal(&empty).unwrap_err(),
        DespikeError::EmptyInput
    );

    let err = Validator::validate_signal(&[1.0f64, f64::NAN]).unwrap_err();
    match err {
        DespikeError::InvalidNumericValue(msg) => assert!(msg.starts_with("signal[1]")),
        other => panic!("unexpected error {:?}", other),
    }
}

/// Test paired array checks.
#[test]
fn test_validate_inputs() {
    assert!(Validator::validate_inputs(&[0.0f64, 1.0], &[2.0, 3.0]).is_ok());
    assert_eq!(
        Validator::validate_inputs(&[0.0f64, 1.0], &[2.0]).unwrap_err(),
        DespikeError::MismatchedInputs { x_len: 2, y_len: 1 }
    );
    assert!(matches!(
        Validator::validate_inputs(&[f64::INFINITY], &[2.0]),
        Err(DespikeError::InvalidNumericValue(_))
    ));
}

/// Test the order against the sample count.
#[test]
fn test_validate_order() {
    assert!(Validator::validate_order(6, 7).is_ok());
    assert_eq!(
        Validator::validate_order(6, 6).unwrap_err(),
        DespikeError::TooFewPoints { got: 6, min: 7 }
    );
}

// ============================================================================
// Parameter Validation Tests
// ============================================================================

/// Test the parameter bounds.
#[test]
fn test_validate_parameters() {
    assert!(Validator::validate_threshold(0.0f64).is_ok());
    assert!(Validator::validate_threshold(-0.5f64).is_err());

    assert!(Validator::validate_length(1).is_ok());
    assert!(Validator::validate_length(0).is_err());

    assert!(Validator::validate_noise(0.0f64).is_ok());
    assert!(Validator::validate_noise(f64::NAN).is_err());

    assert!(Validator::validate_tolerance(1e-12f64).is_ok());
    assert!(Validator::validate_tolerance(0.0f64).is_err());

    assert!(Validator::validate_max_iterations(1).is_ok());
    assert!(Validator::validate_max_iterations(Validator::MAX_ITERATIONS).is_ok());
    assert!(Validator::validate_max_iterations(Validator::MAX_ITERATIONS + 1).is_err());
}

/// Test duplicate tracking.
#[test]
fn test_validate_no_duplicates() {
    assert!(Validator::validate_no_duplicates(None).is_ok());
    assert_eq!(
        Validator::validate_no_duplicates(Some("order")).unwrap_err(),
        DespikeError::DuplicateParameter { parameter: "order" }
    );
}
