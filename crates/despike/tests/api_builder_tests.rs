//! Tests for the fluent builder.
//!
//! ## Test Organization
//!
//! 1. **Defaults** - Values resolved at `build()`
//! 2. **Validation** - Deferred parameter checks
//! 3. **Duplicates** - Parameters configured more than once
//! 4. **Execution** - Builder and free functions agree

use approx::assert_relative_eq;

use despike::prelude::*;

// ============================================================================
// Defaults Tests
// ============================================================================

/// Test that unset parameters resolve to their defaults.
#[test]
fn test_builder_defaults() {
    let despiker = Despike::<f64>::new().length(5).build().unwrap();
    let config = despiker.config();

    assert_eq!(config.length, 5);
    assert_relative_eq!(config.threshold, 3.5);
    assert_eq!(config.order, 6);
    assert_eq!(config.cost_function, SymmetricTruncatedQuadratic);
    assert_relative_eq!(config.background.tolerance, 1e-9);
    assert_eq!(config.background.max_iterations, 1000);
}

/// Test that explicitly set parameters are kept.
#[test]
fn test_builder_overrides() {
    let despiker = Despike::<f64>::new()
        .length(7)
        .threshold(2.0)
        .order(3)
        .cost_function(AsymmetricHuber)
        .tolerance(1e-6)
        .max_iterations(50)
        .build()
        .unwrap();
    let config = despiker.config();

    assert_eq!(config.length, 7);
    assert_relative_eq!(config.threshold, 2.0);
    assert_eq!(config.order, 3);
    assert_eq!(config.cost_function, AsymmetricHuber);
    assert_relative_eq!(config.background.tolerance, 1e-6);
    assert_eq!(config.background.max_iterations, 50);
}

// ============================================================================
// Validation Tests
// ============================================================================

/// Test that `length` is required.
#[test]
fn test_builder_missing_length() {
    let result = Despike::<f64>::new().threshold(3.0).build();
    assert_eq!(
        result.unwrap_err(),
        DespikeError::MissingParameter { parameter: "length" }
    );
}

/// Test rejection of a zero length.
#[test]
fn test_builder_invalid_length() {
    let result = Despike::<f64>::new().length(0).build();
    assert_eq!(result.unwrap_err(), DespikeError::InvalidLength(0));
}

/// Test rejection of negative and non-finite thresholds.
#[test]
fn test_builder_invalid_threshold() {
    let result = Despike::<f64>::new().length(3).threshold(-1.0).build();
    assert_eq!(result.unwrap_err(), DespikeError::InvalidThreshold(-1.0));

    let result = Despike::<f64>::new().length(3).threshold(f64::NAN).build();
    assert!(matches!(result, Err(DespikeError::InvalidThreshold(_))));

    let result = Despike::<f64>::new()
        .length(3)
        .threshold(f64::INFINITY)
        .build();
    assert!(matches!(result, Err(DespikeError::InvalidThreshold(_))));
}

/// Test that a zero threshold is accepted.
#[test]
fn test_builder_zero_threshold() {
    let result = Despike::<f64>::new().length(3).threshold(0.0).build();
    assert!(result.is_ok());
}

/// Test rejection of bad convergence settings.
#[test]
fn test_builder_invalid_convergence() {
    let result = Despike::<f64>::new().length(3).tolerance(0.0).build();
    assert_eq!(result.unwrap_err(), DespikeError::InvalidTolerance(0.0));

    let result = Despike::<f64>::new().length(3).max_iterations(0).build();
    assert_eq!(result.unwrap_err(), DespikeError::InvalidIterations(0));

    let result = Despike::<f64>::new()
        .length(3)
        .max_iterations(1_000_000)
        .build();
    assert_eq!(result.unwrap_err(), DespikeError::InvalidIterations(1_000_000));
}

// ============================================================================
// Duplicate Parameter Tests
// ============================================================================

/// Test that setting a parameter twice fails at build time.
#[test]
fn test_builder_duplicate_parameters() {
    let result = Despike::<f64>::new().length(3).length(4).build();
    assert_eq!(
        result.unwrap_err(),
        DespikeError::DuplicateParameter { parameter: "length" }
    );

    let result = Despike::<f64>::new()
        .length(3)
        .cost_function(SymmetricHuber)
        .cost_function(AsymmetricHuber)
        .build();
    assert_eq!(
        result.unwrap_err(),
        DespikeError::DuplicateParameter {
            parameter: "cost_function"
        }
    );
}

/// Test that duplicates are reported before a missing length.
#[test]
fn test_builder_duplicate_before_missing() {
    let result = Despike::<f64>::new().order(2).order(3).build();
    assert_eq!(
        result.unwrap_err(),
        DespikeError::DuplicateParameter { parameter: "order" }
    );
}

// ============================================================================
// Execution Tests
// ============================================================================

/// Test that the builder and the free function produce the same result.
#[test]
fn test_builder_matches_free_function() {
    let mut a = vec![0.0f64; 20];
    a[10] = 100.0;
    let mut b = a.clone();

    let despiker = Despike::new().length(3).threshold(3.5).order(2).build().unwrap();
    let report_a = despiker.apply(&mut a).unwrap();
    let report_b = despike(&mut b, 3, 3.5, 2).unwrap();

    assert_eq!(a, b);
    assert_eq!(report_a, report_b);
}

/// Test that `estimate` leaves the signal untouched and agrees with `apply`.
#[test]
fn test_despiker_estimate() {
    let mut signal = vec![0.0f64; 20];
    signal[10] = 100.0;
    let original = signal.clone();

    let despiker = Despike::new().length(3).order(2).build().unwrap();
    let estimate = despiker.estimate(&signal).unwrap();
    assert_eq!(signal, original);
    assert_eq!(estimate.far, vec![10]);

    let report = despiker.apply(&mut signal).unwrap();
    assert_relative_eq!(report.noise, estimate.noise);
    assert_eq!(report.far_count(), estimate.far.len());
}
