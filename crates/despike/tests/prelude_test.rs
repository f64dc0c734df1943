//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports everything needed for a
//! complete despike workflow without further imports.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Builder Pattern** - Complete workflows work with prelude imports

use despike::prelude::*;

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that the free functions are exported.
#[test]
fn test_prelude_free_functions() {
    let mut signal = vec![0.0f64; 20];
    signal[10] = 100.0;

    let estimate = estimate_noise(&signal, 3.5, 2, AsymmetricTruncatedQuadratic);
    assert!(estimate.is_ok(), "estimate_noise should be usable from the prelude");

    let report = despike(&mut signal, 3, 3.5, 2);
    assert!(report.is_ok(), "despike should be usable from the prelude");

    let positions: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let fit = fit_background(&positions, &signal, 2, 1.0, SymmetricHuber);
    assert!(fit.is_ok(), "fit_background should be usable from the prelude");
}

/// Test that every cost function variant is exported unqualified.
#[test]
fn test_prelude_cost_functions() {
    let _ = Despike::<f64>::new().cost_function(SymmetricHuber);
    let _ = Despike::<f64>::new().cost_function(AsymmetricHuber);
    let _ = Despike::<f64>::new().cost_function(SymmetricTruncatedQuadratic);
    let _ = Despike::<f64>::new().cost_function(AsymmetricTruncatedQuadratic);
}

// ============================================================================
// Builder Pattern Tests
// ============================================================================

/// Test a complete builder workflow.
#[test]
fn test_prelude_builder_workflow() {
    let mut signal = vec![0.0f64; 20];
    signal[10] = 100.0;

    let despiker = Despike::new()
        .length(3)
        .threshold(3.5)
        .order(2)
        .build()
        .unwrap();

    let report: DespikeReport<f64> = despiker.apply(&mut signal).unwrap();
    assert_eq!(report.patched_count(), 1);

    match report.outcomes[0] {
        GroupOutcome::Patched { group, .. } => assert_eq!(group, SpikeGroup::new(10, 10)),
        other => panic!("expected a patched group, got {:?}", other),
    }
}

/// Test that errors are exported.
#[test]
fn test_prelude_error() {
    let err: DespikeError = Despike::<f64>::new().build().unwrap_err();
    assert_eq!(err, DespikeError::MissingParameter { parameter: "length" });
}
