//! Tests for trace normalization.
//!
//! These tests verify the construction invariants of `Trace`:
//! - Sorting by the swept axis
//! - Finite-pair filtering
//! - Loud failure on shape violations
//!
//! ## Test Organization
//!
//! 1. **Normalization** - sorting and finite filtering
//! 2. **Contract Violations** - empty, mismatched, and starved inputs
//! 3. **Axis Replacement** - carrying a conditioned signal

use sweepfit::prelude::*;

// ============================================================================
// Normalization Tests
// ============================================================================

/// Test that an unsorted sweep is sorted ascending by x.
#[test]
fn test_unsorted_input_is_sorted() {
    let trace = Trace::new(&[2.0, 0.0, 1.0], &[20.0, 0.0, 10.0]).unwrap();

    assert_eq!(trace.x(), &[0.0, 1.0, 2.0]);
    assert_eq!(trace.y(), &[0.0, 10.0, 20.0]);
}

/// Test that already-sorted input is preserved verbatim.
#[test]
fn test_sorted_input_preserved() {
    let x = vec![0.0, 0.5, 1.0, 1.5];
    let y = vec![1.0, 2.0, 3.0, 4.0];
    let trace = Trace::new(&x, &y).unwrap();

    assert_eq!(trace.x(), x.as_slice());
    assert_eq!(trace.y(), y.as_slice());
    assert_eq!(trace.len(), 4);
}

/// Test that pairs with a non-finite coordinate are dropped.
#[test]
fn test_non_finite_pairs_dropped() {
    let x = vec![0.0, 1.0, f64::NAN, 3.0, 4.0];
    let y = vec![0.0, f64::INFINITY, 2.0, 3.0, 4.0];
    let trace = Trace::new(&x, &y).unwrap();

    assert_eq!(trace.x(), &[0.0, 3.0, 4.0]);
    assert_eq!(trace.y(), &[0.0, 3.0, 4.0]);
}

/// Test that equal x-values keep their relative order (stable sort).
#[test]
fn test_equal_x_stable_order() {
    let trace = Trace::new(&[1.0, 0.0, 1.0], &[10.0, 0.0, 20.0]).unwrap();

    assert_eq!(trace.x(), &[0.0, 1.0, 1.0]);
    assert_eq!(trace.y(), &[0.0, 10.0, 20.0]);
}

/// Test the accessor for the final trace point.
#[test]
fn test_last_point() {
    let trace = Trace::new(&[0.0, 2.0, 1.0], &[0.0, 7.0, 3.0]).unwrap();

    assert_eq!(trace.last(), (2.0, 7.0));
}

// ============================================================================
// Contract Violation Tests
// ============================================================================

/// Test that empty input fails loudly.
#[test]
fn test_empty_input_rejected() {
    let err = Trace::<f64>::new(&[], &[]).unwrap_err();

    assert_eq!(err, SweepError::EmptyInput);
}

/// Test that mismatched lengths fail loudly.
#[test]
fn test_mismatched_lengths_rejected() {
    let err = Trace::new(&[0.0, 1.0], &[0.0]).unwrap_err();

    assert_eq!(err, SweepError::MismatchedInputs { x_len: 2, y_len: 1 });
}

/// Test that fewer than 2 finite pairs fail loudly.
#[test]
fn test_too_few_finite_pairs_rejected() {
    let err = Trace::new(&[0.0, 1.0, 2.0], &[5.0, f64::NAN, f64::NAN]).unwrap_err();

    assert_eq!(err, SweepError::TooFewPoints { got: 1, min: 2 });
}

// ============================================================================
// Axis Replacement Tests
// ============================================================================

/// Test replacing the measured axis with a conditioned signal.
#[test]
fn test_with_y_replaces_measured_axis() {
    let trace = Trace::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let replaced = trace.with_y(vec![0.0, 10.0, 20.0]).unwrap();

    assert_eq!(replaced.x(), trace.x());
    assert_eq!(replaced.y(), &[0.0, 10.0, 20.0]);
}

/// Test that a wrong-length replacement is rejected.
#[test]
fn test_with_y_length_mismatch_rejected() {
    let trace = Trace::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let err = trace.with_y(vec![0.0, 1.0]).unwrap_err();

    assert_eq!(err, SweepError::MismatchedInputs { x_len: 3, y_len: 2 });
}

/// Test that a non-finite replacement is rejected.
#[test]
fn test_with_y_non_finite_rejected() {
    let trace = Trace::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
    let err = trace.with_y(vec![0.0, f64::NAN, 2.0]).unwrap_err();

    assert!(matches!(err, SweepError::InvalidNumericValue(_)));
}
