//! Tests for the trial-averaging accumulators.
//!
//! These tests verify the aggregation layer:
//! - Point-wise mean over repeated trials
//! - NaN propagation through the running sum
//! - Grid discipline across trials
//!
//! ## Test Organization
//!
//! 1. **Trace Accumulation** - means, NaN poisoning, errors
//! 2. **Family Accumulation** - multi-column averaging

use approx::assert_relative_eq;

use sweepfit::prelude::*;

// ============================================================================
// Trace Accumulation Tests
// ============================================================================

/// Test the mean of two trials.
#[test]
fn test_mean_of_two_trials() {
    let x = vec![0.0, 1.0, 2.0];
    let mut acc = TraceAccumulator::new();
    acc.add(&x, &[1.0, 2.0, 3.0]).unwrap();
    acc.add(&x, &[3.0, 4.0, 5.0]).unwrap();

    let (gx, mean) = acc.finalize().unwrap();

    assert_eq!(acc.count(), 2);
    assert_eq!(gx, x);
    for (m, expected) in mean.iter().zip([2.0, 3.0, 4.0]) {
        assert_relative_eq!(*m, expected, epsilon = 1e-12);
    }
}

/// Test that a NaN sample in any trial poisons its point of the mean.
#[test]
fn test_nan_poisons_point() {
    let x = vec![0.0, 1.0, 2.0];
    let mut acc = TraceAccumulator::new();
    acc.add(&x, &[1.0, f64::NAN, 3.0]).unwrap();
    acc.add(&x, &[3.0, 4.0, 5.0]).unwrap();

    let (_, mean) = acc.finalize().unwrap();

    assert_relative_eq!(mean[0], 2.0, epsilon = 1e-12);
    assert!(mean[1].is_nan());
    assert_relative_eq!(mean[2], 4.0, epsilon = 1e-12);
}

/// Test that an empty accumulator finalizes to absence.
#[test]
fn test_empty_accumulator_absent() {
    let acc = TraceAccumulator::<f64>::new();

    assert!(acc.finalize().is_none());
}

/// Test that a trial with a different grid size is rejected.
#[test]
fn test_grid_mismatch_rejected() {
    let mut acc = TraceAccumulator::new();
    acc.add(&[0.0, 1.0], &[1.0, 2.0]).unwrap();

    let err = acc.add(&[0.0, 1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();

    assert_eq!(err, SweepError::GridMismatch { expected: 2, got: 3 });
    assert_eq!(acc.count(), 1);
}

/// Test that mismatched x/y shapes within one trial are rejected.
#[test]
fn test_trial_shape_mismatch_rejected() {
    let mut acc = TraceAccumulator::new();
    let err = acc.add(&[0.0, 1.0], &[1.0]).unwrap_err();

    assert_eq!(err, SweepError::MismatchedInputs { x_len: 2, y_len: 1 });
}

// ============================================================================
// Family Accumulation Tests
// ============================================================================

/// Test column-wise averaging over a whole family.
#[test]
fn test_family_mean() {
    let x = vec![0.0, 1.0];
    let conditions = vec![-0.2, -0.4];
    let mut acc = FamilyAccumulator::new();
    acc.add(&x, &conditions, &[vec![1.0, 2.0], vec![3.0, 4.0]])
        .unwrap();
    acc.add(&x, &conditions, &[vec![3.0, 4.0], vec![5.0, 6.0]])
        .unwrap();

    let (gx, gc, cols) = acc.finalize().unwrap();

    assert_eq!(gx, x);
    assert_eq!(gc, conditions);
    assert_relative_eq!(cols[0][0], 2.0, epsilon = 1e-12);
    assert_relative_eq!(cols[0][1], 3.0, epsilon = 1e-12);
    assert_relative_eq!(cols[1][0], 4.0, epsilon = 1e-12);
    assert_relative_eq!(cols[1][1], 5.0, epsilon = 1e-12);
}

/// Test that a family trial with a short column is rejected.
#[test]
fn test_family_short_column_rejected() {
    let mut acc = FamilyAccumulator::new();
    let err = acc
        .add(&[0.0, 1.0], &[-0.2], &[vec![1.0]])
        .unwrap_err();

    assert_eq!(err, SweepError::GridMismatch { expected: 2, got: 1 });
}

/// Test that a condition/column count mismatch is rejected.
#[test]
fn test_family_column_count_mismatch_rejected() {
    let mut acc = FamilyAccumulator::new();
    let err = acc
        .add(&[0.0, 1.0], &[-0.2, -0.4], &[vec![1.0, 2.0]])
        .unwrap_err();

    assert_eq!(
        err,
        SweepError::MismatchedInputs { x_len: 2, y_len: 1 }
    );
}
