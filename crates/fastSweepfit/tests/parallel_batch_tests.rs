//! Tests for the parallel batch frontend.
//!
//! These tests verify that parallel execution is a pure speedup:
//! - Parallel and sequential batches produce identical results
//! - ndarray inputs flow through the input abstraction
//! - Skipping semantics match the sequential driver
//!
//! ## Test Organization
//!
//! 1. **Equivalence** - parallel vs. sequential results
//! 2. **Inputs** - ndarray and slice interoperability
//! 3. **Batch Semantics** - skipping and merging

use approx::assert_relative_eq;
use ndarray::Array1;

use fastSweepfit::prelude::*;

fn knee_family(scaling: f64) -> SweepFamily<f64> {
    let x: Vec<f64> = (0..21).map(|i| i as f64 * 0.1).collect();
    let base: Vec<f64> = x
        .iter()
        .map(|&v| if v <= 1.0 { 5.0 * v } else { v + 4.0 })
        .collect();
    let conditions = vec![-0.2, -0.3, -0.4, -0.5];
    let columns: Vec<Vec<f64>> = conditions
        .iter()
        .map(|&c| base.iter().map(|&y| scaling * (2.0 + c) * y).collect())
        .collect();
    SweepFamily::new(x, conditions, columns).unwrap()
}

fn analyzer() -> ParallelAnalyzer<f64> {
    ParallelAnalyzer::new(
        Analysis::new()
            .filter_window(1)
            .segment_window(
                "dev-0",
                SegmentWindows {
                    steeper: (0.0, 0.9),
                    flatter: (1.1, 2.0),
                },
            )
            .baseline_rms(1e-9)
            .build()
            .unwrap(),
    )
}

// ============================================================================
// Equivalence Tests
// ============================================================================

/// Test that parallel and sequential batches are bit-identical.
#[test]
fn test_parallel_matches_sequential() {
    let families: Vec<(String, SweepFamily<f64>)> = (0..8)
        .map(|i| (format!("dev-{i}"), knee_family(1.0 + i as f64 * 0.1)))
        .collect();

    let runner = analyzer();
    let parallel = runner.run_batch(&families).unwrap();
    let sequential = runner.base().run_batch(&families).unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(parallel.len(), 8);
}

/// Test that disabling parallelism routes through the sequential driver.
#[test]
fn test_parallel_flag_off() {
    let families = vec![("dev-0".to_string(), knee_family(1.0))];

    let results = analyzer().parallel(false).run_batch(&families).unwrap();

    assert_eq!(results.len(), 1);
    assert_relative_eq!(results["dev-0"].record.knee_x, 1.0, epsilon = 1e-9);
}

// ============================================================================
// Input Tests
// ============================================================================

/// Test that ndarray inputs match the slice path exactly.
#[test]
fn test_ndarray_input_matches_slices() {
    let x: Vec<f64> = (0..21).map(|i| i as f64 * 0.1).collect();
    let y: Vec<f64> = x
        .iter()
        .map(|&v| if v <= 1.0 { 5.0 * v } else { v + 4.0 })
        .collect();
    let ax = Array1::from_vec(x.clone());
    let ay = Array1::from_vec(y.clone());

    let runner = analyzer();
    let from_arrays = runner.analyze_trace("dev-0", &ax, &ay).unwrap();
    let from_vecs = runner.analyze_trace("dev-0", &x, &y).unwrap();

    assert_eq!(from_arrays, from_vecs);
    assert_relative_eq!(from_arrays.record.knee_x, 1.0, epsilon = 1e-9);
}

/// Test that a non-contiguous ndarray view is rejected.
#[test]
fn test_non_contiguous_input_rejected() {
    let backing = Array1::from_iter((0..42).map(|i| i as f64));
    let strided = backing.slice(ndarray::s![..;2]);
    let y = Array1::from_elem(21, 1.0);

    let err = analyzer().analyze_trace("dev-0", &strided, &y).unwrap_err();

    assert!(matches!(err, SweepError::InvalidInput(_)));
}

// ============================================================================
// Batch Semantics Tests
// ============================================================================

/// Test that parallel batches skip families without the target condition.
#[test]
fn test_parallel_skips_missing_target() {
    let mut partial = knee_family(1.0);
    partial.conditions = vec![-0.6, -0.7, -0.8, -0.9];
    let families = vec![
        ("dev-0".to_string(), knee_family(1.0)),
        ("dev-9".to_string(), partial),
    ];

    let results = analyzer().run_batch(&families).unwrap();

    assert_eq!(results.len(), 1);
    assert!(results.contains_key("dev-0"));
}
