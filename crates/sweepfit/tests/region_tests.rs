//! Tests for the saturation-region selector.
//!
//! These tests verify the selection priority chain:
//! - Explicit windows and the single widening retry
//! - Fallthrough to the overdrive and fractional-tail paths
//! - Tail trimming of the selected region
//!
//! ## Test Organization
//!
//! 1. **Explicit Windows** - direct hit, widening, fallthrough
//! 2. **Overdrive Cutoff** - threshold-derived selection
//! 3. **Fractional Tail** - index-based fallback
//! 4. **Edge Trimming** - artifact exclusion

use sweepfit::algorithms::region::{select_region, RegionRule};
use sweepfit::prelude::*;

fn rule(frac_start: f64) -> RegionRule<f64> {
    RegionRule::tail(frac_start)
}

// ============================================================================
// Explicit Window Tests
// ============================================================================

/// Test an explicit window that directly matches at least 3 points.
#[test]
fn test_explicit_window_direct_hit() {
    let x = vec![0.0, 1.0, 1.2, 1.4, 1.6, 2.5];
    let mut r = rule(0.7);
    r.window = Some((1.0, 1.6));

    let mask = select_region(&x, &r);

    assert_eq!(mask.indices(), vec![1, 2, 3, 4]);
}

/// Test that a starved window widens once by the fixed pad and succeeds.
#[test]
fn test_starved_window_widens_and_succeeds() {
    // Only 0.38 falls inside (0.35, 0.40); widening by 0.05 captures
    // 0.32 and 0.44 as well.
    let x = vec![0.0, 0.32, 0.38, 0.44, 1.0];
    let mut r = rule(0.7);
    r.window = Some((0.35, 0.40));

    let mask = select_region(&x, &r);

    assert_eq!(mask.indices(), vec![1, 2, 3]);
}

/// Test that a window that stays starved after widening falls through to
/// the fractional tail.
#[test]
fn test_starved_window_falls_through_to_tail() {
    let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.1).collect();
    let mut r = rule(0.7);
    r.window = Some((10.0, 11.0));

    let mask = select_region(&x, &r);

    // 0.7 * 10 = 7: the final 3 points.
    assert_eq!(mask.indices(), vec![7, 8, 9]);
}

/// Test that the widened-but-starved window prefers a finite threshold over
/// the tail when one is available.
#[test]
fn test_starved_window_falls_through_to_threshold() {
    let x: Vec<f64> = (0..10).map(|i| i as f64 * 0.1).collect();
    let mut r = rule(0.7);
    r.window = Some((10.0, 11.0));
    r.threshold_x = Some(0.55);
    r.gate_voltage = 0.0;

    let mask = select_region(&x, &r);

    // Overdrive |0 - 0.55| = 0.55: points with x >= 0.55.
    assert_eq!(mask.indices(), vec![6, 7, 8, 9]);
}

// ============================================================================
// Overdrive Cutoff Tests
// ============================================================================

/// Test the overdrive cutoff with no explicit window.
#[test]
fn test_threshold_overdrive_selection() {
    let x = vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
    let mut r = rule(0.7);
    r.threshold_x = Some(0.5);

    let mask = select_region(&x, &r);

    assert_eq!(mask.indices(), vec![3, 4, 5]);
}

/// Test that a non-finite threshold is ignored.
#[test]
fn test_non_finite_threshold_ignored() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let mut r = rule(0.7);
    r.threshold_x = Some(f64::NAN);

    let mask = select_region(&x, &r);

    assert_eq!(mask.indices(), vec![7, 8, 9]);
}

// ============================================================================
// Fractional Tail Tests
// ============================================================================

/// Test the fractional-tail fallback keeps the final (1 - frac) share.
#[test]
fn test_fractional_tail() {
    let x: Vec<f64> = (0..20).map(|i| i as f64).collect();

    let mask = select_region(&x, &rule(0.70));

    assert_eq!(mask.count(), 6);
    assert_eq!(mask.indices(), vec![14, 15, 16, 17, 18, 19]);
}

/// Test that a zero fraction selects the whole sweep.
#[test]
fn test_zero_fraction_selects_all() {
    let x: Vec<f64> = (0..5).map(|i| i as f64).collect();

    let mask = select_region(&x, &rule(0.0));

    assert_eq!(mask.count(), 5);
}

// ============================================================================
// Edge Trimming Tests
// ============================================================================

/// Test that edge trimming removes points from the tail of the selection.
#[test]
fn test_edge_trim_removes_tail() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let mut r = rule(0.5);
    r.edge_trim = 2;

    let mask = select_region(&x, &r);

    assert_eq!(mask.indices(), vec![5, 6, 7]);
}

/// Test that a zero trim leaves the selection untouched.
#[test]
fn test_zero_edge_trim_noop() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let mask = select_region(&x, &rule(0.5));

    assert_eq!(mask.count(), 5);
}

/// Test that trimming more points than selected empties the mask.
#[test]
fn test_over_trim_empties_mask() {
    let x: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let mut r = rule(0.8);
    r.edge_trim = 5;

    let mask = select_region(&x, &r);

    assert_eq!(mask.count(), 0);
}
