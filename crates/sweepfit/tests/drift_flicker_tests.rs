//! Tests for drift and 1/f noise analysis.
//!
//! These tests verify the timed-record metrics:
//! - Drift rate, percent figures, and zero-mean guards
//! - Flicker preconditions and white-noise behavior
//!
//! ## Test Organization
//!
//! 1. **Drift** - linear records, percent conversions, guards
//! 2. **Flicker Preconditions** - sample and bin minimums
//! 3. **Flicker Estimation** - white-noise exponent

use approx::assert_relative_eq;

use sweepfit::evaluation::drift::drift_metrics;
use sweepfit::evaluation::flicker::flicker_noise;
use sweepfit::prelude::*;

// Deterministic white-ish noise from a 64-bit LCG.
fn lcg_noise(n: usize, seed: u64) -> Vec<f64> {
    let mut state = seed;
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 11) as f64 / (1u64 << 53) as f64 - 0.5
        })
        .collect()
}

// ============================================================================
// Drift Tests
// ============================================================================

/// Test the drift figures of a perfectly linear record.
#[test]
fn test_linear_record_drift() {
    let t: Vec<f64> = (0..101).map(|i| i as f64).collect();
    let i_meas: Vec<f64> = t.iter().map(|&s| 1e-6 + 1e-9 * s).collect();
    let record = Trace::new(&t, &i_meas).unwrap();

    let d = drift_metrics(&record);

    let mean = 1e-6 + 1e-9 * 50.0;
    assert_relative_eq!(d.rate, 1e-9, epsilon = 1e-18);
    assert_relative_eq!(d.offset, 1e-6, epsilon = 1e-12);
    assert_relative_eq!(
        d.percent_per_hour,
        1e-9 * 3600.0 / mean * 100.0,
        epsilon = 1e-6
    );
    assert_relative_eq!(d.total_drift, 1e-9 * 100.0, epsilon = 1e-15);
    assert_relative_eq!(
        d.total_percent,
        1e-7 / mean * 100.0,
        epsilon = 1e-6
    );
}

/// Test that a zero-mean record reports zero percent figures.
#[test]
fn test_zero_mean_record_percent_guard() {
    let t = vec![0.0, 1.0, 2.0, 3.0];
    let i_meas = vec![-3.0, -1.0, 1.0, 3.0];
    let record = Trace::new(&t, &i_meas).unwrap();

    let d = drift_metrics(&record);

    assert_relative_eq!(d.rate, 2.0, epsilon = 1e-12);
    assert_eq!(d.percent_per_hour, 0.0);
    assert_eq!(d.total_percent, 0.0);
}

/// Test that a drift-free record reports a zero rate.
#[test]
fn test_flat_record_zero_drift() {
    let t: Vec<f64> = (0..50).map(|i| i as f64 * 0.1).collect();
    let i_meas = vec![2e-6; 50];
    let record = Trace::new(&t, &i_meas).unwrap();

    let d = drift_metrics(&record);

    assert_eq!(d.rate, 0.0);
    assert_eq!(d.total_drift, 0.0);
    assert_eq!(d.percent_per_hour, 0.0);
}

// ============================================================================
// Flicker Precondition Tests
// ============================================================================

/// Test that records under 100 samples skip the analysis.
#[test]
fn test_flicker_too_short_absent() {
    let noise = lcg_noise(99, 7);

    assert!(flicker_noise(&noise, 100.0, (0.1, 10.0)).is_none());
}

/// Test that a band with too few bins skips the analysis.
#[test]
fn test_flicker_narrow_band_absent() {
    let noise = lcg_noise(1000, 7);

    // Bin spacing is 0.4 Hz; (0.1, 0.9) holds only two bins.
    assert!(flicker_noise(&noise, 100.0, (0.1, 0.9)).is_none());
}

// ============================================================================
// Flicker Estimation Tests
// ============================================================================

/// Test that white noise fits a near-zero spectral exponent.
#[test]
fn test_flicker_white_noise_flat_exponent() {
    let noise = lcg_noise(1000, 42);

    let flicker = flicker_noise(&noise, 100.0, (0.1, 10.0)).unwrap();

    assert!(
        flicker.exponent.abs() < 0.75,
        "white-noise exponent should be near zero, got {}",
        flicker.exponent
    );
    assert!(flicker.coefficient > 0.0);
    assert_eq!(flicker.frequencies.len(), flicker.psd.len());
    assert!(flicker.psd.iter().all(|&p| p >= 0.0));
}

/// Test that the 1 Hz figure equals the fitted coefficient.
#[test]
fn test_flicker_coefficient_at_1hz() {
    let noise = lcg_noise(2000, 3);

    let flicker = flicker_noise(&noise, 100.0, (0.1, 10.0)).unwrap();

    assert_relative_eq!(flicker.noise_at_1hz, flicker.coefficient, epsilon = 1e-18);
}
