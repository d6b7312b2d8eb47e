//! Tests for SNR and dynamic-range metrics.
//!
//! These tests verify the noise-reference handling and the dB formulas:
//! - Reference priority and symmetry between reference paths
//! - Spike-signal formulas checked against their definitions
//! - Baseline reduction and quality banding
//!
//! ## Test Organization
//!
//! 1. **Formulas** - RMS, detection limit, dB values
//! 2. **Reference Paths** - trace vs. scalar symmetry, floor fallback
//! 3. **Baseline Reduction** - median detrending
//! 4. **Quality Banding** - dB thresholds

use approx::assert_relative_eq;

use sweepfit::evaluation::snr::{baseline_rms, compute_snr, NoiseReference, SnrQuality};

// ============================================================================
// Formula Tests
// ============================================================================

/// Test the spike-signal scenario against the defining formulas.
#[test]
fn test_single_spike_formulas() {
    // 63 zeros and one sample of 10: signal_rms = 10 / sqrt(64).
    let mut signal = vec![0.0f64; 64];
    signal[40] = 10.0;

    let m = compute_snr(&signal, NoiseReference::Rms(1.0));

    let expected_rms = 10.0 / 64.0f64.sqrt();
    assert_relative_eq!(m.signal_rms, expected_rms, epsilon = 1e-12);
    assert_relative_eq!(m.detection_limit, 3.0, epsilon = 1e-12);
    assert_relative_eq!(m.snr_db, 20.0 * expected_rms.log10(), epsilon = 1e-9);
    assert_relative_eq!(
        m.dynamic_range_db,
        20.0 * (10.0f64 / 3.0).log10(),
        epsilon = 1e-9
    );
    assert!(m.snr_db.is_finite());
}

/// Test that an all-zero signal stays finite through the log guards.
#[test]
fn test_silent_signal_finite() {
    let signal = vec![0.0f64; 32];

    let m = compute_snr(&signal, NoiseReference::Rms(1e-9));

    assert!(m.snr_db.is_finite());
    assert!(m.dynamic_range_db.is_finite());
    assert!(m.snr_db < -300.0);
}

// ============================================================================
// Reference Path Tests
// ============================================================================

/// Test that a baseline trace and its RMS scalar give identical results.
#[test]
fn test_trace_and_scalar_reference_symmetry() {
    // Alternating +-1 has mean 0 and population std exactly 1.
    let baseline: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let signal: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).sin() * 5.0).collect();

    let from_trace = compute_snr(&signal, NoiseReference::Trace(&baseline));
    let from_scalar = compute_snr(&signal, NoiseReference::Rms(1.0));

    assert_eq!(from_trace.noise_rms, from_scalar.noise_rms);
    assert_eq!(from_trace.snr_db, from_scalar.snr_db);
    assert_eq!(from_trace.dynamic_range_db, from_scalar.dynamic_range_db);
}

/// Test the floor fallback when no reference is available.
#[test]
fn test_unknown_reference_uses_floor() {
    let signal = vec![1.0f64; 16];

    let m = compute_snr(&signal, NoiseReference::Unknown);

    assert_relative_eq!(m.noise_rms, 1e-12, epsilon = 1e-24);
    assert_relative_eq!(m.detection_limit, 3e-12, epsilon = 1e-24);
}

// ============================================================================
// Baseline Reduction Tests
// ============================================================================

/// Test that the baseline RMS detrends by the median before the std.
#[test]
fn test_baseline_rms_detrends_median() {
    // A large DC offset must not inflate the noise figure.
    let offset: Vec<f64> = (0..100)
        .map(|i| 5.0 + if i % 2 == 0 { 1e-3 } else { -1e-3 })
        .collect();

    let rms = baseline_rms(&offset);

    assert_relative_eq!(rms, 1e-3, epsilon = 1e-12);
}

// ============================================================================
// Quality Banding Tests
// ============================================================================

/// Test the dB thresholds of the quality bands.
#[test]
fn test_quality_bands() {
    let signal = vec![1.0f64; 8];

    // signal_rms = 1; noise 1e-3 -> 60 dB, 0.05 -> 26 dB, 0.5 -> 6 dB.
    let excellent = compute_snr(&signal, NoiseReference::Rms(1e-3));
    let good = compute_snr(&signal, NoiseReference::Rms(0.05));
    let poor = compute_snr(&signal, NoiseReference::Rms(0.5));

    assert_eq!(excellent.quality(), SnrQuality::Excellent);
    assert_eq!(good.quality(), SnrQuality::Good);
    assert_eq!(poor.quality(), SnrQuality::Poor);
}
