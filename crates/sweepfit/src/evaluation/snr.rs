//! Signal-to-noise and dynamic-range metrics.
//!
//! ## Purpose
//!
//! This module relates a measured signal to a noise reference: baseline RMS,
//! detection limit, SNR in decibels, and dynamic range.
//!
//! ## Key concepts
//!
//! * **Reference priority**: a baseline trace beats an explicit RMS value;
//!   with neither, a small floor keeps the ratios defined.
//! * **Logarithm guards**: every ratio entering a `log10` is floored at a
//!   tiny epsilon, so a silent signal yields a very negative dB figure
//!   instead of `-inf` or NaN.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::stats::{median, rms, std_dev};

// Noise RMS assumed when no reference is supplied at all.
const DEFAULT_NOISE_FLOOR: f64 = 1e-12;

// Floor applied to ratios before taking logarithms.
const LOG_EPSILON: f64 = 1e-18;

// ============================================================================
// Noise Reference
// ============================================================================

/// Source of the baseline noise level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NoiseReference<'a, T> {
    /// A recorded baseline trace; its population standard deviation is the
    /// noise RMS. Takes priority over an explicit value.
    Trace(&'a [T]),

    /// A precomputed noise RMS.
    Rms(T),

    /// No reference available; a small floor is assumed.
    Unknown,
}

/// Population standard deviation of a median-detrended baseline record.
///
/// The conventional way a grounded-input noise capture is reduced to a
/// single RMS figure before analysis runs.
pub fn baseline_rms<T: Float>(baseline: &[T]) -> T {
    if baseline.is_empty() {
        return T::zero();
    }
    let m = median(baseline);
    let detrended: Vec<T> = baseline.iter().map(|&v| v - m).collect();
    std_dev(&detrended)
}

// ============================================================================
// SnrMetrics
// ============================================================================

/// Signal-to-noise figures for one measured signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnrMetrics<T> {
    /// Noise RMS actually used.
    pub noise_rms: T,

    /// Detection limit `3 * noise_rms`.
    pub detection_limit: T,

    /// Signal RMS `sqrt(mean(signal^2))`.
    pub signal_rms: T,

    /// Signal-to-noise ratio in dB.
    pub snr_db: T,

    /// Dynamic range in dB: peak signal against the detection limit.
    pub dynamic_range_db: T,
}

/// Qualitative banding of an SNR figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnrQuality {
    /// Above 40 dB.
    Excellent,

    /// Above 20 dB.
    Good,

    /// 20 dB or below.
    Poor,
}

impl<T: Float> SnrMetrics<T> {
    /// Band the SNR into a qualitative rating.
    pub fn quality(&self) -> SnrQuality {
        let forty = T::from(40.0).unwrap();
        let twenty = T::from(20.0).unwrap();
        if self.snr_db > forty {
            SnrQuality::Excellent
        } else if self.snr_db > twenty {
            SnrQuality::Good
        } else {
            SnrQuality::Poor
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// Compute SNR metrics for `signal` against the given noise reference.
pub fn compute_snr<T: Float>(signal: &[T], reference: NoiseReference<'_, T>) -> SnrMetrics<T> {
    let noise_rms = match reference {
        NoiseReference::Trace(baseline) => std_dev(baseline),
        NoiseReference::Rms(value) => value,
        NoiseReference::Unknown => T::from(DEFAULT_NOISE_FLOOR).unwrap(),
    };

    let eps = T::from(LOG_EPSILON).unwrap();
    let twenty = T::from(20.0).unwrap();

    let signal_rms = rms(signal);
    let snr_linear = signal_rms / noise_rms.max(eps);
    let snr_db = twenty * snr_linear.max(eps).log10();

    let detection_limit = T::from(3.0).unwrap() * noise_rms;
    let peak = signal
        .iter()
        .fold(T::zero(), |acc, &v| acc.max(v.abs()));
    let dynamic_range_db = twenty * (peak / detection_limit.max(eps)).max(eps).log10();

    SnrMetrics {
        noise_rms,
        detection_limit,
        signal_rms,
        snr_db,
        dynamic_range_db,
    }
}
