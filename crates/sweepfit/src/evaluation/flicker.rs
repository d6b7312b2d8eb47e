//! 1/f (flicker) noise analysis.
//!
//! ## Purpose
//!
//! This module characterizes the low-frequency noise of a sampled current
//! record: a Welch power spectral density, a log-log line fit over the
//! flicker band, and the derived 1/f coefficient and exponent.
//!
//! ## Key concepts
//!
//! * **Preconditions, not faults**: the analysis needs at least 100 samples
//!   and more than 5 in-band frequency bins; anything less reports the
//!   analysis as absent (`None`), a normal outcome.
//! * **Exclusive band**: a bin belongs to the band when its frequency lies
//!   strictly between the band edges.

// External dependencies
use num_traits::Float;
use realfft::FftNum;

// Internal dependencies
use crate::algorithms::linear::LineFit;
use crate::math::spectral::welch_psd;

// Minimum record length for a usable spectrum.
const MIN_SAMPLES: usize = 100;

// Minimum number of in-band bins for the log-log fit.
const MIN_BAND_BINS: usize = 6;

// ============================================================================
// FlickerNoise
// ============================================================================

/// Fitted 1/f noise characteristics of one current record.
#[derive(Debug, Clone, PartialEq)]
pub struct FlickerNoise<T> {
    /// PSD coefficient at 1 Hz (`10^intercept` of the log-log fit).
    pub coefficient: T,

    /// Spectral exponent (negated log-log slope).
    pub exponent: T,

    /// Power spectral density at 1 Hz (equal to the coefficient for a pure
    /// 1/f^a law).
    pub noise_at_1hz: T,

    /// Welch frequency axis.
    pub frequencies: Vec<T>,

    /// Welch one-sided PSD.
    pub psd: Vec<T>,
}

// ============================================================================
// Computation
// ============================================================================

/// Estimate the 1/f noise law of a uniformly sampled current record.
///
/// Welch segments span a quarter of the record. Returns `None` when the
/// record is shorter than 100 samples or the band `(band.0, band.1)` covers
/// 5 or fewer bins.
pub fn flicker_noise<T: Float + FftNum>(
    current: &[T],
    sample_rate: T,
    band: (T, T),
) -> Option<FlickerNoise<T>> {
    if current.len() < MIN_SAMPLES {
        return None;
    }

    let (freqs, psd) = welch_psd(current, sample_rate, current.len() / 4);

    let in_band: Vec<usize> = (0..freqs.len())
        .filter(|&i| freqs[i] > band.0 && freqs[i] < band.1)
        .collect();
    if in_band.len() < MIN_BAND_BINS {
        return None;
    }

    let log_f: Vec<T> = in_band.iter().map(|&i| freqs[i].log10()).collect();
    let log_p: Vec<T> = in_band.iter().map(|&i| psd[i].log10()).collect();
    let line = LineFit::fit(&log_f, &log_p);

    let ten = T::from(10.0).unwrap();
    let coefficient = ten.powf(line.intercept);

    Some(FlickerNoise {
        coefficient,
        exponent: -line.slope,
        noise_at_1hz: coefficient,
        frequencies: freqs,
        psd,
    })
}
