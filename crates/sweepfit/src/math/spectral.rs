//! Power spectral density estimation for noise analysis.
//!
//! ## Purpose
//!
//! This module implements Welch's averaged-periodogram method over a real
//! input signal, producing the one-sided power spectral density the 1/f
//! noise analysis fits against.
//!
//! ## Design notes
//!
//! * **Welch defaults**: periodic Hann window, 50% segment overlap,
//!   per-segment constant detrend, density scaling `|X|^2 / (fs * sum w^2)`
//!   with one-sided doubling (DC and Nyquist excepted).
//! * **Degrade, don't panic**: unusable requests (empty input, zero segment
//!   length, non-positive sample rate, FFT failure) return empty spectra;
//!   the caller's minimum-bin precondition then reports the analysis as
//!   absent.
//!
//! ## Invariants
//!
//! * Returned frequency and PSD vectors have equal length `nperseg/2 + 1`.
//! * PSD entries are non-negative.

// External dependencies
use num_traits::Float;
use realfft::{FftNum, RealFftPlanner};

// ============================================================================
// Windows
// ============================================================================

/// Periodic Hann window of the given length.
pub fn hann_window<T: Float>(len: usize) -> Vec<T> {
    if len == 0 {
        return Vec::new();
    }
    let two_pi = T::from(core::f64::consts::TAU).unwrap();
    let n = T::from(len).unwrap();
    let half = T::from(0.5).unwrap();
    (0..len)
        .map(|i| half * (T::one() - (two_pi * T::from(i).unwrap() / n).cos()))
        .collect()
}

// ============================================================================
// Welch PSD
// ============================================================================

/// One-sided Welch power spectral density estimate.
///
/// Splits `data` into Hann-windowed segments of `nperseg` samples with 50%
/// overlap, removes each segment's mean, and averages the scaled
/// periodograms. Returns `(frequencies, psd)`; both are empty when the
/// request cannot be honored.
pub fn welch_psd<T: Float + FftNum>(
    data: &[T],
    sample_rate: T,
    nperseg: usize,
) -> (Vec<T>, Vec<T>) {
    if data.is_empty() || nperseg == 0 || sample_rate <= T::zero() {
        return (Vec::new(), Vec::new());
    }

    let nperseg = nperseg.min(data.len());
    let step = (nperseg - nperseg / 2).max(1);
    let n_bins = nperseg / 2 + 1;

    let window = hann_window::<T>(nperseg);
    let win_power = window.iter().fold(T::zero(), |acc, &w| acc + w * w);
    if win_power <= T::zero() {
        return (Vec::new(), Vec::new());
    }
    let scale = T::one() / (sample_rate * win_power);

    let planner = RealFftPlanner::<T>::new().plan_fft_forward(nperseg);
    let mut spectrum = planner.make_output_vec();
    let mut psd = vec![T::zero(); n_bins];
    let mut segments = 0usize;

    let mut start = 0usize;
    while start + nperseg <= data.len() {
        let segment = &data[start..start + nperseg];
        let seg_mean = segment.iter().fold(T::zero(), |acc, &v| acc + v)
            / T::from(nperseg).unwrap();

        let mut buf: Vec<T> = segment
            .iter()
            .zip(window.iter())
            .map(|(&v, &w)| (v - seg_mean) * w)
            .collect();

        if planner.process(&mut buf, &mut spectrum).is_err() {
            return (Vec::new(), Vec::new());
        }

        for (acc, c) in psd.iter_mut().zip(spectrum.iter()) {
            *acc = *acc + c.norm_sqr() * scale;
        }
        segments += 1;
        start += step;
    }

    if segments == 0 {
        return (Vec::new(), Vec::new());
    }

    // Average over segments; double the interior bins for the one-sided
    // spectrum (DC always excluded, Nyquist excluded when present).
    let seg_count = T::from(segments).unwrap();
    let two = T::from(2.0).unwrap();
    let has_nyquist = nperseg % 2 == 0;
    for (k, v) in psd.iter_mut().enumerate() {
        *v = *v / seg_count;
        let is_edge = k == 0 || (has_nyquist && k == n_bins - 1);
        if !is_edge {
            *v = *v * two;
        }
    }

    let freqs = (0..n_bins)
        .map(|k| T::from(k).unwrap() * sample_rate / T::from(nperseg).unwrap())
        .collect();

    (freqs, psd)
}
