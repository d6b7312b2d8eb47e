//! Signal conditioning: NaN-tolerant zero-phase moving-average smoothing.
//!
//! ## Purpose
//!
//! This module implements the conditioning step applied to each measured
//! trace before any region fitting: non-finite samples are bridged by
//! linear interpolation, then a centered moving average with edge padding
//! smooths the result without changing its length.
//!
//! ## Design notes
//!
//! * **No-op, not error**: a window of 1 (or 0 passes) returns a verbatim
//!   copy, NaNs included; disabling the filter must not alter the data.
//! * **Zero phase**: the average can be applied once forward and once on the
//!   reversed signal, cancelling the single-pass phase lag.
//! * **Padding**: output length always equals input length; the edges are
//!   synthesized according to [`PadMode`] rather than truncated.
//!
//! ## Key concepts
//!
//! * **Interpolation domain**: sample index, not the sweep axis; the finite
//!   subset anchors the interpolant and the ends clamp to the nearest
//!   finite value.
//!
//! ## Non-goals
//!
//! * This module does not decide filter settings; those arrive from the
//!   analysis configuration.

// External dependencies
use num_traits::Float;

// ============================================================================
// Pad Mode
// ============================================================================

/// Edge padding applied before the moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PadMode {
    /// Mirror values across the boundary without repeating the edge sample.
    #[default]
    Reflect,

    /// Repeat the edge sample.
    Edge,

    /// Pad with zeros beyond the boundaries.
    Zero,
}

// Map a virtual index (possibly out of range) back into [0, n) by
// mirror reflection with period 2(n-1).
fn reflect_index(i: isize, n: usize) -> usize {
    let n = n as isize;
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut k = i.rem_euclid(period);
    if k >= n {
        k = period - k;
    }
    k as usize
}

fn pad<T: Float>(y: &[T], left: usize, right: usize, mode: PadMode) -> Vec<T> {
    let n = y.len();
    let mut out = Vec::with_capacity(n + left + right);

    for j in 0..left {
        let v = match mode {
            PadMode::Reflect => y[reflect_index(j as isize - left as isize, n)],
            PadMode::Edge => y[0],
            PadMode::Zero => T::zero(),
        };
        out.push(v);
    }

    out.extend_from_slice(y);

    for j in 0..right {
        let v = match mode {
            PadMode::Reflect => y[reflect_index((n + j) as isize, n)],
            PadMode::Edge => y[n - 1],
            PadMode::Zero => T::zero(),
        };
        out.push(v);
    }

    out
}

// ============================================================================
// Moving Average
// ============================================================================

/// One centered moving-average pass with edge padding.
///
/// Output length equals input length for any `window >= 1`; a window of 1
/// returns a copy.
pub fn moving_average<T: Float>(y: &[T], window: usize, pad_mode: PadMode) -> Vec<T> {
    let window = window.max(1);
    if window == 1 || y.is_empty() {
        return y.to_vec();
    }

    let half = window / 2;
    let padded = pad(y, half, window - 1 - half, pad_mode);
    let inv_w = T::one() / T::from(window).unwrap();

    // Sliding-window sum over the padded signal.
    let mut out = Vec::with_capacity(y.len());
    let mut acc = padded[..window]
        .iter()
        .fold(T::zero(), |acc, &v| acc + v);
    out.push(acc * inv_w);
    for i in window..padded.len() {
        acc = acc + padded[i] - padded[i - window];
        out.push(acc * inv_w);
    }

    out
}

// ============================================================================
// NaN Bridging
// ============================================================================

/// Replace non-finite samples by linear interpolation over sample index.
///
/// The finite subset anchors the interpolant; positions before the first or
/// after the last finite sample clamp to that sample. A fully non-finite
/// input is a caller contract violation: debug-asserted, returned verbatim.
pub fn bridge_non_finite<T: Float>(y: &[T]) -> Vec<T> {
    let finite: Vec<usize> = (0..y.len()).filter(|&i| y[i].is_finite()).collect();
    debug_assert!(
        !finite.is_empty() || y.is_empty(),
        "bridge_non_finite: input has no finite samples"
    );
    if finite.is_empty() || finite.len() == y.len() {
        return y.to_vec();
    }

    let mut out = y.to_vec();
    for i in 0..y.len() {
        if y[i].is_finite() {
            continue;
        }
        // Nearest finite anchors on each side.
        let right = finite.partition_point(|&f| f < i);
        out[i] = if right == 0 {
            y[finite[0]]
        } else if right == finite.len() {
            y[finite[finite.len() - 1]]
        } else {
            let (i0, i1) = (finite[right - 1], finite[right]);
            let t = T::from(i - i0).unwrap() / T::from(i1 - i0).unwrap();
            y[i0] + (y[i1] - y[i0]) * t
        };
    }
    out
}

// ============================================================================
// Smoothing Entry Point
// ============================================================================

/// NaN-tolerant centered moving average with edge padding.
///
/// * `window <= 1` or `passes == 0` returns a verbatim copy (NaNs intact).
/// * Non-finite samples are bridged by [`bridge_non_finite`] before
///   filtering.
/// * `zero_phase` applies each pass forward and then on the reversed
///   signal; `passes` repeats the (possibly zero-phase) pass.
pub fn smooth<T: Float>(
    y: &[T],
    window: usize,
    passes: usize,
    pad_mode: PadMode,
    zero_phase: bool,
) -> Vec<T> {
    if window <= 1 || passes == 0 {
        return y.to_vec();
    }

    let mut z = bridge_non_finite(y);
    for _ in 0..passes {
        if zero_phase {
            z = moving_average(&z, window, pad_mode);
            z.reverse();
            z = moving_average(&z, window, pad_mode);
            z.reverse();
        } else {
            z = moving_average(&z, window, pad_mode);
        }
    }
    z
}
