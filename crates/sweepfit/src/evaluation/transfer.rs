//! Transfer-sweep metrics: threshold, subthreshold slope, on/off, gm.
//!
//! ## Purpose
//!
//! This module derives the gate-side figures of merit from a transfer sweep
//! (current versus gate voltage): the transconductance curve and its peak,
//! the threshold voltage by linear extrapolation at peak transconductance,
//! the subthreshold slope, the on/off current ratio, and the local
//! transconductance at a requested gate condition.
//!
//! ## Key concepts
//!
//! * **Max-gm extrapolation**: the threshold fit brackets the steepest part
//!   of the transfer curve with a window of half-width `min(5, n/4)` points.
//! * **Positive-by-convention**: reported transconductances are magnitudes;
//!   the signed curve remains available for callers that need polarity.
//! * **Absence over invention**: the local gm estimate is `None` when the
//!   requested condition is not present in the sampled conditions or too few
//!   finite samples surround it.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::algorithms::linear::LineFit;
use crate::math::stats::{gradient, is_close_atol, r_squared};
use crate::primitives::trace::Trace;

// Additive floor keeping the log-current finite through zero crossings.
const LOG_CURRENT_FLOOR: f64 = 1e-15;

// Off-current floor when every sampled current is exactly zero.
const OFF_CURRENT_FLOOR: f64 = 1e-15;

// ============================================================================
// Transconductance Curve
// ============================================================================

/// Signed point-wise transconductance `dI/dVg` along the transfer sweep.
pub fn transconductance_curve<T: Float>(transfer: &Trace<T>) -> Vec<T> {
    gradient(transfer.y(), transfer.x())
}

/// Peak transconductance magnitude and its gate voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakGm<T> {
    /// Maximum `|dI/dVg|` along the sweep.
    pub gm_max: T,

    /// Gate voltage where the maximum occurs.
    pub x_at_max: T,
}

/// Locate the peak of the transconductance magnitude.
pub fn peak_transconductance<T: Float>(transfer: &Trace<T>) -> PeakGm<T> {
    let gm = transconductance_curve(transfer);
    let mut best = 0usize;
    for (i, g) in gm.iter().enumerate() {
        if g.abs() > gm[best].abs() {
            best = i;
        }
    }
    PeakGm {
        gm_max: gm[best].abs(),
        x_at_max: transfer.x()[best],
    }
}

// ============================================================================
// Threshold Voltage
// ============================================================================

/// Threshold voltage by linear extrapolation at peak transconductance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdFit<T> {
    /// Extrapolated threshold voltage; 0 when the local slope is zero.
    pub vth: T,

    /// Slope of the extrapolation line.
    pub slope: T,

    /// Intercept of the extrapolation line.
    pub intercept: T,
}

/// Extrapolate the threshold voltage from the steepest transfer region.
pub fn threshold_voltage<T: Float>(transfer: &Trace<T>) -> ThresholdFit<T> {
    let x = transfer.x();
    let y = transfer.y();
    let n = x.len();

    let gm = gradient(y, x);
    let mut max_idx = 0usize;
    for (i, g) in gm.iter().enumerate() {
        if g.abs() > gm[max_idx].abs() {
            max_idx = i;
        }
    }

    let fit_range = 5.min(n / 4);
    let start = max_idx.saturating_sub(fit_range);
    let end = (max_idx + fit_range).min(n);

    if end - start > 1 {
        let line = LineFit::fit(&x[start..end], &y[start..end]);
        let vth = if line.slope == T::zero() {
            T::zero()
        } else {
            -line.intercept / line.slope
        };
        ThresholdFit {
            vth,
            slope: line.slope,
            intercept: line.intercept,
        }
    } else {
        ThresholdFit {
            vth: T::zero(),
            slope: T::zero(),
            intercept: T::zero(),
        }
    }
}

// ============================================================================
// Subthreshold Slope
// ============================================================================

/// Subthreshold swing at the steepest log-current rise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubthresholdSlope<T> {
    /// Swing in mV/decade; `+inf` when too few rising points exist.
    pub ss_mv_per_decade: T,

    /// Gate voltage where the swing was measured (0 when unavailable).
    pub x_at_min: T,
}

/// Steepest positive slope of `log10|I|` versus gate voltage.
///
/// Requires more than 5 points with a positive log-current derivative;
/// otherwise the swing is reported as `+inf`.
pub fn subthreshold_slope<T: Float>(transfer: &Trace<T>) -> SubthresholdSlope<T> {
    let x = transfer.x();
    let floor = T::from(LOG_CURRENT_FLOOR).unwrap();
    let log_ids: Vec<T> = transfer
        .y()
        .iter()
        .map(|&i| (i.abs() + floor).log10())
        .collect();
    let d = gradient(&log_ids, x);

    let rising: Vec<usize> = (0..d.len()).filter(|&i| d[i] > T::zero()).collect();
    if rising.len() > 5 {
        let mut best = rising[0];
        for &i in rising.iter() {
            if d[i] > d[best] {
                best = i;
            }
        }
        SubthresholdSlope {
            ss_mv_per_decade: T::from(1000.0).unwrap() / d[best],
            x_at_min: x[best],
        }
    } else {
        SubthresholdSlope {
            ss_mv_per_decade: T::infinity(),
            x_at_min: T::zero(),
        }
    }
}

// ============================================================================
// On/Off Ratio
// ============================================================================

/// On/off current ratio across a transfer sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OnOffRatio<T> {
    /// Ratio of on-current to off-current.
    pub ratio: T,

    /// Maximum current magnitude.
    pub i_on: T,

    /// Minimum nonzero current magnitude (floored when all currents are 0).
    pub i_off: T,

    /// Gate voltage at the on-current.
    pub x_on: T,

    /// Gate voltage at the minimum current magnitude.
    pub x_off: T,
}

/// Ratio between the largest and the smallest nonzero current magnitude.
pub fn on_off_ratio<T: Float>(transfer: &Trace<T>) -> OnOffRatio<T> {
    let x = transfer.x();
    let y = transfer.y();

    let mut on_idx = 0usize;
    let mut off_idx = 0usize;
    let mut i_off = T::infinity();
    for (i, v) in y.iter().enumerate() {
        let mag = v.abs();
        if mag > y[on_idx].abs() {
            on_idx = i;
        }
        if mag < y[off_idx].abs() {
            off_idx = i;
        }
        if mag > T::zero() && mag < i_off {
            i_off = mag;
        }
    }

    let i_on = y[on_idx].abs();
    let i_off = if i_off.is_finite() {
        i_off
    } else {
        T::from(OFF_CURRENT_FLOOR).unwrap()
    };

    OnOffRatio {
        ratio: i_on / i_off,
        i_on,
        i_off,
        x_on: x[on_idx],
        x_off: x[off_idx],
    }
}

// ============================================================================
// Local Transconductance
// ============================================================================

/// Local transconductance estimate at a requested gate condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GmEstimate<T> {
    /// Transconductance magnitude.
    pub gm: T,

    /// Coefficient of determination of the local fit.
    pub r_squared: T,
}

/// Fit a small window of (condition, saturation current) samples around the
/// requested condition.
///
/// The window spans `idx +/- half_width` samples (half-width clamped to at
/// least 1), widening to the first or last two samples at the sweep ends.
/// Returns `None` when the condition is absent, the window cannot reach 2
/// points, or any windowed sample is non-finite.
pub fn gm_at_condition<T: Float>(
    conditions: &[T],
    currents: &[T],
    target: T,
    half_width: usize,
) -> Option<GmEstimate<T>> {
    debug_assert_eq!(conditions.len(), currents.len());
    if conditions.len() < 2 {
        return None;
    }

    let mut pairs: Vec<(T, T)> = conditions
        .iter()
        .zip(currents.iter())
        .map(|(&c, &i)| (c, i))
        .collect();
    pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

    let atol = T::from(1e-6).unwrap();
    let idx = pairs.iter().position(|p| is_close_atol(p.0, target, atol))?;

    let n = pairs.len();
    let half = half_width.max(1);
    let mut lo = idx.saturating_sub(half);
    let mut hi = (idx + half + 1).min(n);
    if hi - lo < 2 {
        if idx == 0 && n >= 2 {
            lo = 0;
            hi = 2;
        } else if idx == n - 1 && n >= 2 {
            lo = n - 2;
            hi = n;
        } else {
            return None;
        }
    }

    let window = &pairs[lo..hi];
    if window.len() < 2
        || window
            .iter()
            .any(|p| !p.0.is_finite() || !p.1.is_finite())
    {
        return None;
    }

    let xs: Vec<T> = window.iter().map(|p| p.0).collect();
    let ys: Vec<T> = window.iter().map(|p| p.1).collect();
    let line = LineFit::fit(&xs, &ys);
    let yhat: Vec<T> = xs.iter().map(|&xi| line.predict(xi)).collect();

    Some(GmEstimate {
        gm: line.slope.abs(),
        r_squared: r_squared(&ys, &yhat),
    })
}
