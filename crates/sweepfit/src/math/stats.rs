//! Scalar statistics shared across the fitting components.
//!
//! ## Purpose
//!
//! This module collects the small statistical kernels the rest of the crate
//! is built from: mean, population standard deviation, quickselect median,
//! RMS, coefficient of determination, and a numpy-compatible gradient for
//! unevenly spaced samples.
//!
//! ## Design notes
//!
//! * **Population convention**: `std` divides by `n`, matching the noise-RMS
//!   definition used throughout the measurement conventions.
//! * **Degenerate policy**: `r_squared` is defined as 0.0 when the total
//!   variance of the data is zero, never a division by zero.
//! * **Quickselect**: medians use `select_nth_unstable_by` for O(n) scaling.

// External dependencies
use core::cmp::Ordering::Equal;
use num_traits::Float;

// ============================================================================
// Moments
// ============================================================================

/// Arithmetic mean; zero for an empty slice.
pub fn mean<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let n = T::from(vals.len()).unwrap_or(T::one());
    vals.iter().fold(T::zero(), |acc, &v| acc + v) / n
}

/// Population standard deviation (divides by n); zero for an empty slice.
pub fn std_dev<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let m = mean(vals);
    let n = T::from(vals.len()).unwrap_or(T::one());
    let var = vals
        .iter()
        .fold(T::zero(), |acc, &v| acc + (v - m) * (v - m))
        / n;
    var.max(T::zero()).sqrt()
}

/// Root mean square; zero for an empty slice.
pub fn rms<T: Float>(vals: &[T]) -> T {
    if vals.is_empty() {
        return T::zero();
    }
    let n = T::from(vals.len()).unwrap_or(T::one());
    (vals.iter().fold(T::zero(), |acc, &v| acc + v * v) / n).sqrt()
}

// ============================================================================
// Median
// ============================================================================

/// Median via quickselect, reordering `vals` in place.
pub fn median_inplace<T: Float>(vals: &mut [T]) -> T {
    let n = vals.len();
    if n == 0 {
        return T::zero();
    }

    let mid = n / 2;
    vals.select_nth_unstable_by(mid, |a, b| a.partial_cmp(b).unwrap_or(Equal));
    let upper = vals[mid];

    if n % 2 == 1 {
        return upper;
    }

    // Even length: the lower middle is the max of the partitioned low half.
    let mut lower = vals[0];
    for &v in vals[1..mid].iter() {
        if v > lower {
            lower = v;
        }
    }
    (lower + upper) / T::from(2.0).unwrap_or(T::one() + T::one())
}

/// Median of a borrowed slice.
pub fn median<T: Float>(vals: &[T]) -> T {
    let mut scratch = vals.to_vec();
    median_inplace(&mut scratch)
}

// ============================================================================
// Goodness of Fit
// ============================================================================

/// Coefficient of determination for predictions `yhat` of data `y`.
///
/// R^2 = 1 - SS_res / SS_tot; 0.0 when SS_tot is zero (flat data carries no
/// variance to explain, regardless of the residuals).
pub fn r_squared<T: Float>(y: &[T], yhat: &[T]) -> T {
    debug_assert_eq!(y.len(), yhat.len());
    let m = mean(y);
    let (ss_tot, ss_res) = y
        .iter()
        .zip(yhat.iter())
        .fold((T::zero(), T::zero()), |(tot, res), (&yi, &hi)| {
            let d = yi - m;
            let r = yi - hi;
            (tot + d * d, res + r * r)
        });

    if ss_tot == T::zero() {
        T::zero()
    } else {
        T::one() - ss_res / ss_tot
    }
}

// ============================================================================
// Gradient
// ============================================================================

/// Second-order-accurate gradient of `y` sampled at positions `x`.
///
/// Interior points use the three-point stencil for unevenly spaced samples;
/// the endpoints fall back to one-sided first differences. Requires at
/// least 2 points; returns an empty vector otherwise.
pub fn gradient<T: Float>(y: &[T], x: &[T]) -> Vec<T> {
    debug_assert_eq!(y.len(), x.len());
    let n = y.len();
    if n < 2 {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(n);
    out.push((y[1] - y[0]) / (x[1] - x[0]));

    for i in 1..n - 1 {
        let hs = x[i] - x[i - 1];
        let hd = x[i + 1] - x[i];
        let a = -hd / (hs * (hs + hd));
        let b = (hd - hs) / (hs * hd);
        let c = hs / (hd * (hs + hd));
        out.push(a * y[i - 1] + b * y[i] + c * y[i + 1]);
    }

    out.push((y[n - 1] - y[n - 2]) / (x[n - 1] - x[n - 2]));
    out
}

// ============================================================================
// Closeness
// ============================================================================

/// Relative/absolute closeness test with numpy's default tolerances.
pub fn is_close<T: Float>(a: T, b: T) -> bool {
    is_close_atol(a, b, T::from(1e-8).unwrap())
}

/// Closeness test with an explicit absolute tolerance (relative 1e-5).
pub fn is_close_atol<T: Float>(a: T, b: T, atol: T) -> bool {
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    let rtol = T::from(1e-5).unwrap();
    (a - b).abs() <= atol + rtol * b.abs()
}
