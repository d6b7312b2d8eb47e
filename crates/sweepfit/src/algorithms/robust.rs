//! Robust ohmic-region fitting.
//!
//! ## Purpose
//!
//! This module fits the low-voltage (ohmic) region of an output sweep with
//! an iterative outlier-rejecting least-squares pass and derives the
//! channel-resistance reciprocal from the surviving slope.
//!
//! ## Design notes
//!
//! * **Bounded iteration**: a fixed small number of reject-and-refit passes,
//!   stopping early when no point is rejected. This is not an M-estimator
//!   driven to convergence; the iteration count is part of the contract.
//! * **Candidate fallback**: sweeps that start above the voltage cap fall
//!   back to a leading fraction of the trace so a fit is still attempted.
//! * **Degenerate policy**: fewer than 2 surviving points yields slope 0,
//!   intercept 0, R^2 0 and an infinite resistance; a surviving slope of
//!   exactly 0 also reports infinite resistance.
//!
//! ## Invariants
//!
//! * The returned mask is a subset of the initial candidate mask.
//! * `ron` is never NaN: it is `1/slope` (keeping the slope's sign) or
//!   `+inf`.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::linear::LineFit;
use crate::math::stats::{r_squared, std_dev};
use crate::primitives::mask::RegionMask;
use crate::primitives::trace::Trace;

// Residual-spread floor substituted when the spread collapses to zero.
const SPREAD_EPSILON: f64 = 1e-18;

// ============================================================================
// OhmicFit
// ============================================================================

/// Result of the robust low-voltage fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OhmicFit<T> {
    /// Reciprocal of the fitted slope (channel resistance); `+inf` when the
    /// slope is zero or the fit is infeasible.
    pub ron: T,

    /// Fitted slope (conductance).
    pub slope: T,

    /// Fitted intercept.
    pub intercept: T,

    /// Coefficient of determination over the surviving subset.
    pub r_squared: T,

    /// Points that survived outlier rejection.
    pub used: RegionMask,
}

// ============================================================================
// Robust Fit
// ============================================================================

/// Iterative outlier-rejecting linear fit of the region `0 <= x <= x_cap`.
///
/// When fewer than 3 points fall under the cap, the candidate region falls
/// back to the first `max(3, 20%)` points of the trace by index. Each
/// iteration refits the surviving subset and drops points whose absolute
/// residual exceeds `z_threshold` residual standard deviations.
pub fn robust_ohmic_fit<T: Float>(
    trace: &Trace<T>,
    x_cap: T,
    max_iterations: usize,
    z_threshold: T,
) -> OhmicFit<T> {
    let x = trace.x();
    let y = trace.y();
    let n = x.len();

    let mut used = RegionMask::from_fn(n, |i| x[i] >= T::zero() && x[i] <= x_cap);
    if used.count() < 3 {
        let fifth = (T::from(0.2).unwrap() * T::from(n).unwrap())
            .to_usize()
            .unwrap_or(0);
        let k = fifth.max(3);
        used = RegionMask::from_fn(n, |i| i < k);
    }

    for _ in 0..max_iterations {
        if used.count() < 3 {
            break;
        }
        let xs = used.select(x);
        let ys = used.select(y);
        let line = LineFit::fit(&xs, &ys);
        let residuals: Vec<T> = xs
            .iter()
            .zip(ys.iter())
            .map(|(&xi, &yi)| yi - line.predict(xi))
            .collect();

        let spread = std_dev(&residuals);
        let spread = if spread > T::zero() {
            spread
        } else {
            T::from(SPREAD_EPSILON).unwrap()
        };

        let mut rejected_any = false;
        for (&i, &r) in used.indices().iter().zip(residuals.iter()) {
            if r.abs() > z_threshold * spread {
                used.set(i, false);
                rejected_any = true;
            }
        }
        if !rejected_any {
            break;
        }
    }

    if used.count() >= 2 {
        let xs = used.select(x);
        let ys = used.select(y);
        let line = LineFit::fit(&xs, &ys);
        let yhat: Vec<T> = xs.iter().map(|&xi| line.predict(xi)).collect();
        let r2 = r_squared(&ys, &yhat);
        let ron = if line.slope == T::zero() {
            T::infinity()
        } else {
            T::one() / line.slope
        };
        OhmicFit {
            ron,
            slope: line.slope,
            intercept: line.intercept,
            r_squared: r2,
            used,
        }
    } else {
        OhmicFit {
            ron: T::infinity(),
            slope: T::zero(),
            intercept: T::zero(),
            r_squared: T::zero(),
            used,
        }
    }
}
