//! Two-segment intersection (knee) solving.
//!
//! ## Purpose
//!
//! This module fits two independent lines over disjoint voltage windows of
//! one sweep (a steeper rising segment and a flatter saturated segment) and
//! solves for their crossing, the knee that marks the saturation onset.
//!
//! ## Design notes
//!
//! * **Plain OLS**: both windows are assumed regionally clean; the robust
//!   fitter is not involved.
//! * **Recoverable absence**: a window with fewer than 2 points, or two
//!   numerically parallel slopes, yields a NaN knee instead of an error.
//!
//! ## Invariants
//!
//! * The knee is finite exactly when both fits exist and their slopes
//!   differ beyond closeness tolerance.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::linear::RegionFit;
use crate::math::stats::is_close;
use crate::primitives::mask::RegionMask;
use crate::primitives::trace::Trace;

// ============================================================================
// SegmentWindows
// ============================================================================

/// Per-device voltage windows bracketing the two segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentWindows<T> {
    /// Window of the steeper (rising) segment.
    pub steeper: (T, T),

    /// Window of the flatter (saturated) segment.
    pub flatter: (T, T),
}

// ============================================================================
// TwoSegmentFit
// ============================================================================

/// Two windowed line fits and their intersection.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoSegmentFit<T> {
    /// Knee x-position; NaN when no intersection exists.
    pub knee_x: T,

    /// Knee y-position; NaN when no intersection exists.
    pub knee_y: T,

    /// Fit over the steeper window; absent when it held fewer than 2 points.
    pub steeper: Option<RegionFit<T>>,

    /// Fit over the flatter window; absent when it held fewer than 2 points.
    pub flatter: Option<RegionFit<T>>,
}

impl<T: Float> TwoSegmentFit<T> {
    /// Whether a finite knee was found.
    pub fn has_knee(&self) -> bool {
        self.knee_x.is_finite() && self.knee_y.is_finite()
    }
}

// ============================================================================
// Solver
// ============================================================================

/// Fit both windows of a sweep and intersect the fitted lines.
///
/// Window membership is inclusive on both bounds. Widening either window to
/// a superset of its x-range never shrinks that segment's point count.
pub fn two_segment_intersection<T: Float>(
    trace: &Trace<T>,
    windows: &SegmentWindows<T>,
) -> TwoSegmentFit<T> {
    let x = trace.x();
    let y = trace.y();
    let n = x.len();

    let in_window = |w: (T, T)| RegionMask::from_fn(n, |i| x[i] >= w.0 && x[i] <= w.1);
    let steep_mask = in_window(windows.steeper);
    let flat_mask = in_window(windows.flatter);

    if steep_mask.count() < 2 || flat_mask.count() < 2 {
        return TwoSegmentFit {
            knee_x: T::nan(),
            knee_y: T::nan(),
            steeper: None,
            flatter: None,
        };
    }

    let steeper = RegionFit::over_mask(x, y, steep_mask);
    let flatter = RegionFit::over_mask(x, y, flat_mask);
    let (m1, b1) = (steeper.line.slope, steeper.line.intercept);
    let (m2, b2) = (flatter.line.slope, flatter.line.intercept);

    if is_close(m1, m2) {
        return TwoSegmentFit {
            knee_x: T::nan(),
            knee_y: T::nan(),
            steeper: Some(steeper),
            flatter: Some(flatter),
        };
    }

    let knee_x = (b2 - b1) / (m1 - m2);
    let knee_y = m1 * knee_x + b1;

    TwoSegmentFit {
        knee_x,
        knee_y,
        steeper: Some(steeper),
        flatter: Some(flatter),
    }
}
