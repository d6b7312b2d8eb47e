//! Baseline drift analysis.
//!
//! ## Purpose
//!
//! This module quantifies the slow wander of a held current over elapsed
//! time: the absolute drift rate from a linear fit, the rate as a percent
//! of the mean current per hour, and the accumulated drift over the record.
//!
//! ## Key concepts
//!
//! * **Percent guards**: a zero mean current reports zero percent figures
//!   rather than a division by zero.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::linear::LineFit;
use crate::math::stats::mean;
use crate::primitives::trace::Trace;

// ============================================================================
// DriftMetrics
// ============================================================================

/// Drift figures for one timed current record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftMetrics<T> {
    /// Absolute drift rate in current units per second.
    pub rate: T,

    /// Intercept of the drift fit.
    pub offset: T,

    /// Drift rate as percent of the mean current per hour (0 when the mean
    /// current is 0).
    pub percent_per_hour: T,

    /// Accumulated drift over the record, in current units.
    pub total_drift: T,

    /// Accumulated drift as percent of the mean current (0 when the mean
    /// current is 0).
    pub total_percent: T,
}

// ============================================================================
// Computation
// ============================================================================

/// Fit current versus elapsed time and derive the drift figures.
///
/// The trace's x-axis is elapsed seconds; trace normalization guarantees at
/// least 2 finite samples.
pub fn drift_metrics<T: Float>(record: &Trace<T>) -> DriftMetrics<T> {
    let t = record.x();
    let i = record.y();

    let line = LineFit::fit(t, i);
    let mean_current = mean(i);

    let per_hour = T::from(3600.0).unwrap();
    let hundred = T::from(100.0).unwrap();

    let percent_per_hour = if mean_current != T::zero() {
        line.slope * per_hour / mean_current * hundred
    } else {
        T::zero()
    };

    let span = t[t.len() - 1] - t[0];
    let total_drift = line.slope * span;
    let total_percent = if mean_current != T::zero() {
        total_drift / mean_current * hundred
    } else {
        T::zero()
    };

    DriftMetrics {
        rate: line.slope,
        offset: line.intercept,
        percent_per_hour,
        total_drift,
        total_percent,
    }
}
