//! Saturation-region output metrics.
//!
//! ## Purpose
//!
//! This module combines a selected saturation region with a line fit into
//! the output-side figures of merit: saturation conductance, output
//! resistance, the Early-voltage-like intercept, and the reference current
//! at a chosen drain voltage.
//!
//! ## Key concepts
//!
//! * **Degenerate policy**: regions with fewer than 3 points report zero
//!   conductance and infinite resistance; a zero fitted slope likewise maps
//!   to infinite `ro` and `va` rather than a division by zero.
//! * **Reference point**: the reference drain voltage defaults to the
//!   median of the selected region, falling back to the final sweep point
//!   when the region is empty.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::linear::LineFit;
use crate::algorithms::region::{select_region, RegionRule};
use crate::math::stats::median;
use crate::primitives::mask::RegionMask;
use crate::primitives::trace::Trace;

// ============================================================================
// SaturationMetrics
// ============================================================================

/// Figures of merit derived from the saturation-region fit.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationMetrics<T> {
    /// Saturation conductance `|slope|`.
    pub gsd: T,

    /// Output resistance `1/gsd`; `+inf` when `gsd` is zero.
    pub ro: T,

    /// Early-voltage-like intercept magnitude `|intercept/slope|`; `+inf`
    /// when the slope is zero.
    pub va: T,

    /// Fitted line over the region (zero when the region was too small).
    pub line: LineFit<T>,

    /// Reference drain voltage the reference current was evaluated at.
    pub vds_ref: T,

    /// Current of the fitted line at `vds_ref` (final measured current when
    /// the region is empty).
    pub id_sat_ref: T,

    /// Membership mask of the selected region.
    pub mask: RegionMask,
}

// ============================================================================
// Computation
// ============================================================================

/// Select the saturation region of `trace` and derive its output metrics.
///
/// `vds_ref` overrides the reference drain voltage; when `None` it defaults
/// to the median of the selected region's x-values.
pub fn saturation_metrics<T: Float>(
    trace: &Trace<T>,
    rule: &RegionRule<T>,
    vds_ref: Option<T>,
) -> SaturationMetrics<T> {
    let mask = select_region(trace.x(), rule);
    let xs = mask.select(trace.x());
    let ys = mask.select(trace.y());

    let (line, gsd, ro, va) = if xs.len() > 2 {
        let line = LineFit::fit(&xs, &ys);
        let gsd = line.slope.abs();
        let ro = if gsd == T::zero() {
            T::infinity()
        } else {
            T::one() / gsd
        };
        let va = if line.slope == T::zero() {
            T::infinity()
        } else {
            (line.intercept / line.slope).abs()
        };
        (line, gsd, ro, va)
    } else {
        (LineFit::zero(), T::zero(), T::infinity(), T::infinity())
    };

    let vds_ref = vds_ref.unwrap_or_else(|| {
        if xs.is_empty() {
            trace.last().0
        } else {
            median(&xs)
        }
    });

    let id_sat_ref = if xs.is_empty() {
        trace.last().1
    } else {
        line.predict(vds_ref)
    };

    SaturationMetrics {
        gsd,
        ro,
        va,
        line,
        vds_ref,
        id_sat_ref,
        mask,
    }
}
