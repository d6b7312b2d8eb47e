//! Saturation-region selection.
//!
//! ## Purpose
//!
//! This module decides which points of a sweep belong to a named
//! high-voltage region without prior knowledge of its exact boundaries,
//! trying progressively weaker sources of information: an explicit voltage
//! window, a threshold-derived overdrive cutoff, and finally a fixed
//! fractional tail of the sweep.
//!
//! ## Key concepts
//!
//! * **Widening retry**: an explicit window matching fewer than 3 points is
//!   widened symmetrically once by a fixed pad before the selector falls
//!   through to the next source.
//! * **Overdrive cutoff**: with a finite threshold voltage, the region is
//!   every point at or above `|gate_voltage - threshold|`.
//! * **Tail trim**: after selection, a configurable count of points is
//!   removed from the tail of the region to keep smoothing edge artifacts
//!   out of the fits.
//!
//! ## Invariants
//!
//! * Selection never errors; an empty mask is a legal outcome the caller
//!   must gate on its own minimum point count.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::mask::RegionMask;

// Symmetric widening applied to an explicit window that matched fewer
// than 3 points, in the sweep's x-units.
const WINDOW_PAD: f64 = 0.05;

// ============================================================================
// RegionRule
// ============================================================================

/// Inputs for region selection, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRule<T> {
    /// Explicit `(lo, hi)` voltage window, tried first.
    pub window: Option<(T, T)>,

    /// Threshold voltage deriving an overdrive cutoff, tried second.
    pub threshold_x: Option<T>,

    /// Reference gate voltage for the overdrive cutoff (0 when the caller
    /// has none).
    pub gate_voltage: T,

    /// Fractional tail fallback: keep the final `1 - frac_start` of points.
    pub frac_start: T,

    /// Points removed from the tail of the selected region.
    pub edge_trim: usize,
}

impl<T: Float> RegionRule<T> {
    /// A rule with only the fractional-tail fallback.
    pub fn tail(frac_start: T) -> Self {
        Self {
            window: None,
            threshold_x: None,
            gate_voltage: T::zero(),
            frac_start,
            edge_trim: 0,
        }
    }
}

// ============================================================================
// Selection
// ============================================================================

fn window_mask<T: Float>(x: &[T], lo: T, hi: T) -> RegionMask {
    RegionMask::from_fn(x.len(), |i| x[i] >= lo && x[i] <= hi)
}

/// Select the saturation (or other named) region of a sorted sweep axis.
///
/// Priority: explicit window (with one widening retry), overdrive cutoff
/// from a finite threshold voltage, fractional tail. The chosen mask then
/// loses its last `edge_trim` selected points.
pub fn select_region<T: Float>(x: &[T], rule: &RegionRule<T>) -> RegionMask {
    let n = x.len();
    let mut mask: Option<RegionMask> = None;

    if let Some((lo, hi)) = rule.window {
        let mut candidate = window_mask(x, lo, hi);
        if candidate.count() < 3 {
            let pad = T::from(WINDOW_PAD).unwrap();
            candidate = window_mask(x, lo - pad, hi + pad);
        }
        mask = Some(candidate);
    }

    let mut mask = match mask {
        Some(m) if m.count() >= 3 => m,
        _ => match rule.threshold_x {
            Some(vth) if vth.is_finite() => {
                let overdrive = (rule.gate_voltage - vth).abs();
                RegionMask::from_fn(n, |i| x[i] >= overdrive)
            }
            _ => {
                let start = (rule.frac_start * T::from(n).unwrap())
                    .to_usize()
                    .unwrap_or(n);
                RegionMask::from_fn(n, |i| i >= start)
            }
        },
    };

    mask.trim_tail(rule.edge_trim);
    mask
}
