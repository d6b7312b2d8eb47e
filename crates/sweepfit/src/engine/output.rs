//! Result structures for analysis runs.
//!
//! ## Purpose
//!
//! This module defines the records produced per device/condition key: the
//! flat scalar metrics consumed by reporting, and the fit artifacts (masks,
//! fitted lines, conditioned trace) a visualization collaborator needs to
//! overlay regions and fit lines on the original sweep.
//!
//! ## Design notes
//!
//! * **Flat + artifacts**: scalars live in [`MetricsRecord`]; everything
//!   with structure lives in [`FitArtifacts`]. Both are immutable once
//!   produced.
//! * **NaN as absence**: metrics that could not be derived (no knee, no gm
//!   sample at the target) are NaN in the flat record, so downstream code
//!   filters with finiteness checks instead of unwrapping options.
//! * **Ergonomics**: implements `Display` for human-readable output.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not provide serialization/deserialization logic.

// External dependencies
use core::fmt::{Display, Formatter, Result};
use num_traits::Float;

// Internal dependencies
use crate::algorithms::robust::OhmicFit;
use crate::algorithms::twoseg::TwoSegmentFit;
use crate::evaluation::drift::DriftMetrics;
use crate::evaluation::flicker::FlickerNoise;
use crate::evaluation::saturation::SaturationMetrics;
use crate::evaluation::snr::SnrMetrics;
use crate::evaluation::transfer::{OnOffRatio, PeakGm, SubthresholdSlope, ThresholdFit};
use crate::primitives::trace::Trace;

// ============================================================================
// MetricsRecord
// ============================================================================

/// Flat scalar metrics for one device/condition key.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRecord<T> {
    /// Device identifier the record belongs to.
    pub device: String,

    /// Channel resistance from the robust ohmic fit (signed; `+inf` when
    /// no slope could be fitted).
    pub ron: T,

    /// R^2 of the ohmic fit.
    pub r2_ohmic: T,

    /// Saturation conductance.
    pub gsd: T,

    /// Output resistance.
    pub ro: T,

    /// Early-voltage-like intercept magnitude.
    pub va: T,

    /// Reference drain voltage of the saturation fit.
    pub vds_ref: T,

    /// Saturation current at the reference drain voltage.
    pub id_sat_ref: T,

    /// Two-segment knee voltage (NaN without a knee).
    pub knee_x: T,

    /// Two-segment knee current (NaN without a knee).
    pub knee_y: T,

    /// Slope of the steeper segment (NaN when not fitted).
    pub slope_steeper: T,

    /// Slope of the flatter segment (NaN when not fitted).
    pub slope_flatter: T,

    /// R^2 of the steeper segment (NaN when not fitted).
    pub r2_steeper: T,

    /// R^2 of the flatter segment (NaN when not fitted).
    pub r2_flatter: T,

    /// Noise RMS used for SNR.
    pub noise_rms: T,

    /// Detection limit `3 * noise_rms`.
    pub detection_limit: T,

    /// RMS of the conditioned signal.
    pub signal_rms: T,

    /// Signal-to-noise ratio in dB.
    pub snr_db: T,

    /// Dynamic range in dB.
    pub dynamic_range_db: T,

    /// Local transconductance at the target condition (NaN when absent).
    pub gm: T,

    /// R^2 of the local transconductance fit (NaN when absent).
    pub gm_r_squared: T,
}

// ============================================================================
// FitArtifacts
// ============================================================================

/// Region masks, fitted lines, and the conditioned trace behind a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FitArtifacts<T> {
    /// Robust ohmic fit with its surviving mask.
    pub ohmic: OhmicFit<T>,

    /// Saturation metrics with the selected region mask.
    pub saturation: SaturationMetrics<T>,

    /// Two-segment fit; absent for devices without configured windows.
    pub two_segment: Option<TwoSegmentFit<T>>,

    /// The conditioned (smoothed) trace the fits ran on.
    pub conditioned: Trace<T>,
}

// ============================================================================
// DeviceReport
// ============================================================================

/// Complete per-device output: flat metrics plus fit artifacts.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceReport<T> {
    /// Flat scalar metrics.
    pub record: MetricsRecord<T>,

    /// Masks and fits for overlay rendering.
    pub artifacts: FitArtifacts<T>,
}

// ============================================================================
// TransferReport
// ============================================================================

/// Gate-side metrics of one transfer sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReport<T> {
    /// Threshold voltage extrapolation.
    pub threshold: ThresholdFit<T>,

    /// Subthreshold swing.
    pub subthreshold: SubthresholdSlope<T>,

    /// On/off current ratio.
    pub on_off: OnOffRatio<T>,

    /// Peak transconductance along the sweep.
    pub peak_gm: PeakGm<T>,
}

// ============================================================================
// NoiseReport
// ============================================================================

/// Noise metrics of one timed current record.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseReport<T> {
    /// SNR of the record against the configured baseline.
    pub snr: SnrMetrics<T>,

    /// Drift of the record over elapsed time.
    pub drift: DriftMetrics<T>,

    /// 1/f characteristics; absent when the spectral preconditions fail.
    pub flicker: Option<FlickerNoise<T>>,
}

// ============================================================================
// Display Implementations
// ============================================================================

fn fmt_metric<T: Float>(f: &mut Formatter<'_>, name: &str, value: T) -> Result {
    let v = value.to_f64().unwrap_or(f64::NAN);
    if v.is_finite() {
        writeln!(f, "  {name:<18} {v:.6e}")
    } else {
        writeln!(f, "  {name:<18} —")
    }
}

impl<T: Float> Display for MetricsRecord<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Device {}:", self.device)?;
        fmt_metric(f, "Ron (ohm)", self.ron)?;
        fmt_metric(f, "R2 ohmic", self.r2_ohmic)?;
        fmt_metric(f, "gsd (S)", self.gsd)?;
        fmt_metric(f, "ro (ohm)", self.ro)?;
        fmt_metric(f, "VA (V)", self.va)?;
        fmt_metric(f, "Id@Vref (A)", self.id_sat_ref)?;
        fmt_metric(f, "Vref (V)", self.vds_ref)?;
        fmt_metric(f, "knee V (V)", self.knee_x)?;
        fmt_metric(f, "knee I (A)", self.knee_y)?;
        fmt_metric(f, "gm (S)", self.gm)?;
        fmt_metric(f, "gm R2", self.gm_r_squared)?;
        fmt_metric(f, "slope steep (S)", self.slope_steeper)?;
        fmt_metric(f, "R2 steep", self.r2_steeper)?;
        fmt_metric(f, "slope flat (S)", self.slope_flatter)?;
        fmt_metric(f, "R2 flat", self.r2_flatter)?;
        fmt_metric(f, "noise RMS (A)", self.noise_rms)?;
        fmt_metric(f, "I_det (A)", self.detection_limit)?;
        fmt_metric(f, "signal RMS (A)", self.signal_rms)?;
        fmt_metric(f, "SNR (dB)", self.snr_db)?;
        fmt_metric(f, "dyn range (dB)", self.dynamic_range_db)?;
        Ok(())
    }
}

impl<T: Float> Display for DeviceReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}", self.record)
    }
}

impl<T: Float> Display for TransferReport<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Transfer metrics:")?;
        fmt_metric(f, "Vth (V)", self.threshold.vth)?;
        fmt_metric(f, "SS (mV/dec)", self.subthreshold.ss_mv_per_decade)?;
        fmt_metric(f, "Ion/Ioff", self.on_off.ratio)?;
        fmt_metric(f, "gm max (S)", self.peak_gm.gm_max)?;
        fmt_metric(f, "Vg@gm max (V)", self.peak_gm.x_at_max)?;
        Ok(())
    }
}
