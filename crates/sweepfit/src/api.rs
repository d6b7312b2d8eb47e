//! High-level API for sweep analysis.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point: a fluent
//! builder that assembles and validates an [`AnalysisConfig`] and hands
//! back a ready [`SweepAnalyzer`].
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: parameters are checked once, in `build()`; duplicate
//!   assignments are flagged rather than silently overwritten.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ### Configuration Flow
//!
//! 1. Create an [`AnalysisBuilder`] via `Analysis::new()`.
//! 2. Chain configuration methods (`.filter_window()`, `.ohmic_v_cap()`, ...).
//! 3. Call `.build()` to validate and obtain a [`SweepAnalyzer`].

// External dependencies
use num_traits::Float;
use std::collections::BTreeMap;

// Internal dependencies
use crate::engine::validator::Validator;

// Publicly re-exported types
pub use crate::algorithms::linear::{LineFit, RegionFit};
pub use crate::algorithms::region::RegionRule;
pub use crate::algorithms::robust::OhmicFit;
pub use crate::algorithms::twoseg::{SegmentWindows, TwoSegmentFit};
pub use crate::engine::config::{AnalysisConfig, BaselineNoise, FilterSettings};
pub use crate::engine::executor::{SweepAnalyzer, SweepFamily};
pub use crate::engine::output::{
    DeviceReport, FitArtifacts, MetricsRecord, NoiseReport, TransferReport,
};
pub use crate::evaluation::drift::DriftMetrics;
pub use crate::evaluation::flicker::FlickerNoise;
pub use crate::evaluation::saturation::SaturationMetrics;
pub use crate::evaluation::snr::{NoiseReference, SnrMetrics, SnrQuality};
pub use crate::evaluation::transfer::{
    GmEstimate, OnOffRatio, PeakGm, SubthresholdSlope, ThresholdFit,
};
pub use crate::math::filter::PadMode;
pub use crate::primitives::accumulate::{FamilyAccumulator, TraceAccumulator};
pub use crate::primitives::errors::SweepError;
pub use crate::primitives::mask::RegionMask;
pub use crate::primitives::trace::Trace;

// ============================================================================
// Analysis Builder
// ============================================================================

/// Fluent builder for configuring a sweep analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisBuilder<T> {
    /// Moving-average window width.
    pub filter_window: Option<usize>,

    /// Number of filter passes.
    pub filter_passes: Option<usize>,

    /// Edge padding mode.
    pub pad_mode: Option<PadMode>,

    /// Zero-phase filtering flag.
    pub zero_phase: Option<bool>,

    /// Ohmic-region voltage cap.
    pub ohmic_v_cap: Option<T>,

    /// Outlier rejection threshold.
    pub outlier_z: Option<T>,

    /// Maximum robust-fit iterations.
    pub max_fit_iterations: Option<usize>,

    /// Fallback saturation fraction-start.
    pub sat_frac_start: Option<T>,

    /// Reference gate voltage for the overdrive cutoff.
    pub gate_voltage: Option<T>,

    /// Target gate-condition magnitude.
    pub target_condition: Option<T>,

    /// Local transconductance window sample count.
    pub gm_window: Option<usize>,

    /// Per-device two-segment windows.
    pub segment_windows: BTreeMap<String, SegmentWindows<T>>,

    /// Baseline noise reference.
    pub baseline: Option<BaselineNoise<T>>,

    /// Flicker-fit frequency band.
    pub flicker_band: Option<(T, T)>,

    /// Sampling rate for timed records.
    pub sample_rate: Option<T>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for AnalysisBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> AnalysisBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            filter_window: None,
            filter_passes: None,
            pad_mode: None,
            zero_phase: None,
            ohmic_v_cap: None,
            outlier_z: None,
            max_fit_iterations: None,
            sat_frac_start: None,
            gate_voltage: None,
            target_condition: None,
            gm_window: None,
            segment_windows: BTreeMap::new(),
            baseline: None,
            flicker_band: None,
            sample_rate: None,
            duplicate_param: None,
        }
    }

    /// Set the moving-average window width (1 disables filtering).
    pub fn filter_window(mut self, window: usize) -> Self {
        if self.filter_window.is_some() {
            self.duplicate_param = Some("filter_window");
        }
        self.filter_window = Some(window);
        self
    }

    /// Set the number of filter passes (0 disables filtering).
    pub fn filter_passes(mut self, passes: usize) -> Self {
        if self.filter_passes.is_some() {
            self.duplicate_param = Some("filter_passes");
        }
        self.filter_passes = Some(passes);
        self
    }

    /// Set the edge padding mode.
    pub fn pad_mode(mut self, mode: PadMode) -> Self {
        if self.pad_mode.is_some() {
            self.duplicate_param = Some("pad_mode");
        }
        self.pad_mode = Some(mode);
        self
    }

    /// Enable or disable zero-phase filtering.
    pub fn zero_phase(mut self, enabled: bool) -> Self {
        if self.zero_phase.is_some() {
            self.duplicate_param = Some("zero_phase");
        }
        self.zero_phase = Some(enabled);
        self
    }

    /// Set the ohmic-region voltage cap.
    pub fn ohmic_v_cap(mut self, cap: T) -> Self {
        if self.ohmic_v_cap.is_some() {
            self.duplicate_param = Some("ohmic_v_cap");
        }
        self.ohmic_v_cap = Some(cap);
        self
    }

    /// Set the outlier rejection threshold (residual standard deviations).
    pub fn outlier_z(mut self, z: T) -> Self {
        if self.outlier_z.is_some() {
            self.duplicate_param = Some("outlier_z");
        }
        self.outlier_z = Some(z);
        self
    }

    /// Set the maximum robust-fit iterations.
    pub fn max_fit_iterations(mut self, iterations: usize) -> Self {
        if self.max_fit_iterations.is_some() {
            self.duplicate_param = Some("max_fit_iterations");
        }
        self.max_fit_iterations = Some(iterations);
        self
    }

    /// Set the fallback saturation fraction-start.
    pub fn sat_frac_start(mut self, fraction: T) -> Self {
        if self.sat_frac_start.is_some() {
            self.duplicate_param = Some("sat_frac_start");
        }
        self.sat_frac_start = Some(fraction);
        self
    }

    /// Set the reference gate voltage for the overdrive cutoff.
    pub fn gate_voltage(mut self, gate: T) -> Self {
        if self.gate_voltage.is_some() {
            self.duplicate_param = Some("gate_voltage");
        }
        self.gate_voltage = Some(gate);
        self
    }

    /// Set the target gate-condition magnitude.
    pub fn target_condition(mut self, target: T) -> Self {
        if self.target_condition.is_some() {
            self.duplicate_param = Some("target_condition");
        }
        self.target_condition = Some(target);
        self
    }

    /// Set the local transconductance window sample count.
    pub fn gm_window(mut self, window: usize) -> Self {
        if self.gm_window.is_some() {
            self.duplicate_param = Some("gm_window");
        }
        self.gm_window = Some(window);
        self
    }

    /// Register the two-segment windows of one device.
    pub fn segment_window(mut self, device: impl Into<String>, windows: SegmentWindows<T>) -> Self {
        self.segment_windows.insert(device.into(), windows);
        self
    }

    /// Supply a recorded baseline noise trace.
    pub fn baseline_record(mut self, record: Vec<T>) -> Self {
        if self.baseline.is_some() {
            self.duplicate_param = Some("baseline");
        }
        self.baseline = Some(BaselineNoise::Record(record));
        self
    }

    /// Supply a precomputed baseline noise RMS.
    pub fn baseline_rms(mut self, rms: T) -> Self {
        if self.baseline.is_some() {
            self.duplicate_param = Some("baseline");
        }
        self.baseline = Some(BaselineNoise::Rms(rms));
        self
    }

    /// Set the flicker-fit frequency band (Hz, exclusive bounds).
    pub fn flicker_band(mut self, band: (T, T)) -> Self {
        if self.flicker_band.is_some() {
            self.duplicate_param = Some("flicker_band");
        }
        self.flicker_band = Some(band);
        self
    }

    /// Set the sampling rate of timed records (Hz).
    pub fn sample_rate(mut self, rate: T) -> Self {
        if self.sample_rate.is_some() {
            self.duplicate_param = Some("sample_rate");
        }
        self.sample_rate = Some(rate);
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validate the configuration and construct the analyzer.
    pub fn build(self) -> Result<SweepAnalyzer<T>, SweepError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;

        let defaults = AnalysisConfig::<T>::default();
        let filter = FilterSettings {
            window: self.filter_window.unwrap_or(defaults.filter.window),
            passes: self.filter_passes.unwrap_or(defaults.filter.passes),
            pad_mode: self.pad_mode.unwrap_or(defaults.filter.pad_mode),
            zero_phase: self.zero_phase.unwrap_or(defaults.filter.zero_phase),
        };
        let config = AnalysisConfig {
            filter,
            ohmic_v_cap: self.ohmic_v_cap.unwrap_or(defaults.ohmic_v_cap),
            outlier_z: self.outlier_z.unwrap_or(defaults.outlier_z),
            max_fit_iterations: self
                .max_fit_iterations
                .unwrap_or(defaults.max_fit_iterations),
            sat_frac_start: self.sat_frac_start.unwrap_or(defaults.sat_frac_start),
            gate_voltage: self.gate_voltage.unwrap_or(defaults.gate_voltage),
            target_condition: self.target_condition.unwrap_or(defaults.target_condition),
            gm_window: self.gm_window.unwrap_or(defaults.gm_window),
            segment_windows: self.segment_windows,
            baseline: self.baseline.unwrap_or(defaults.baseline),
            flicker_band: self.flicker_band.unwrap_or(defaults.flicker_band),
            sample_rate: self.sample_rate.unwrap_or(defaults.sample_rate),
        };

        Validator::validate_window(config.filter.window)?;
        Validator::validate_scalar(config.ohmic_v_cap, "ohmic_v_cap")?;
        Validator::validate_threshold(config.outlier_z)?;
        Validator::validate_iterations(config.max_fit_iterations)?;
        Validator::validate_fraction(config.sat_frac_start)?;
        Validator::validate_scalar(config.gate_voltage, "gate_voltage")?;
        Validator::validate_scalar(config.target_condition, "target_condition")?;
        for windows in config.segment_windows.values() {
            Validator::validate_voltage_window(windows.steeper.0, windows.steeper.1)?;
            Validator::validate_voltage_window(windows.flatter.0, windows.flatter.1)?;
        }
        Validator::validate_voltage_window(config.flicker_band.0, config.flicker_band.1)?;
        Validator::validate_threshold(config.sample_rate)?;
        if let BaselineNoise::Rms(rms) = &config.baseline {
            Validator::validate_scalar(*rms, "baseline_rms")?;
        }

        Ok(SweepAnalyzer::new(config))
    }
}
