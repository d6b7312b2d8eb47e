//! Immutable analysis configuration.
//!
//! ## Purpose
//!
//! This module defines the configuration value every pipeline entry point
//! receives: filter settings, region-selection tunables, robust-fit
//! parameters, per-device two-segment windows, the target gate condition,
//! and the baseline noise reference.
//!
//! ## Design notes
//!
//! * **Explicit over ambient**: no fitting component consults process-wide
//!   state; everything tunable travels inside [`AnalysisConfig`].
//! * **Derived trim**: the edge trim protecting fits from smoothing
//!   artifacts is derived from the filter window, and collapses to zero
//!   when filtering is disabled.
//!
//! ## Invariants
//!
//! * A config built through [`crate::api::AnalysisBuilder`] has passed
//!   validation; field access never re-checks.

// External dependencies
use num_traits::Float;
use std::collections::BTreeMap;

// Internal dependencies
use crate::algorithms::twoseg::SegmentWindows;
use crate::math::filter::PadMode;

// ============================================================================
// Filter Settings
// ============================================================================

/// Settings of the signal-conditioning moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSettings {
    /// Moving-average window width; 1 disables filtering.
    pub window: usize,

    /// Number of filter passes; 0 disables filtering.
    pub passes: usize,

    /// Edge padding mode.
    pub pad_mode: PadMode,

    /// Apply each pass forward and reversed to cancel phase lag.
    pub zero_phase: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            window: 5,
            passes: 1,
            pad_mode: PadMode::Reflect,
            zero_phase: true,
        }
    }
}

impl FilterSettings {
    /// Whether any filtering will actually happen.
    pub fn enabled(&self) -> bool {
        self.window > 1 && self.passes > 0
    }

    /// Tail points to exclude from region fits to avoid edge artifacts.
    pub fn edge_trim(&self) -> usize {
        if self.enabled() {
            self.window / 2
        } else {
            0
        }
    }
}

// ============================================================================
// Baseline Noise
// ============================================================================

/// Configured source of the baseline noise level.
#[derive(Debug, Clone, PartialEq)]
pub enum BaselineNoise<T> {
    /// A recorded grounded-input baseline; reduced to an RMS by
    /// median-detrending before use.
    Record(Vec<T>),

    /// A precomputed noise RMS.
    Rms(T),

    /// Nothing measured; SNR falls back to a small floor.
    Unknown,
}

// ============================================================================
// AnalysisConfig
// ============================================================================

/// Complete, immutable configuration of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig<T> {
    /// Signal-conditioning settings.
    pub filter: FilterSettings,

    /// Upper voltage bound of the ohmic-region candidate set.
    pub ohmic_v_cap: T,

    /// Outlier rejection threshold in residual standard deviations.
    pub outlier_z: T,

    /// Maximum robust-fit reject-and-refit iterations.
    pub max_fit_iterations: usize,

    /// Fraction of the sweep preceding the fallback saturation tail.
    pub sat_frac_start: T,

    /// Reference gate voltage for the overdrive cutoff.
    pub gate_voltage: T,

    /// Target gate-condition magnitude; columns are matched against
    /// `-|target_condition|`.
    pub target_condition: T,

    /// Sample count of the local transconductance window.
    pub gm_window: usize,

    /// Per-device two-segment knee windows.
    pub segment_windows: BTreeMap<String, SegmentWindows<T>>,

    /// Baseline noise reference for SNR computation.
    pub baseline: BaselineNoise<T>,

    /// Frequency band of the 1/f log-log fit, in Hz (exclusive bounds).
    pub flicker_band: (T, T),

    /// Sampling rate of timed noise records, in Hz.
    pub sample_rate: T,
}

impl<T: Float> Default for AnalysisConfig<T> {
    fn default() -> Self {
        Self {
            filter: FilterSettings::default(),
            ohmic_v_cap: T::from(0.10).unwrap(),
            outlier_z: T::from(3.0).unwrap(),
            max_fit_iterations: 3,
            sat_frac_start: T::from(0.70).unwrap(),
            gate_voltage: T::zero(),
            target_condition: T::from(0.4).unwrap(),
            gm_window: 3,
            segment_windows: BTreeMap::new(),
            baseline: BaselineNoise::Unknown,
            flicker_band: (T::from(0.1).unwrap(), T::from(10.0).unwrap()),
            sample_rate: T::from(100.0).unwrap(),
        }
    }
}

impl<T: Float> AnalysisConfig<T> {
    /// Half-width of the local transconductance window, at least 1 sample.
    pub fn gm_half_width(&self) -> usize {
        (self.gm_window / 2).max(1)
    }

    /// The gate condition columns are matched against.
    pub fn target_gate(&self) -> T {
        -self.target_condition.abs()
    }
}
