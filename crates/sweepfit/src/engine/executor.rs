//! Pipeline orchestration.
//!
//! ## Purpose
//!
//! This module wires the layers together: conditioning, region selection,
//! robust and two-segment fitting, and metric derivation, executed per
//! device/condition key and merged into one results map.
//!
//! ## Design notes
//!
//! * **Stateless driving**: the analyzer owns only its immutable
//!   configuration; every entry point is a pure function of its inputs, so
//!   per-key runs can be distributed across threads by a caller.
//! * **Graceful batch**: a family without the target gate condition is
//!   skipped by the batch driver (mirroring how missing measurement files
//!   are skipped upstream); shape violations still propagate as errors.
//!
//! ## Key concepts
//!
//! * **Knee-first saturation current**: per gate condition, the saturation
//!   current is the two-segment knee current when one exists, falling back
//!   to the saturation-fit reference current.

// External dependencies
use num_traits::Float;
use realfft::FftNum;
use std::collections::BTreeMap;

// Internal dependencies
use crate::algorithms::region::RegionRule;
use crate::algorithms::robust::robust_ohmic_fit;
use crate::algorithms::twoseg::two_segment_intersection;
use crate::engine::config::{AnalysisConfig, BaselineNoise};
use crate::engine::output::{
    DeviceReport, FitArtifacts, MetricsRecord, NoiseReport, TransferReport,
};
use crate::evaluation::drift::drift_metrics;
use crate::evaluation::flicker::flicker_noise;
use crate::evaluation::saturation::saturation_metrics;
use crate::evaluation::snr::{baseline_rms, compute_snr, NoiseReference};
use crate::evaluation::transfer::{
    gm_at_condition, on_off_ratio, peak_transconductance, subthreshold_slope, threshold_voltage,
};
use crate::math::filter::smooth;
use crate::math::stats::is_close_atol;
use crate::primitives::errors::SweepError;
use crate::primitives::trace::Trace;

// ============================================================================
// SweepFamily
// ============================================================================

/// One device's averaged output sweeps: a shared drain-voltage axis and one
/// current column per gate condition.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFamily<T> {
    /// Gate condition of each column.
    pub conditions: Vec<T>,

    /// Shared drain-voltage axis.
    pub x: Vec<T>,

    /// Measured current columns, one per condition, each as long as `x`.
    pub columns: Vec<Vec<T>>,
}

impl<T: Float> SweepFamily<T> {
    /// Validate and assemble a sweep family.
    pub fn new(x: Vec<T>, conditions: Vec<T>, columns: Vec<Vec<T>>) -> Result<Self, SweepError> {
        if x.is_empty() || conditions.is_empty() {
            return Err(SweepError::EmptyInput);
        }
        if columns.len() != conditions.len() {
            return Err(SweepError::MismatchedInputs {
                x_len: conditions.len(),
                y_len: columns.len(),
            });
        }
        for col in &columns {
            if col.len() != x.len() {
                return Err(SweepError::GridMismatch {
                    expected: x.len(),
                    got: col.len(),
                });
            }
        }
        Ok(Self {
            conditions,
            x,
            columns,
        })
    }

    /// Index of the column whose gate condition matches `gate` within
    /// closeness tolerance.
    pub fn column_at(&self, gate: T) -> Option<usize> {
        let atol = T::from(1e-6).unwrap();
        self.conditions
            .iter()
            .position(|&c| is_close_atol(c, gate, atol))
    }
}

// ============================================================================
// SweepAnalyzer
// ============================================================================

/// Configured analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepAnalyzer<T> {
    config: AnalysisConfig<T>,
}

impl<T: Float> SweepAnalyzer<T> {
    /// Wrap a validated configuration.
    pub fn new(config: AnalysisConfig<T>) -> Self {
        Self { config }
    }

    /// The configuration this analyzer runs with.
    pub fn config(&self) -> &AnalysisConfig<T> {
        &self.config
    }

    // ========================================================================
    // Shared Steps
    // ========================================================================

    fn condition_trace(&self, raw: Trace<T>) -> Result<Trace<T>, SweepError> {
        let fs = &self.config.filter;
        if !fs.enabled() {
            return Ok(raw);
        }
        let smoothed = smooth(raw.y(), fs.window, fs.passes, fs.pad_mode, fs.zero_phase);
        raw.with_y(smoothed)
    }

    fn noise_reference(&self) -> NoiseReference<'_, T> {
        match &self.config.baseline {
            BaselineNoise::Record(record) => NoiseReference::Rms(baseline_rms(record)),
            BaselineNoise::Rms(value) => NoiseReference::Rms(*value),
            BaselineNoise::Unknown => NoiseReference::Unknown,
        }
    }

    fn region_rule(&self, device: &str) -> RegionRule<T> {
        RegionRule {
            window: self
                .config
                .segment_windows
                .get(device)
                .map(|w| w.flatter),
            threshold_x: None,
            gate_voltage: self.config.gate_voltage,
            frac_start: self.config.sat_frac_start,
            edge_trim: self.config.filter.edge_trim(),
        }
    }

    // ========================================================================
    // Entry Points
    // ========================================================================

    /// Analyze one output sweep taken at the target gate condition.
    ///
    /// Runs the full conditioning → ohmic → saturation → two-segment → SNR
    /// pipeline; the local transconductance fields stay NaN (they need the
    /// whole family, see [`Self::analyze_family`]).
    pub fn analyze_trace(&self, device: &str, x: &[T], y: &[T]) -> Result<DeviceReport<T>, SweepError> {
        let conditioned = self.condition_trace(Trace::new(x, y)?)?;

        let ohmic = robust_ohmic_fit(
            &conditioned,
            self.config.ohmic_v_cap,
            self.config.max_fit_iterations,
            self.config.outlier_z,
        );

        let saturation = saturation_metrics(&conditioned, &self.region_rule(device), None);

        let two_segment = self
            .config
            .segment_windows
            .get(device)
            .map(|w| two_segment_intersection(&conditioned, w));

        let snr = compute_snr(conditioned.y(), self.noise_reference());

        let nan = T::nan();
        let (knee_x, knee_y) = two_segment
            .as_ref()
            .map_or((nan, nan), |t| (t.knee_x, t.knee_y));
        let seg = |fit: &Option<crate::algorithms::linear::RegionFit<T>>| {
            fit.as_ref()
                .map_or((nan, nan), |f| (f.line.slope, f.r_squared))
        };
        let (slope_steeper, r2_steeper) =
            two_segment.as_ref().map_or((nan, nan), |t| seg(&t.steeper));
        let (slope_flatter, r2_flatter) =
            two_segment.as_ref().map_or((nan, nan), |t| seg(&t.flatter));

        let record = MetricsRecord {
            device: device.to_string(),
            ron: ohmic.ron,
            r2_ohmic: ohmic.r_squared,
            gsd: saturation.gsd,
            ro: saturation.ro,
            va: saturation.va,
            vds_ref: saturation.vds_ref,
            id_sat_ref: saturation.id_sat_ref,
            knee_x,
            knee_y,
            slope_steeper,
            slope_flatter,
            r2_steeper,
            r2_flatter,
            noise_rms: snr.noise_rms,
            detection_limit: snr.detection_limit,
            signal_rms: snr.signal_rms,
            snr_db: snr.snr_db,
            dynamic_range_db: snr.dynamic_range_db,
            gm: nan,
            gm_r_squared: nan,
        };

        Ok(DeviceReport {
            record,
            artifacts: FitArtifacts {
                ohmic,
                saturation,
                two_segment,
                conditioned,
            },
        })
    }

    /// Analyze a whole sweep family: the target-condition trace plus the
    /// local transconductance across gate conditions.
    pub fn analyze_family(
        &self,
        device: &str,
        family: &SweepFamily<T>,
    ) -> Result<DeviceReport<T>, SweepError> {
        let target = self.config.target_gate();
        let column = family.column_at(target).ok_or_else(|| {
            SweepError::InvalidInput(format!(
                "gate condition {} not present in family '{}'",
                target.to_f64().unwrap_or(f64::NAN),
                device
            ))
        })?;

        let mut report = self.analyze_trace(device, &family.x, &family.columns[column])?;

        let (conditions, currents) = self.saturation_currents(device, family);
        if let Some(est) =
            gm_at_condition(&conditions, &currents, target, self.config.gm_half_width())
        {
            report.record.gm = est.gm;
            report.record.gm_r_squared = est.r_squared;
        }

        Ok(report)
    }

    /// Saturation current per gate condition, knee-first with a
    /// saturation-fit fallback. Columns that cannot form a trace are
    /// skipped.
    pub fn saturation_currents(&self, device: &str, family: &SweepFamily<T>) -> (Vec<T>, Vec<T>) {
        let mut conditions = Vec::new();
        let mut currents = Vec::new();

        for (j, &condition) in family.conditions.iter().enumerate() {
            let Ok(raw) = Trace::new(&family.x, &family.columns[j]) else {
                continue;
            };
            let Ok(conditioned) = self.condition_trace(raw) else {
                continue;
            };

            let mut id_sat = T::nan();
            if let Some(w) = self.config.segment_windows.get(device) {
                let two = two_segment_intersection(&conditioned, w);
                if two.knee_y.is_finite() {
                    id_sat = two.knee_y;
                }
            }
            if !id_sat.is_finite() {
                id_sat =
                    saturation_metrics(&conditioned, &self.region_rule(device), None).id_sat_ref;
            }

            conditions.push(condition);
            currents.push(id_sat);
        }

        (conditions, currents)
    }

    /// Analyze a transfer sweep (current versus gate voltage).
    pub fn analyze_transfer(&self, x: &[T], y: &[T]) -> Result<TransferReport<T>, SweepError> {
        let transfer = self.condition_trace(Trace::new(x, y)?)?;
        Ok(TransferReport {
            threshold: threshold_voltage(&transfer),
            subthreshold: subthreshold_slope(&transfer),
            on_off: on_off_ratio(&transfer),
            peak_gm: peak_transconductance(&transfer),
        })
    }

    /// Analyze a timed current record: SNR, drift, and 1/f noise.
    pub fn analyze_record(
        &self,
        time: &[T],
        current: &[T],
    ) -> Result<NoiseReport<T>, SweepError>
    where
        T: FftNum,
    {
        let record = Trace::new(time, current)?;
        Ok(NoiseReport {
            snr: compute_snr(record.y(), self.noise_reference()),
            drift: drift_metrics(&record),
            flicker: flicker_noise(record.y(), self.config.sample_rate, self.config.flicker_band),
        })
    }

    /// Run the family pipeline over a batch of devices, merging the results
    /// into one map keyed by device.
    ///
    /// Families without the target gate condition are skipped; any other
    /// failure aborts the batch.
    pub fn run_batch(
        &self,
        families: &[(String, SweepFamily<T>)],
    ) -> Result<BTreeMap<String, DeviceReport<T>>, SweepError> {
        let target = self.config.target_gate();
        let mut results = BTreeMap::new();
        for (device, family) in families {
            if family.column_at(target).is_none() {
                continue;
            }
            let report = self.analyze_family(device, family)?;
            results.insert(device.clone(), report);
        }
        Ok(results)
    }
}
