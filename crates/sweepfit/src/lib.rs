//! # sweepfit — I–V curve-region extraction and figure-of-merit engine
//!
//! `sweepfit` turns noisy swept current–voltage measurements of
//! transistor-like sensor devices into electrical figures of merit: channel
//! resistance, saturation conductance and output resistance, knee (saturation
//! onset) position, transconductance, threshold voltage, subthreshold slope,
//! on/off ratio, SNR and dynamic range, drift rate, and 1/f noise.
//!
//! ## How it works
//!
//! Each sweep passes through a fixed pipeline: a NaN-tolerant zero-phase
//! moving average conditions the trace; an iterative outlier-rejecting least
//! squares fit extracts the low-voltage (ohmic) slope; a prioritized region
//! selector isolates the saturation regime; two windowed line fits intersect
//! at the knee; and the fitted slopes and intercepts combine into the final
//! metrics, with explicit degenerate-value conventions (`+inf` resistances,
//! NaN positions, zero conductances) wherever a fit is infeasible.
//!
//! ## Quick Start
//!
//! ```rust
//! use sweepfit::prelude::*;
//!
//! let x: Vec<f64> = (0..60).map(|i| i as f64 * 0.06).collect();
//! let y: Vec<f64> = x.iter().map(|&v| 1e-6 * v.min(1.2)).collect();
//!
//! // Build the analyzer
//! let analyzer = Analysis::new()
//!     .filter_window(5)       // 5-point moving average
//!     .filter_passes(1)       // a single (zero-phase) pass
//!     .ohmic_v_cap(0.10)      // ohmic region: 0 V to 0.10 V
//!     .sat_frac_start(0.70)   // fallback saturation tail: final 30%
//!     .baseline_rms(1e-9)     // 1 nA noise floor
//!     .build()?;
//!
//! // Run the pipeline on one output sweep
//! let report = analyzer.analyze_trace("dev-A", &x, &y)?;
//!
//! println!("{}", report);
//! assert!(report.record.ron.is_finite());
//! # Result::<(), SweepError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! Pipeline entry points return `Result<_, SweepError>`; the `?` operator is
//! idiomatic. Errors are reserved for caller contract violations (empty or
//! mismatched arrays, invalid configuration). A fit that simply lacks data is
//! *not* an error: it reports the documented degenerate values, so downstream
//! code can use `is_finite()` checks on the hot path instead of `match`.
//!
//! ```rust
//! use sweepfit::prelude::*;
//!
//! let analyzer = Analysis::<f64>::new().build()?;
//! match analyzer.analyze_trace("dev-A", &[0.0, 1.0], &[0.0]) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("analysis failed: {}", e),
//! }
//! # Result::<(), SweepError>::Ok(())
//! ```
//!
//! ## Scope
//!
//! The crate is data-in / data-out: it consumes raw sampled `(voltage,
//! current)` sequences plus an immutable configuration, and produces metric
//! records and region masks. Acquisition, persistence, and display belong to
//! the surrounding application.

// Layer 1: Primitives - data structures and basic utilities.
pub mod primitives;

// Layer 2: Math - pure mathematical functions.
pub mod math;

// Layer 3: Algorithms - region extraction and fitting.
pub mod algorithms;

// Layer 4: Evaluation - derived physical metrics.
pub mod evaluation;

// Layer 5: Engine - orchestration and execution control.
pub mod engine;

// High-level fluent API for sweep analysis.
pub mod api;

// Standard sweepfit prelude.
pub mod prelude {
    pub use crate::api::{
        AnalysisBuilder as Analysis, AnalysisConfig, BaselineNoise, DeviceReport, DriftMetrics,
        FamilyAccumulator, FilterSettings, FitArtifacts, FlickerNoise, GmEstimate, LineFit,
        MetricsRecord, NoiseReference, NoiseReport, OhmicFit, OnOffRatio,
        PadMode::{Edge, Reflect, Zero},
        PeakGm, RegionFit, RegionMask, RegionRule, SaturationMetrics, SegmentWindows, SnrMetrics,
        SnrQuality, SubthresholdSlope, SweepAnalyzer, SweepError, SweepFamily, ThresholdFit, Trace,
        TraceAccumulator, TransferReport, TwoSegmentFit,
    };
}
