//! # fastSweepfit — parallel batch frontend for sweepfit
//!
//! `fastSweepfit` wraps the [`sweepfit`] analysis engine with data-parallel
//! batch execution and `ndarray` input ergonomics. Every device/condition
//! key's pipeline is independent (the core shares no mutable state between
//! keys), so a batch of devices fans out across a rayon thread pool and the
//! per-device reports merge into one ordered map.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastSweepfit::prelude::*;
//! use ndarray::Array1;
//!
//! let x = Array1::from_iter((0..60).map(|i| i as f64 * 0.06));
//! let y = x.mapv(|v| 1e-6 * v.min(1.2));
//!
//! let analyzer = ParallelAnalyzer::new(
//!     Analysis::new()
//!         .filter_window(5)
//!         .baseline_rms(1e-9)
//!         .build()?,
//! );
//!
//! let report = analyzer.analyze_trace("dev-A", &x, &y)?;
//! assert!(report.record.ron.is_finite());
//! # Result::<(), SweepError>::Ok(())
//! ```
//!
//! For whole-batch runs, pass `(device, SweepFamily)` pairs to
//! [`batch::ParallelAnalyzer::run_batch`]; results come back keyed and
//! ordered by device id regardless of completion order.

#![allow(non_snake_case)]

// Input abstractions for ndarray interoperability.
pub mod input;

// Parallel batch execution.
pub mod batch;

// Standard fastSweepfit prelude.
pub mod prelude {
    pub use crate::batch::ParallelAnalyzer;
    pub use crate::input::SweepInput;
    pub use sweepfit::prelude::*;
}
