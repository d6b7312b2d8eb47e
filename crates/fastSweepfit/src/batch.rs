//! Parallel batch execution over device/condition keys.
//!
//! ## Purpose
//!
//! This module runs the sweepfit pipeline over many devices at once. Each
//! device's computation is a pure function of its own family and the shared
//! immutable configuration, so the per-device loop distributes across a
//! rayon thread pool; the only serialization point is the final merge into
//! one ordered results map.
//!
//! ## Design notes
//!
//! * **Parallelism**: Uses `rayon` for data-parallel execution across CPU cores.
//! * **Graceful batch**: families without the target gate condition are
//!   skipped, matching the sequential driver.
//! * **Deterministic results**: the merged map is keyed and ordered by
//!   device id regardless of completion order.

// External dependencies
use num_traits::Float;
use rayon::prelude::*;
use std::collections::BTreeMap;

// Export dependencies from sweepfit crate
use sweepfit::prelude::{DeviceReport, SweepAnalyzer, SweepError, SweepFamily};

// Internal dependencies
use crate::input::SweepInput;

// ============================================================================
// ParallelAnalyzer
// ============================================================================

/// A sweep analyzer with a parallel batch driver.
#[derive(Debug, Clone)]
pub struct ParallelAnalyzer<T> {
    base: SweepAnalyzer<T>,

    /// Run batches in parallel (true) or fall back to the sequential
    /// driver (false).
    pub parallel: bool,
}

impl<T: Float + Send + Sync> ParallelAnalyzer<T> {
    /// Wrap a configured analyzer.
    pub fn new(base: SweepAnalyzer<T>) -> Self {
        Self {
            base,
            parallel: true,
        }
    }

    /// Set parallel execution mode.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The wrapped sequential analyzer.
    pub fn base(&self) -> &SweepAnalyzer<T> {
        &self.base
    }

    /// Analyze one output sweep from any supported input container.
    pub fn analyze_trace<X, Y>(
        &self,
        device: &str,
        x: &X,
        y: &Y,
    ) -> Result<DeviceReport<T>, SweepError>
    where
        X: SweepInput<T> + ?Sized,
        Y: SweepInput<T> + ?Sized,
    {
        self.base
            .analyze_trace(device, x.as_sweep_slice()?, y.as_sweep_slice()?)
    }

    /// Run the family pipeline over a batch of devices, fanning the
    /// per-device work across the rayon pool.
    ///
    /// Families without the target gate condition are skipped; any other
    /// failure aborts the batch.
    pub fn run_batch(
        &self,
        families: &[(String, SweepFamily<T>)],
    ) -> Result<BTreeMap<String, DeviceReport<T>>, SweepError> {
        if !self.parallel {
            return self.base.run_batch(families);
        }

        let target = self.base.config().target_gate();
        let reports: Result<Vec<_>, SweepError> = families
            .par_iter()
            .filter(|(_, family)| family.column_at(target).is_some())
            .map(|(device, family)| {
                self.base
                    .analyze_family(device, family)
                    .map(|report| (device.clone(), report))
            })
            .collect();

        Ok(reports?.into_iter().collect())
    }
}
