//! Trial averaging accumulators.
//!
//! ## Purpose
//!
//! This module implements the aggregation layer: repeated trials of the same
//! sweep are summed point-by-point and divided out once, producing the mean
//! trace the rest of the pipeline analyzes.
//!
//! ## Design notes
//!
//! * **Explicit state**: the accumulator is `{count, grid, running sum}`
//!   with `add` and `finalize`, not loop-local bookkeeping.
//! * **NaN propagation**: a non-finite sample poisons its point of the sum,
//!   so a dropped reading in any trial surfaces as NaN in the mean and is
//!   interpolated or masked downstream, never silently replaced.
//! * **Grid discipline**: the first trial establishes the sweep grid; any
//!   later trial with a different point count is rejected.
//!
//! ## Invariants
//!
//! * `finalize` divides by the number of accepted trials, not the number of
//!   finite samples per point.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SweepError;

// ============================================================================
// TraceAccumulator
// ============================================================================

/// Running point-wise sum over repeated trials of one sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceAccumulator<T> {
    count: usize,
    x: Vec<T>,
    sum_y: Vec<T>,
}

impl<T: Float> Default for TraceAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> TraceAccumulator<T> {
    /// Create an empty accumulator; the first `add` establishes the grid.
    pub fn new() -> Self {
        Self {
            count: 0,
            x: Vec::new(),
            sum_y: Vec::new(),
        }
    }

    /// Number of trials accepted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Add one trial.
    ///
    /// The first trial's x-axis becomes the accumulator grid; later trials
    /// must present the same number of points.
    pub fn add(&mut self, x: &[T], y: &[T]) -> Result<(), SweepError> {
        if x.len() != y.len() {
            return Err(SweepError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if x.is_empty() {
            return Err(SweepError::EmptyInput);
        }

        if self.count == 0 {
            self.x = x.to_vec();
            self.sum_y = y.to_vec();
        } else {
            if x.len() != self.x.len() {
                return Err(SweepError::GridMismatch {
                    expected: self.x.len(),
                    got: x.len(),
                });
            }
            for (acc, &yi) in self.sum_y.iter_mut().zip(y.iter()) {
                *acc = *acc + yi;
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Mean trial as raw `(x, y)` arrays, or `None` when nothing was added.
    ///
    /// The mean may contain NaN at points poisoned by any trial; callers
    /// condition or finite-mask before fitting.
    pub fn finalize(&self) -> Option<(Vec<T>, Vec<T>)> {
        if self.count == 0 {
            return None;
        }
        let n = T::from(self.count).unwrap_or(T::one());
        let mean: Vec<T> = self.sum_y.iter().map(|&s| s / n).collect();
        Some((self.x.clone(), mean))
    }
}

// ============================================================================
// FamilyAccumulator
// ============================================================================

/// Running sum over repeated trials of a whole multi-condition sweep family.
///
/// Each trial is one matrix of current columns (one column per gate
/// condition) sharing a drain-voltage axis; the mean family feeds the
/// per-device pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyAccumulator<T> {
    count: usize,
    x: Vec<T>,
    conditions: Vec<T>,
    sum_cols: Vec<Vec<T>>,
}

impl<T: Float> Default for FamilyAccumulator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FamilyAccumulator<T> {
    /// Create an empty accumulator; the first `add` establishes the grids.
    pub fn new() -> Self {
        Self {
            count: 0,
            x: Vec::new(),
            conditions: Vec::new(),
            sum_cols: Vec::new(),
        }
    }

    /// Number of trials accepted so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Add one trial: a shared x-axis, one gate condition per column, and
    /// one current column per condition.
    pub fn add(&mut self, x: &[T], conditions: &[T], columns: &[Vec<T>]) -> Result<(), SweepError> {
        if x.is_empty() || conditions.is_empty() {
            return Err(SweepError::EmptyInput);
        }
        if columns.len() != conditions.len() {
            return Err(SweepError::MismatchedInputs {
                x_len: conditions.len(),
                y_len: columns.len(),
            });
        }
        for col in columns {
            if col.len() != x.len() {
                return Err(SweepError::GridMismatch {
                    expected: x.len(),
                    got: col.len(),
                });
            }
        }

        if self.count == 0 {
            self.x = x.to_vec();
            self.conditions = conditions.to_vec();
            self.sum_cols = columns.to_vec();
        } else {
            if x.len() != self.x.len() || columns.len() != self.sum_cols.len() {
                return Err(SweepError::GridMismatch {
                    expected: self.x.len(),
                    got: x.len(),
                });
            }
            for (acc_col, col) in self.sum_cols.iter_mut().zip(columns.iter()) {
                for (acc, &v) in acc_col.iter_mut().zip(col.iter()) {
                    *acc = *acc + v;
                }
            }
        }
        self.count += 1;
        Ok(())
    }

    /// Mean family as `(x, conditions, columns)`, or `None` when empty.
    pub fn finalize(&self) -> Option<(Vec<T>, Vec<T>, Vec<Vec<T>>)> {
        if self.count == 0 {
            return None;
        }
        let n = T::from(self.count).unwrap_or(T::one());
        let cols: Vec<Vec<T>> = self
            .sum_cols
            .iter()
            .map(|col| col.iter().map(|&s| s / n).collect())
            .collect();
        Some((self.x.clone(), self.conditions.clone(), cols))
    }
}
