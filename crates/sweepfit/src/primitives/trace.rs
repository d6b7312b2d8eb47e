//! Normalized sweep traces.
//!
//! ## Purpose
//!
//! This module defines [`Trace`], the normalized form of one swept
//! measurement: an x-axis (swept voltage or elapsed time) paired with a
//! y-axis (measured current), sorted ascending by x with every non-finite
//! pair removed.
//!
//! ## Design notes
//!
//! * **Normalize once**: sorting and finite-masking happen in the
//!   constructor, so every downstream fit can index freely instead of
//!   re-checking at each call site.
//! * **Stability**: uses a stable sort to preserve the relative order of
//!   equal x-values.
//! * **Fail loudly**: shape violations (empty input, mismatched lengths,
//!   fewer than 2 finite pairs) are caller contract violations and return
//!   [`SweepError`], never a silently guessed trace.
//!
//! ## Invariants
//!
//! * `x.len() == y.len() >= 2`.
//! * `x` is non-decreasing and every entry of `x` and `y` is finite.

// External dependencies
use core::cmp::Ordering;
use num_traits::Float;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::SweepError;

// ============================================================================
// Trace
// ============================================================================

/// One normalized sweep: x ascending, all pairs finite.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<T> {
    x: Vec<T>,
    y: Vec<T>,
}

impl<T: Float> Trace<T> {
    /// Normalize raw sampled arrays into a trace.
    ///
    /// Pairs where either coordinate is non-finite are dropped, then the
    /// remainder is stably sorted by x. At least 2 finite pairs must
    /// survive.
    pub fn new(x: &[T], y: &[T]) -> Result<Self, SweepError> {
        Validator::validate_shapes(x, y)?;

        let mut pairs: Vec<(T, T)> = x
            .iter()
            .zip(y.iter())
            .filter(|(xi, yi)| xi.is_finite() && yi.is_finite())
            .map(|(&xi, &yi)| (xi, yi))
            .collect();

        if pairs.len() < 2 {
            return Err(SweepError::TooFewPoints {
                got: pairs.len(),
                min: 2,
            });
        }

        let is_sorted = pairs.windows(2).all(|w| w[0].0 <= w[1].0);
        if !is_sorted {
            pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
        }

        Ok(Self {
            x: pairs.iter().map(|p| p.0).collect(),
            y: pairs.iter().map(|p| p.1).collect(),
        })
    }

    /// The swept axis, ascending.
    #[inline]
    pub fn x(&self) -> &[T] {
        &self.x
    }

    /// The measured axis, ordered to match `x`.
    #[inline]
    pub fn y(&self) -> &[T] {
        &self.y
    }

    /// Number of points in the trace.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether the trace holds no points (unreachable for constructed
    /// traces, provided for slice-like completeness).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The final (largest-x) point of the trace.
    #[inline]
    pub fn last(&self) -> (T, T) {
        let n = self.x.len();
        (self.x[n - 1], self.y[n - 1])
    }

    /// Replace the measured axis, keeping the swept axis.
    ///
    /// The replacement must be finite and of equal length; used to carry a
    /// conditioned signal alongside the original sweep positions.
    pub fn with_y(&self, y: Vec<T>) -> Result<Self, SweepError> {
        if y.len() != self.x.len() {
            return Err(SweepError::MismatchedInputs {
                x_len: self.x.len(),
                y_len: y.len(),
            });
        }
        for (i, v) in y.iter().enumerate() {
            if !v.is_finite() {
                return Err(SweepError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(Self {
            x: self.x.clone(),
            y,
        })
    }
}
