//! Input and configuration validation.
//!
//! ## Purpose
//!
//! This module provides the fail-fast validation used by trace construction
//! and by the analysis builder. It checks shapes, finiteness, and parameter
//! bounds before any fitting runs.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Non-goals
//!
//! * This module does not sort, transform, or filter input data.
//! * This module does not provide automatic correction of invalid inputs.

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::SweepError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for analysis configuration and input data.
///
/// All methods return `Result<(), SweepError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the shape of a raw `(x, y)` pair: non-empty, equal lengths.
    pub fn validate_shapes<T: Float>(x: &[T], y: &[T]) -> Result<(), SweepError> {
        if x.is_empty() || y.is_empty() {
            return Err(SweepError::EmptyInput);
        }
        if x.len() != y.len() {
            return Err(SweepError::MismatchedInputs {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(())
    }

    /// Validate that every entry of an array is finite.
    pub fn validate_all_finite<T: Float>(vals: &[T], name: &str) -> Result<(), SweepError> {
        for (i, v) in vals.iter().enumerate() {
            if !v.is_finite() {
                return Err(SweepError::InvalidNumericValue(format!(
                    "{}[{}]={}",
                    name,
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
        }
        Ok(())
    }

    /// Validate a single scalar for finiteness.
    pub fn validate_scalar<T: Float>(val: T, name: &str) -> Result<(), SweepError> {
        if !val.is_finite() {
            return Err(SweepError::InvalidNumericValue(format!(
                "{}={}",
                name,
                val.to_f64().unwrap_or(f64::NAN)
            )));
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the smoothing window width (1 means filtering disabled).
    pub fn validate_window(window: usize) -> Result<(), SweepError> {
        if window == 0 {
            return Err(SweepError::InvalidWindow(window));
        }
        Ok(())
    }

    /// Validate the saturation fraction-start parameter.
    pub fn validate_fraction<T: Float>(fraction: T) -> Result<(), SweepError> {
        if !fraction.is_finite() || fraction < T::zero() || fraction >= T::one() {
            return Err(SweepError::InvalidFraction(
                fraction.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the number of robust-fit iterations.
    ///
    /// # Notes
    ///
    /// * At least 1 iteration is required for outlier rejection to act.
    /// * Maximum of 1000 iterations to prevent excessive computation.
    pub fn validate_iterations(iterations: usize) -> Result<(), SweepError> {
        const MAX_ITERATIONS: usize = 1000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(SweepError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the outlier rejection threshold.
    pub fn validate_threshold<T: Float>(z: T) -> Result<(), SweepError> {
        if !z.is_finite() || z <= T::zero() {
            return Err(SweepError::InvalidThreshold(z.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(())
    }

    /// Validate an explicit voltage window.
    pub fn validate_voltage_window<T: Float>(lo: T, hi: T) -> Result<(), SweepError> {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(SweepError::InvalidVoltageWindow {
                lo: lo.to_f64().unwrap_or(f64::NAN),
                hi: hi.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), SweepError> {
        if let Some(parameter) = duplicate_param {
            return Err(SweepError::DuplicateParameter { parameter });
        }
        Ok(())
    }
}
