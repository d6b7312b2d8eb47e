//! Error types for sweep analysis operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur while preparing traces
//! and configuring the analysis pipeline, including input validation and
//! parameter constraints.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Builder misconfiguration is caught and stored until `build()`.
//! * **Sentinels, not errors**: insufficient data inside a fit is reported via
//!   degenerate result values (`0`, `NaN`, `+inf`), never through this enum.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-finite survivors.
//! 2. **Parameter validation**: Invalid filter window, fraction, iterations, windows.
//! 3. **Aggregation constraints**: Trial grids that do not line up.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Numeric values in errors use the same types as the public API.

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for sweep analysis operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SweepError {
    /// Input arrays are empty; a trace requires at least 2 points.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// `x` and `y` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `x` array.
        x_len: usize,
        /// Number of elements in the `y` array.
        y_len: usize,
    },

    /// Input data contains a NaN or infinite value where one is not allowed.
    InvalidNumericValue(String),

    /// Number of points is below the minimum requirement.
    TooFewPoints {
        /// Number of points provided.
        got: usize,
        /// Minimum required points.
        min: usize,
    },

    /// Smoothing window must be a positive, odd-friendly width.
    InvalidWindow(usize),

    /// Saturation fraction-start must be in the range [0, 1).
    InvalidFraction(f64),

    /// Robust fitting requires at least 1 iteration.
    InvalidIterations(usize),

    /// Outlier threshold must be positive and finite.
    InvalidThreshold(f64),

    /// A voltage window's lower bound exceeds its upper bound.
    InvalidVoltageWindow {
        /// Lower bound of the window.
        lo: f64,
        /// Upper bound of the window.
        hi: f64,
    },

    /// A trial added to an accumulator does not match the established grid.
    GridMismatch {
        /// Number of points in the established grid.
        expected: usize,
        /// Number of points in the offending trial.
        got: usize,
    },

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for SweepError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            Self::MismatchedInputs { x_len, y_len } => {
                write!(f, "Length mismatch: x has {x_len} points, y has {y_len}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few points: got {got}, need at least {min}")
            }
            Self::InvalidWindow(w) => {
                write!(f, "Invalid filter window: {w} (must be >= 1)")
            }
            Self::InvalidFraction(frac) => {
                write!(f, "Invalid fraction: {frac} (must be >= 0 and < 1)")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 1000])")
            }
            Self::InvalidThreshold(z) => {
                write!(f, "Invalid outlier threshold: {z} (must be > 0 and finite)")
            }
            Self::InvalidVoltageWindow { lo, hi } => {
                write!(f, "Invalid voltage window: ({lo}, {hi}) (requires lo <= hi)")
            }
            Self::GridMismatch { expected, got } => {
                write!(
                    f,
                    "Trial grid mismatch: accumulator holds {expected} points, trial has {got}"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl std::error::Error for SweepError {}
