//! Input abstractions for sweep analysis.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction over trace inputs, allowing
//! the analysis entry points to accept slices, vectors, and 1-D `ndarray`
//! arrays through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Provides direct slice access to underlying data buffers.
//! * **Fail-fast validation**: Ensures memory continuity for array types before processing.
//!
//! ## Invariants
//!
//! * Returned slices represent all elements of the input container.
//! * Inputs must be contiguous in memory; non-contiguous inputs return an error.

// External dependencies
use ndarray::{ArrayBase, Data, Ix1};
use num_traits::Float;

// Export dependencies from sweepfit crate
use sweepfit::prelude::SweepError;

/// Trait for types usable as a trace axis in analysis calls.
pub trait SweepInput<T: Float> {
    /// Convert the input to a contiguous slice.
    fn as_sweep_slice(&self) -> Result<&[T], SweepError>;
}

impl<T: Float> SweepInput<T> for [T] {
    fn as_sweep_slice(&self) -> Result<&[T], SweepError> {
        Ok(self)
    }
}

impl<T: Float> SweepInput<T> for Vec<T> {
    fn as_sweep_slice(&self) -> Result<&[T], SweepError> {
        Ok(self.as_slice())
    }
}

impl<T: Float, S> SweepInput<T> for ArrayBase<S, Ix1>
where
    S: Data<Elem = T>,
{
    fn as_sweep_slice(&self) -> Result<&[T], SweepError> {
        self.as_slice().ok_or_else(|| {
            SweepError::InvalidInput("ndarray input must be contiguous in memory".to_string())
        })
    }
}
