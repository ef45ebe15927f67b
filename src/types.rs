//! Core types for 1D phase retrieval
//!
//! This module defines the fundamental types shared by every stage of the
//! retrieval pipeline: the sample grid, the complex field, and the error
//! taxonomy for precondition violations.
//!
//! ## The two-domain picture
//!
//! A retrieval run works on a single complex-valued field sampled over a
//! fixed coordinate grid. The field is known only by its magnitude in two
//! conjugate domains:
//!
//! ```text
//!   spatial domain                Fourier domain
//!   |u(x)| known                  |U(f)| known
//!        \                            /
//!         \----- phase unknown -----/
//! ```
//!
//! The grid and the two magnitude arrays are created once per run and never
//! mutated; the field is owned exclusively by whichever stage currently
//! holds it.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A complex field: N samples of a complex-valued function over the grid
pub type Field = Vec<Complex64>;

/// Result type for retrieval operations
pub type RetrievalResult<T> = Result<T, RetrievalError>;

/// Errors that can occur when setting up or running a retrieval
///
/// All of these are precondition failures: they are checked once at entry
/// and surfaced before any work is done. Numeric degradation (zero
/// magnitudes, non-finite samples) is deliberately *not* an error; see
/// [`field_is_finite`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetrievalError {
    #[error("length mismatch: expected {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("grid must contain at least one sample")]
    EmptyGrid,

    #[error("relaxation weight {0} is outside [0, 1]")]
    InvalidWeight(f64),
}

/// The real-valued sample coordinates of the field
///
/// Immutable after construction and shared read-only across all pipeline
/// stages. Built with [`Grid::linspace`] for the common uniform case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    samples: Vec<f64>,
}

impl Grid {
    /// Create a uniform grid of `n` samples over `[start, end]`, endpoints
    /// included (step is `(end - start) / (n - 1)`).
    pub fn linspace(start: f64, end: f64, n: usize) -> RetrievalResult<Self> {
        if n == 0 {
            return Err(RetrievalError::EmptyGrid);
        }
        if n == 1 {
            return Ok(Self {
                samples: vec![start],
            });
        }
        let step = (end - start) / (n - 1) as f64;
        let samples = (0..n).map(|i| start + step * i as f64).collect();
        Ok(Self { samples })
    }

    /// Create a grid from explicit sample coordinates.
    pub fn from_samples(samples: Vec<f64>) -> RetrievalResult<Self> {
        if samples.is_empty() {
            return Err(RetrievalError::EmptyGrid);
        }
        Ok(Self { samples })
    }

    /// Number of samples N.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false: construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The sample coordinates as a slice.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Check that every sample of a field is finite
///
/// The projection loop never masks NaN or infinity; callers that feed in
/// questionable magnitudes should check the output explicitly with this.
pub fn field_is_finite(field: &[Complex64]) -> bool {
    field.iter().all(|z| z.re.is_finite() && z.im.is_finite())
}
