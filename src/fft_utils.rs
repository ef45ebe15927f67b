//! FFT utilities for the projection cycle
//!
//! The retrieval loop alternates between the spatial and Fourier domains,
//! so it needs a matched forward/inverse transform pair. This module wraps
//! `rustfft` with the conventions the rest of the crate relies on:
//!
//! 1. **Unnormalized forward, 1/N inverse**: `ifft(fft(f)) == f`, matching
//!    the numpy `fft`/`ifft` convention. The magnitude constraints are
//!    measured under the same convention, so both sides agree.
//!
//! 2. **Parseval's theorem**: with this normalization,
//!    `Σ|f[k]|² == Σ|F[k]|² / N`. The projection steps preserve this only
//!    to the extent the magnitude constraints do; the transform itself
//!    must satisfy it exactly (up to floating point), which the tests
//!    verify independently of any retrieval logic.
//!
//! Plans and scratch buffers are created once per processor and reused
//! across iterations.

use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use std::fmt;
use std::sync::Arc;

/// Matched forward/inverse FFT pair of a fixed size
pub struct FftProcessor {
    /// Transform size N
    size: usize,
    /// Forward FFT instance
    fft_forward: Arc<dyn Fft<f64>>,
    /// Inverse FFT instance
    fft_inverse: Arc<dyn Fft<f64>>,
    /// Scratch buffer shared by both directions
    scratch: Vec<Complex64>,
}

impl fmt::Debug for FftProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FftProcessor")
            .field("size", &self.size)
            .finish()
    }
}

impl FftProcessor {
    /// Create a new processor for transforms of length `size`.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft_forward = planner.plan_fft_forward(size);
        let fft_inverse = planner.plan_fft_inverse(size);
        let scratch_len = fft_forward
            .get_inplace_scratch_len()
            .max(fft_inverse.get_inplace_scratch_len());
        let scratch = vec![Complex64::new(0.0, 0.0); scratch_len];

        Self {
            size,
            fft_forward,
            fft_inverse,
            scratch,
        }
    }

    /// Get the transform size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Compute the forward transform in-place.
    pub fn fft_inplace(&mut self, buffer: &mut [Complex64]) {
        assert_eq!(buffer.len(), self.size);
        self.fft_forward
            .process_with_scratch(buffer, &mut self.scratch);
    }

    /// Compute the forward transform, returning a new buffer.
    pub fn fft(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        self.fft_inplace(&mut buffer);
        buffer
    }

    /// Compute the inverse transform in-place, normalized by 1/N.
    pub fn ifft_inplace(&mut self, buffer: &mut [Complex64]) {
        assert_eq!(buffer.len(), self.size);
        self.fft_inverse
            .process_with_scratch(buffer, &mut self.scratch);

        let scale = 1.0 / self.size as f64;
        for sample in buffer.iter_mut() {
            *sample *= scale;
        }
    }

    /// Compute the inverse transform, returning a new buffer.
    pub fn ifft(&mut self, input: &[Complex64]) -> Vec<Complex64> {
        let mut buffer = input.to_vec();
        self.ifft_inplace(&mut buffer);
        buffer
    }

    /// Compute the magnitude spectrum of a field: `|fft(field)[k]|`.
    pub fn magnitude_spectrum(&mut self, field: &[Complex64]) -> Vec<f64> {
        self.fft(field).iter().map(|c| c.norm()).collect()
    }
}

/// Total energy of a field: sum of squared magnitudes.
pub fn energy(samples: &[Complex64]) -> f64 {
    samples.iter().map(|z| z.norm_sqr()).sum()
}
