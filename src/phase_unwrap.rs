//! Phase extraction and unwrapping
//!
//! The final field carries the retrieved phase only as principal-value
//! angles in (−π, π]; any true phase excursion beyond that range shows up
//! as artificial 2π jumps. This module removes them: whenever the jump
//! between consecutive samples strictly exceeds π, a running multiple of
//! 2π is added so the returned sequence is continuous wherever the
//! underlying phase is.
//!
//! A jump of *exactly* π is ambiguous (both directions are equally close)
//! and is passed through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use ifta_core::phase_unwrap::unwrap_phase;
//!
//! // A wrapped, monotonically increasing phase.
//! let wrapped = vec![0.0, 1.0, 2.0, 3.0, -3.0, -2.0, -1.0, 0.0];
//! let unwrapped = unwrap_phase(&wrapped);
//! for i in 1..unwrapped.len() {
//!     assert!(unwrapped[i] > unwrapped[i - 1]);
//! }
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

/// Wrap a phase to the principal range [−π, π].
pub fn wrap_phase(phase: f64) -> f64 {
    let mut p = phase % (2.0 * PI);
    if p > PI {
        p -= 2.0 * PI;
    } else if p < -PI {
        p += 2.0 * PI;
    }
    p
}

/// Remove artificial 2π discontinuities from a wrapped phase sequence.
///
/// The first sample is returned as-is; each later sample is shifted by the
/// accumulated multiple of 2π that keeps consecutive jumps within (−π, π].
pub fn unwrap_phase(wrapped: &[f64]) -> Vec<f64> {
    let mut output = Vec::with_capacity(wrapped.len());
    let mut correction = 0.0;
    let mut prev = 0.0;

    for (i, &x) in wrapped.iter().enumerate() {
        if i > 0 {
            let diff = x - prev;
            if diff > PI {
                correction -= 2.0 * PI;
            } else if diff < -PI {
                correction += 2.0 * PI;
            }
        }
        prev = x;
        output.push(x + correction);
    }
    output
}

/// Principal-value angles of a field, in (−π, π].
pub fn wrapped_phase(field: &[Complex64]) -> Vec<f64> {
    field.iter().map(|z| z.arg()).collect()
}

/// The retrieved phase of a final field: unwrapped principal angles.
///
/// Does not mutate the field; equivalent to
/// `unwrap_phase(&wrapped_phase(field))`.
pub fn retrieved_phase(field: &[Complex64]) -> Vec<f64> {
    unwrap_phase(&wrapped_phase(field))
}
