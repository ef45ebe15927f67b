//! # 1D Iterative Fourier Transform Phase Retrieval
//!
//! This crate recovers the unknown phase of a complex-valued 1D signal
//! from magnitude-only knowledge in two conjugate domains: the signal's
//! spatial magnitude `|u(x)|` and its Fourier magnitude `|U(f)|`. The
//! solver is the classical Gerchberg–Saxton (GS) alternating-projection
//! algorithm plus its weighted variant (WGS), which relaxes the
//! Fourier-domain magnitude update by a parameter α.
//!
//! ## Pipeline
//!
//! ```text
//! GroundTruth ──► (spatial_mag, fourier_mag)
//!                        │
//!                        ▼
//! initial_field ──► PhaseRetrievalEngine ──► final field ──► retrieved_phase
//!   (strategy)       (GS / WGS, fixed          │
//!                     iteration count)         └──► fourier_errors (traced)
//! ```
//!
//! Every run is a pure function of its inputs plus the iteration count:
//! no global state, no convergence check, no early exit. Independent runs
//! can execute in parallel since each owns its field exclusively.
//!
//! ## Example
//!
//! ```rust
//! use ifta_core::prelude::*;
//!
//! // Known magnitudes, synthesized from a ground truth we can compare to.
//! let grid = Grid::linspace(-1.0, 1.0, 512).unwrap();
//! let truth = GroundTruth::synthesize(
//!     &grid,
//!     &AmplitudeProfile::Constant { level: 1.0 },
//!     &PhaseProfile::Sinusoidal { cycles: 5.0 },
//! );
//!
//! // Deterministic quadratic initial guess, weighted GS.
//! let initial = initial_field(
//!     &truth.spatial_mag,
//!     &grid,
//!     &InitStrategy::QuadraticSweep { beta: 15.0 },
//! )
//! .unwrap();
//!
//! let mut engine =
//!     PhaseRetrievalEngine::new(truth.spatial_mag.clone(), truth.fourier_mag.clone())
//!         .unwrap();
//! let field = engine.run(&initial, &IterationConfig::wgs(200, 0.7)).unwrap();
//!
//! let phase = retrieved_phase(&field);
//! assert_eq!(phase.len(), 512);
//! ```

pub mod engine;
pub mod fft_utils;
pub mod fixture;
pub mod initializer;
pub mod phase_unwrap;
pub mod types;

/// Commonly used items, re-exported for convenience.
pub mod prelude {
    pub use crate::engine::{
        IterationConfig, PhaseRetrievalEngine, Retrieval, WeightPolicy,
    };
    pub use crate::fft_utils::FftProcessor;
    pub use crate::fixture::{AmplitudeProfile, GroundTruth, PhaseProfile};
    pub use crate::initializer::{initial_field, InitStrategy};
    pub use crate::phase_unwrap::{retrieved_phase, unwrap_phase, wrap_phase};
    pub use crate::types::{field_is_finite, Complex, Field, Grid, RetrievalError, RetrievalResult};
}
