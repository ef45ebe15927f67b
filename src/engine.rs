//! Gerchberg–Saxton projection engine
//!
//! The algorithmic core of the crate: alternating magnitude projections
//! between the spatial and Fourier domains. Each iteration performs the
//! same fixed cycle on the current field:
//!
//! ```text
//!        FFT                 enforce |U|            IFFT
//! field ─────► U ──────────────────────────► U' ─────────► field
//!   ▲                                                        │
//!   └────────────────── enforce |field| ◄────────────────────┘
//! ```
//!
//! There is no convergence check and no early exit: the loop runs exactly
//! `iterations` times, and zero iterations returns the initial field
//! unchanged. The Fourier-domain projection comes in two flavors, selected
//! by [`WeightPolicy`]:
//!
//! - **Direct** (pure GS): replace `|U|` with the target magnitude.
//! - **Relaxed** (weighted GS): blend `(1 − α)·|U| + α·target` before
//!   replacing. `α = 1` reduces to pure GS; smaller α converges more
//!   slowly but tolerates noisy magnitude constraints better.
//!
//! ## Zero-magnitude convention
//!
//! `arg(0 + 0i)` is 0 (the `atan2(0, 0)` convention), so a projection at
//! an index where the current sample is exactly zero yields the positive
//! real value `mag · exp(i·0)`. The same convention applies at every such
//! index, in both domains.
//!
//! ## Example
//!
//! ```rust
//! use ifta_core::engine::{IterationConfig, PhaseRetrievalEngine};
//! use ifta_core::fixture::{AmplitudeProfile, GroundTruth, PhaseProfile};
//! use ifta_core::initializer::{initial_field, InitStrategy};
//! use ifta_core::types::Grid;
//!
//! let grid = Grid::linspace(-1.0, 1.0, 512).unwrap();
//! let truth = GroundTruth::synthesize(
//!     &grid,
//!     &AmplitudeProfile::Constant { level: 1.0 },
//!     &PhaseProfile::Sinusoidal { cycles: 5.0 },
//! );
//! let initial = initial_field(
//!     &truth.spatial_mag,
//!     &grid,
//!     &InitStrategy::QuadraticSweep { beta: 15.0 },
//! )
//! .unwrap();
//!
//! let mut engine =
//!     PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
//! let field = engine.run(&initial, &IterationConfig::gs(100)).unwrap();
//! assert_eq!(field.len(), 512);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::fft_utils::FftProcessor;
use crate::types::{field_is_finite, Field, RetrievalError, RetrievalResult};

/// How the observed Fourier magnitude is blended with the target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightPolicy {
    /// Pure GS: always use the target magnitude.
    Direct,
    /// Weighted GS: `(1 − alpha)·|U| + alpha·target`, `alpha ∈ [0, 1]`.
    Relaxed { alpha: f64 },
}

impl WeightPolicy {
    fn validate(&self) -> RetrievalResult<()> {
        if let WeightPolicy::Relaxed { alpha } = self {
            if !alpha.is_finite() || !(0.0..=1.0).contains(alpha) {
                return Err(RetrievalError::InvalidWeight(*alpha));
            }
        }
        Ok(())
    }
}

/// Iteration count and weighting policy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IterationConfig {
    /// Number of projection cycles. Zero is a legal no-op.
    pub iterations: usize,
    /// Fourier-domain magnitude update policy.
    pub weight: WeightPolicy,
}

impl IterationConfig {
    /// Pure GS for `iterations` cycles.
    pub fn gs(iterations: usize) -> Self {
        Self {
            iterations,
            weight: WeightPolicy::Direct,
        }
    }

    /// Weighted GS with relaxation `alpha` for `iterations` cycles.
    pub fn wgs(iterations: usize, alpha: f64) -> Self {
        Self {
            iterations,
            weight: WeightPolicy::Relaxed { alpha },
        }
    }
}

/// Output of a traced run: the final field plus per-iteration diagnostics.
#[derive(Debug, Clone)]
pub struct Retrieval {
    /// The field after the last iteration.
    pub field: Field,
    /// `‖ |FFT(field)| − fourier_mag ‖₂` after each iteration.
    pub fourier_errors: Vec<f64>,
    /// Whether the final field contains NaN or infinite samples.
    pub non_finite: bool,
}

/// Alternating-projection phase retrieval over a fixed magnitude pair
///
/// Holds the two magnitude constraints and a planned FFT pair; a single
/// engine can run any number of independent retrievals against the same
/// constraints.
#[derive(Debug)]
pub struct PhaseRetrievalEngine {
    spatial_mag: Vec<f64>,
    fourier_mag: Vec<f64>,
    fft: FftProcessor,
}

impl PhaseRetrievalEngine {
    /// Create an engine for the given magnitude pair.
    ///
    /// Fails with [`RetrievalError::EmptyGrid`] on empty constraints and
    /// [`RetrievalError::LengthMismatch`] if the two arrays disagree.
    pub fn new(spatial_mag: Vec<f64>, fourier_mag: Vec<f64>) -> RetrievalResult<Self> {
        if spatial_mag.is_empty() {
            return Err(RetrievalError::EmptyGrid);
        }
        if fourier_mag.len() != spatial_mag.len() {
            return Err(RetrievalError::LengthMismatch {
                expected: spatial_mag.len(),
                actual: fourier_mag.len(),
            });
        }
        let fft = FftProcessor::new(spatial_mag.len());
        Ok(Self {
            spatial_mag,
            fourier_mag,
            fft,
        })
    }

    /// Number of samples N.
    pub fn len(&self) -> usize {
        self.spatial_mag.len()
    }

    /// Always false: construction rejects empty constraints.
    pub fn is_empty(&self) -> bool {
        self.spatial_mag.is_empty()
    }

    /// Run the projection loop, returning the final field.
    ///
    /// Non-finite values are never masked: if they appear in the input or
    /// arise during iteration they propagate to the output, where the
    /// caller can detect them with
    /// [`field_is_finite`](crate::types::field_is_finite).
    pub fn run(
        &mut self,
        initial: &[Complex64],
        config: &IterationConfig,
    ) -> RetrievalResult<Field> {
        self.validate(initial, config)?;
        tracing::debug!(
            n = initial.len(),
            iterations = config.iterations,
            weight = ?config.weight,
            "starting phase retrieval run"
        );

        let mut field = initial.to_vec();
        for _ in 0..config.iterations {
            self.iterate(&mut field, &config.weight);
        }

        if !field_is_finite(&field) {
            tracing::warn!("retrieval run produced non-finite samples");
        }
        Ok(field)
    }

    /// Run the projection loop, recording the Fourier-domain constraint
    /// error after each iteration.
    ///
    /// Costs one extra forward transform per iteration compared to
    /// [`run`](Self::run).
    pub fn run_traced(
        &mut self,
        initial: &[Complex64],
        config: &IterationConfig,
    ) -> RetrievalResult<Retrieval> {
        self.validate(initial, config)?;
        tracing::debug!(
            n = initial.len(),
            iterations = config.iterations,
            weight = ?config.weight,
            "starting traced phase retrieval run"
        );

        let mut field = initial.to_vec();
        let mut fourier_errors = Vec::with_capacity(config.iterations);
        for _ in 0..config.iterations {
            self.iterate(&mut field, &config.weight);
            fourier_errors.push(self.fourier_error_unchecked(&field));
        }

        let non_finite = !field_is_finite(&field);
        if non_finite {
            tracing::warn!("retrieval run produced non-finite samples");
        }
        Ok(Retrieval {
            field,
            fourier_errors,
            non_finite,
        })
    }

    /// Fourier-domain constraint error of an arbitrary field:
    /// `‖ |FFT(field)| − fourier_mag ‖₂`.
    pub fn fourier_error(&mut self, field: &[Complex64]) -> RetrievalResult<f64> {
        if field.len() != self.spatial_mag.len() {
            return Err(RetrievalError::LengthMismatch {
                expected: self.spatial_mag.len(),
                actual: field.len(),
            });
        }
        Ok(self.fourier_error_unchecked(field))
    }

    fn fourier_error_unchecked(&mut self, field: &[Complex64]) -> f64 {
        self.fft
            .fft(field)
            .iter()
            .zip(&self.fourier_mag)
            .map(|(z, &m)| (z.norm() - m).powi(2))
            .sum::<f64>()
            .sqrt()
    }

    fn validate(&self, initial: &[Complex64], config: &IterationConfig) -> RetrievalResult<()> {
        if initial.len() != self.spatial_mag.len() {
            return Err(RetrievalError::LengthMismatch {
                expected: self.spatial_mag.len(),
                actual: initial.len(),
            });
        }
        config.weight.validate()
    }

    /// One full projection cycle.
    fn iterate(&mut self, field: &mut Field, weight: &WeightPolicy) {
        self.fft.fft_inplace(field);
        match weight {
            WeightPolicy::Direct => project_magnitude(field, &self.fourier_mag),
            WeightPolicy::Relaxed { alpha } => {
                for (z, &target) in field.iter_mut().zip(&self.fourier_mag) {
                    let blended = (1.0 - alpha) * z.norm() + alpha * target;
                    *z = Complex64::from_polar(blended, z.arg());
                }
            }
        }
        self.fft.ifft_inplace(field);
        project_magnitude(field, &self.spatial_mag);
    }
}

/// Replace every sample's magnitude while preserving its phase:
/// `field[k] ← magnitude[k] · exp(i·arg(field[k]))`.
///
/// A true projection: applying it twice equals applying it once. Samples
/// that are exactly zero project to the positive real axis (`arg(0) = 0`).
pub fn project_magnitude(field: &mut [Complex64], magnitude: &[f64]) {
    for (z, &m) in field.iter_mut().zip(magnitude) {
        *z = Complex64::from_polar(m, z.arg());
    }
}
