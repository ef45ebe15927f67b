//! Ground-truth signal synthesis
//!
//! Produces the two known magnitude arrays a retrieval run starts from. In
//! a physical setup these come from intensity measurements in the object
//! and diffraction planes; here they are synthesized from a parametric
//! ground truth so that the retrieved phase can be compared against the
//! true one.
//!
//! The ground truth is `u(x) = a(x) · exp(i·φ(x))` with the amplitude and
//! phase profiles chosen from a small set of tagged variants. The fixture
//! hands out `|u|`, `|FFT(u)|`, and (for comparison plots only) `φ` itself.
//!
//! ## Example
//!
//! ```rust
//! use ifta_core::fixture::{AmplitudeProfile, GroundTruth, PhaseProfile};
//! use ifta_core::types::Grid;
//!
//! let grid = Grid::linspace(-1.0, 1.0, 512).unwrap();
//! let truth = GroundTruth::synthesize(
//!     &grid,
//!     &AmplitudeProfile::Constant { level: 1.0 },
//!     &PhaseProfile::Sinusoidal { cycles: 5.0 },
//! );
//! assert_eq!(truth.spatial_mag.len(), 512);
//! assert_eq!(truth.fourier_mag.len(), 512);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::fft_utils::FftProcessor;
use crate::types::{Grid, RetrievalError, RetrievalResult};

/// Amplitude profile of the synthetic ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AmplitudeProfile {
    /// Constant amplitude `level` (a phase-only object).
    Constant { level: f64 },
    /// Gaussian envelope `exp(-width · x²)`.
    Gaussian { width: f64 },
}

impl AmplitudeProfile {
    /// Evaluate the amplitude at coordinate `x`.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            AmplitudeProfile::Constant { level } => *level,
            AmplitudeProfile::Gaussian { width } => (-width * x * x).exp(),
        }
    }
}

/// Phase profile of the synthetic ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhaseProfile {
    /// Sinusoidal phase `sin(cycles · π · x)`.
    Sinusoidal { cycles: f64 },
    /// Quadratic phase `beta · x²`.
    Quadratic { beta: f64 },
}

impl PhaseProfile {
    /// Evaluate the phase at coordinate `x`, in radians.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            PhaseProfile::Sinusoidal { cycles } => (cycles * PI * x).sin(),
            PhaseProfile::Quadratic { beta } => beta * x * x,
        }
    }
}

/// The two known magnitudes plus the true phase for comparison
///
/// `spatial_mag` and `fourier_mag` are the only inputs the retrieval engine
/// sees; `true_phase` exists so a caller can plot retrieved vs. true phase
/// side by side.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    /// `|u(x)|` over the grid.
    pub spatial_mag: Vec<f64>,
    /// `|FFT(u)|` over the grid.
    pub fourier_mag: Vec<f64>,
    /// `φ(x)` over the grid, radians.
    pub true_phase: Vec<f64>,
}

impl GroundTruth {
    /// Synthesize from parametric profiles evaluated over `grid`.
    pub fn synthesize(
        grid: &Grid,
        amplitude: &AmplitudeProfile,
        phase: &PhaseProfile,
    ) -> Self {
        let amp: Vec<f64> = grid.samples().iter().map(|&x| amplitude.eval(x)).collect();
        let ph: Vec<f64> = grid.samples().iter().map(|&x| phase.eval(x)).collect();
        Self::build(amp, ph)
    }

    /// Build from caller-supplied amplitude and phase sample arrays.
    ///
    /// Fails with [`RetrievalError::LengthMismatch`] if the arrays differ
    /// in length, and [`RetrievalError::EmptyGrid`] if they are empty.
    pub fn from_samples(amplitude: &[f64], phase: &[f64]) -> RetrievalResult<Self> {
        if amplitude.is_empty() {
            return Err(RetrievalError::EmptyGrid);
        }
        if amplitude.len() != phase.len() {
            return Err(RetrievalError::LengthMismatch {
                expected: amplitude.len(),
                actual: phase.len(),
            });
        }
        Ok(Self::build(amplitude.to_vec(), phase.to_vec()))
    }

    fn build(amplitude: Vec<f64>, phase: Vec<f64>) -> Self {
        let n = amplitude.len();
        let u_true: Vec<Complex64> = amplitude
            .iter()
            .zip(phase.iter())
            .map(|(&a, &p)| Complex64::from_polar(a, p))
            .collect();

        let spatial_mag: Vec<f64> = u_true.iter().map(|z| z.norm()).collect();
        let fourier_mag = FftProcessor::new(n).magnitude_spectrum(&u_true);

        Self {
            spatial_mag,
            fourier_mag,
            true_phase: phase,
        }
    }

    /// Number of samples N.
    pub fn len(&self) -> usize {
        self.spatial_mag.len()
    }

    /// Always false: construction rejects empty inputs.
    pub fn is_empty(&self) -> bool {
        self.spatial_mag.is_empty()
    }
}
