//! End-to-end retrieval scenarios
//!
//! Exercises the full pipeline (fixture → initializer → engine →
//! extractor) on the reference setups: constant-amplitude phase-only
//! objects and a Gaussian-envelope signal, under both GS and WGS.

use ifta_core::prelude::*;

/// The reference phase-only setup: N = 512, grid over [-1, 1], true phase
/// sin(5πx), constant amplitude.
fn phase_only_setup() -> (Grid, GroundTruth) {
    let grid = Grid::linspace(-1.0, 1.0, 512).unwrap();
    let truth = GroundTruth::synthesize(
        &grid,
        &AmplitudeProfile::Constant { level: 1.0 },
        &PhaseProfile::Sinusoidal { cycles: 5.0 },
    );
    (grid, truth)
}

#[test]
fn gs_fourier_error_does_not_increase() {
    // Pure GS with the deterministic quadratic sweep: the Fourier-domain
    // constraint error after iteration 2 must not exceed the error after
    // iteration 1. The Fourier projection maps onto the constraint set and
    // the spatial projection cannot move the field further from it than
    // the previous cycle did.
    let (grid, truth) = phase_only_setup();
    let initial = initial_field(
        &truth.spatial_mag,
        &grid,
        &InitStrategy::QuadraticSweep { beta: 15.0 },
    )
    .unwrap();

    let mut engine =
        PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
    let out = engine
        .run_traced(&initial, &IterationConfig::gs(2))
        .unwrap();

    assert_eq!(out.fourier_errors.len(), 2);
    assert!(
        out.fourier_errors[1] <= out.fourier_errors[0],
        "error increased: {} -> {}",
        out.fourier_errors[0],
        out.fourier_errors[1]
    );
    assert!(!out.non_finite);
}

#[test]
fn gs_error_keeps_shrinking_over_many_iterations() {
    let (grid, truth) = phase_only_setup();
    let initial = initial_field(
        &truth.spatial_mag,
        &grid,
        &InitStrategy::QuadraticSweep { beta: 15.0 },
    )
    .unwrap();

    let mut engine =
        PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
    let out = engine
        .run_traced(&initial, &IterationConfig::gs(50))
        .unwrap();

    for pair in out.fourier_errors.windows(2) {
        // Small numerical wiggle allowed; the trend must not reverse.
        assert!(pair[1] <= pair[0] + 1e-9, "error increased: {pair:?}");
    }
    assert!(out.fourier_errors[49] < out.fourier_errors[0]);
}

#[test]
fn seeded_runs_are_identical() {
    let (grid, truth) = phase_only_setup();
    let strategy = InitStrategy::RandomPhase { seed: Some(1234) };
    let config = IterationConfig::gs(20);

    let run = |truth: &GroundTruth| {
        let initial = initial_field(&truth.spatial_mag, &grid, &strategy).unwrap();
        let mut engine =
            PhaseRetrievalEngine::new(truth.spatial_mag.clone(), truth.fourier_mag.clone())
                .unwrap();
        engine.run(&initial, &config).unwrap()
    };

    let a = run(&truth);
    let b = run(&truth);
    assert_eq!(a, b);
}

#[test]
fn unseeded_runs_differ() {
    let (grid, truth) = phase_only_setup();
    let strategy = InitStrategy::RandomPhase { seed: None };
    let config = IterationConfig::gs(5);

    let run = || {
        let initial = initial_field(&truth.spatial_mag, &grid, &strategy).unwrap();
        let mut engine =
            PhaseRetrievalEngine::new(truth.spatial_mag.clone(), truth.fourier_mag.clone())
                .unwrap();
        engine.run(&initial, &config).unwrap()
    };

    assert_ne!(run(), run());
}

#[test]
fn wgs_reduces_fourier_error_on_gaussian_signal() {
    // The Gaussian-envelope setup from the reference: amplitude
    // exp(-20x²), sinusoidal true phase, random seeded init, WGS α = 0.7.
    let grid = Grid::linspace(-1.0, 1.0, 512).unwrap();
    let truth = GroundTruth::synthesize(
        &grid,
        &AmplitudeProfile::Gaussian { width: 20.0 },
        &PhaseProfile::Sinusoidal { cycles: 5.0 },
    );
    let initial = initial_field(
        &truth.spatial_mag,
        &grid,
        &InitStrategy::RandomPhase { seed: Some(99) },
    )
    .unwrap();

    let mut engine =
        PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
    let initial_error = engine.fourier_error(&initial).unwrap();
    let out = engine
        .run_traced(&initial, &IterationConfig::wgs(100, 0.7))
        .unwrap();

    let final_error = *out.fourier_errors.last().unwrap();
    assert!(
        final_error < 0.5 * initial_error,
        "expected substantial error reduction, got {initial_error} -> {final_error}"
    );
    assert!(!out.non_finite);
}

#[test]
fn retrieved_phase_is_continuous() {
    // Whatever phase GS converges to, extraction must not leave 2π jumps
    // in regions where the spatial magnitude is well above zero.
    let (grid, truth) = phase_only_setup();
    let initial = initial_field(
        &truth.spatial_mag,
        &grid,
        &InitStrategy::QuadraticSweep { beta: 15.0 },
    )
    .unwrap();

    let mut engine =
        PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
    let field = engine.run(&initial, &IterationConfig::gs(200)).unwrap();

    let phase = retrieved_phase(&field);
    for pair in phase.windows(2) {
        assert!(
            (pair[1] - pair[0]).abs() <= std::f64::consts::PI + 1e-12,
            "2π discontinuity survived unwrapping: {pair:?}"
        );
    }
}

#[test]
fn sinusoidal_sweep_init_runs_end_to_end() {
    let (grid, truth) = phase_only_setup();
    let initial = initial_field(
        &truth.spatial_mag,
        &grid,
        &InitStrategy::SinusoidalSweep {
            amplitude: 1.0,
            cycles: 3.0,
        },
    )
    .unwrap();

    let mut engine =
        PhaseRetrievalEngine::new(truth.spatial_mag, truth.fourier_mag).unwrap();
    let out = engine
        .run_traced(&initial, &IterationConfig::wgs(30, 0.5))
        .unwrap();

    assert_eq!(out.field.len(), 512);
    assert!(field_is_finite(&out.field));
    assert!(out.fourier_errors[29] <= out.fourier_errors[0]);
}
