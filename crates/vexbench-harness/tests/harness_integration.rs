//! End-to-end harness runs on small, fully-known fixtures.

use vexbench_core::{ArrayFixture, BenchConfig};
use vexbench_harness::harness::BenchmarkHarness;
use vexbench_harness::report::BenchmarkReport;
use vexbench_kernels::KERNELS;

fn config(size: usize) -> BenchConfig {
    BenchConfig {
        array_size: size,
        iterations: 50,
        warmup_iterations: 5,
        seed: 42,
    }
}

/// Size 8, A = 1..=8, B = all ones: every kernel result is exactly
/// representable, so all five verifications must pass on every SIMD path.
fn known_fixture() -> ArrayFixture {
    let a: Vec<f32> = (1..=8).map(|i| i as f32).collect();
    let b = vec![1.0f32; 8];
    ArrayFixture::from_buffers(a, b)
}

#[test]
fn full_suite_on_known_fixture() {
    let mut harness = BenchmarkHarness::with_fixture(config(8), known_fixture()).unwrap();
    let runs = harness.run_all();
    assert_eq!(runs.len(), KERNELS.len());
    for run in &runs {
        assert!(run.results_match, "{} failed verification", run.kernel);
        assert!(run.scalar.elapsed_nanos > 0, "{}: zero scalar span", run.kernel);
        assert!(run.vector.elapsed_nanos > 0, "{}: zero vector span", run.kernel);
    }
}

#[test]
fn reports_are_well_formed() {
    let cfg = config(8);
    let mut harness = BenchmarkHarness::with_fixture(cfg.clone(), known_fixture()).unwrap();
    for run in harness.run_all() {
        let report = BenchmarkReport::from_run(&run, &cfg);
        assert!(report.scalar_ms.is_finite() && report.scalar_ms > 0.0);
        assert!(report.vector_ms.is_finite() && report.vector_ms > 0.0);
        if let Some(speedup) = report.speedup {
            assert!(speedup.is_finite() && speedup > 0.0);
        }
    }
}

#[test]
fn repeated_sessions_agree_on_verdicts() {
    // Same seed, same config: correctness verdicts are deterministic even
    // though the timings differ between sessions.
    let first: Vec<bool> = BenchmarkHarness::new(config(512))
        .unwrap()
        .run_all()
        .iter()
        .map(|r| r.results_match)
        .collect();
    let second: Vec<bool> = BenchmarkHarness::new(config(512))
        .unwrap()
        .run_all()
        .iter()
        .map(|r| r.results_match)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn size_not_a_lane_multiple() {
    // 13 elements forces a remainder tail on every vector path.
    let a: Vec<f32> = (0..13).map(|i| i as f32).collect();
    let b: Vec<f32> = vec![2.0; 13];
    let mut harness =
        BenchmarkHarness::with_fixture(config(13), ArrayFixture::from_buffers(a, b)).unwrap();
    for run in harness.run_all() {
        assert!(run.results_match, "{} failed at size 13", run.kernel);
    }
}
