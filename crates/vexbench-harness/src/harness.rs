//! Warmup/timing state machine driving each kernel's implementation pair.
//!
//! Per kernel the phases run strictly in order: warmup (both sides, untimed),
//! timed scalar, timed vector, verify, report. Each timed phase wraps all
//! iterations in a single `Instant` span so timer overhead is amortized, and
//! passes outcomes through `black_box` so the loop bodies cannot be
//! optimized away. The last outcome of each timed phase is retained —
//! outside the span — for the correctness cross-check.

use std::hint::black_box;
use std::time::Instant;

use tracing::{debug, info, warn};
use vexbench_core::{ArrayFixture, BenchConfig, Result, VexbenchError};
use vexbench_kernels::kernel::{Kernel, KernelImpl, KernelKind, KERNELS};

/// Which implementation a timing sample measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Scalar,
    Vector,
}

/// Wall-clock time accumulated over all timed iterations of one
/// implementation, not per call.
#[derive(Debug, Clone)]
pub struct TimingSample {
    pub kernel: &'static str,
    pub variant: Variant,
    pub elapsed_nanos: u64,
}

/// Timings and correctness verdict for one kernel.
#[derive(Debug, Clone)]
pub struct KernelRun {
    pub kernel: &'static str,
    pub kind: KernelKind,
    pub scalar: TimingSample,
    pub vector: TimingSample,
    pub results_match: bool,
}

/// Outcome retained from the last timed invocation of one implementation.
enum Retained {
    Value(f32),
    Buffer(Vec<f32>),
}

/// Absolute tolerance for scalar/vector agreement. Reduction order differs
/// between the paths, so exact equality is not expected.
pub const TOLERANCE: f32 = 1e-3;

/// Runs every kernel pair against one shared fixture.
pub struct BenchmarkHarness {
    config: BenchConfig,
    fixture: ArrayFixture,
}

impl BenchmarkHarness {
    /// Build a harness with a fixture seeded from the configuration.
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let fixture = ArrayFixture::new(config.array_size, config.seed);
        Ok(Self { config, fixture })
    }

    /// Build a harness around an explicit fixture. Used by tests and
    /// alternate drivers that need known inputs.
    pub fn with_fixture(config: BenchConfig, fixture: ArrayFixture) -> Result<Self> {
        config.validate()?;
        if fixture.len() != config.array_size {
            return Err(VexbenchError::InvalidConfig(format!(
                "fixture length {} does not match array_size {}",
                fixture.len(),
                config.array_size
            )));
        }
        Ok(Self { config, fixture })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the whole suite in order.
    pub fn run_all(&mut self) -> Vec<KernelRun> {
        KERNELS.iter().map(|k| self.run_kernel(k)).collect()
    }

    /// Run one kernel through all phases.
    pub fn run_kernel(&mut self, kernel: &Kernel) -> KernelRun {
        debug!(kernel = kernel.name, iterations = self.config.warmup_iterations, "warmup");
        for _ in 0..self.config.warmup_iterations {
            self.invoke(kernel.scalar);
            self.invoke(kernel.vector);
        }

        let (scalar, scalar_outcome) = self.timed_phase(kernel, Variant::Scalar);
        let (vector, vector_outcome) = self.timed_phase(kernel, Variant::Vector);

        let results_match = verify(&scalar_outcome, &vector_outcome);
        if !results_match {
            // Soft failure: surfaced in the report, later kernels still run.
            warn!(
                kernel = kernel.name,
                "scalar and vector results disagree beyond tolerance"
            );
        }
        info!(
            kernel = kernel.name,
            scalar_nanos = scalar.elapsed_nanos,
            vector_nanos = vector.elapsed_nanos,
            results_match,
            "kernel timed"
        );

        KernelRun {
            kernel: kernel.name,
            kind: kernel.kind,
            scalar,
            vector,
            results_match,
        }
    }

    fn timed_phase(&mut self, kernel: &Kernel, variant: Variant) -> (TimingSample, Retained) {
        let implementation = match variant {
            Variant::Scalar => kernel.scalar,
            Variant::Vector => kernel.vector,
        };

        let start = Instant::now();
        let mut last = 0.0f32;
        for _ in 0..self.config.iterations {
            last = self.invoke(implementation);
        }
        let elapsed = start.elapsed();

        // Retention is outside the timed span: copying the scratch buffer
        // must not pollute the measurement.
        let retained = match implementation {
            KernelImpl::Reduce(_) => Retained::Value(last),
            KernelImpl::Map(_) => Retained::Buffer(self.fixture.scratch().to_vec()),
        };

        let sample = TimingSample {
            kernel: kernel.name,
            variant,
            elapsed_nanos: elapsed.as_nanos() as u64,
        };
        (sample, retained)
    }

    /// Run one implementation once. Outcomes flow through `black_box` so the
    /// optimizer cannot treat repeated invocations as dead code.
    fn invoke(&mut self, implementation: KernelImpl) -> f32 {
        match implementation {
            KernelImpl::Map(f) => {
                let (a, b, out) = self.fixture.split_mut();
                f(a, b, out);
                black_box(&*out);
                0.0
            }
            KernelImpl::Reduce(f) => {
                black_box(f(self.fixture.input_a(), self.fixture.input_b()))
            }
        }
    }
}

fn verify(scalar: &Retained, vector: &Retained) -> bool {
    match (scalar, vector) {
        (Retained::Value(s), Retained::Value(v)) => (s - v).abs() < TOLERANCE,
        (Retained::Buffer(s), Retained::Buffer(v)) => {
            s.len() == v.len()
                && s.iter().zip(v).all(|(x, y)| (x - y).abs() < TOLERANCE)
        }
        _ => false,
    }
}
