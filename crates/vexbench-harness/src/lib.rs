//! Benchmark harness: drives warmup and timed iteration for each kernel's
//! two implementations, verifies they agree, and derives the report.
//!
//! Everything runs sequentially on the calling thread. Concurrent phases
//! would contend for cache and cores and corrupt the comparison.

pub mod harness;
pub mod report;

pub use harness::{BenchmarkHarness, KernelRun, TimingSample, Variant, TOLERANCE};
pub use report::BenchmarkReport;
