//! Throughput and speedup derivation, plus console formatting.
//!
//! Pure computation over already-measured samples. A zero elapsed span
//! (possible on coarse clocks) renders as an undefined speedup, never as
//! infinity or NaN.

use std::fmt::Write as _;

use colored::Colorize;
use vexbench_core::BenchConfig;
use vexbench_kernels::dispatch;

use crate::harness::KernelRun;

/// Derived per-kernel metrics.
#[derive(Debug, Clone)]
pub struct BenchmarkReport {
    pub kernel: &'static str,
    pub scalar_ms: f64,
    pub vector_ms: f64,
    /// `None` when either elapsed span was zero.
    pub speedup: Option<f64>,
    /// Millions of element operations per second, scalar side.
    pub scalar_mops: Option<f64>,
    /// Millions of element operations per second, vector side.
    pub vector_mops: Option<f64>,
    pub results_match: bool,
}

impl BenchmarkReport {
    pub fn from_run(run: &KernelRun, config: &BenchConfig) -> Self {
        let scalar_ms = run.scalar.elapsed_nanos as f64 / 1e6;
        let vector_ms = run.vector.elapsed_nanos as f64 / 1e6;
        let speedup = if run.scalar.elapsed_nanos == 0 || run.vector.elapsed_nanos == 0 {
            None
        } else {
            Some(run.scalar.elapsed_nanos as f64 / run.vector.elapsed_nanos as f64)
        };
        let ops = (config.array_size * config.iterations) as f64;
        let scalar_mops = (run.scalar.elapsed_nanos > 0).then(|| ops / scalar_ms / 1000.0);
        let vector_mops = (run.vector.elapsed_nanos > 0).then(|| ops / vector_ms / 1000.0);
        Self {
            kernel: run.kernel,
            scalar_ms,
            vector_ms,
            speedup,
            scalar_mops,
            vector_mops,
            results_match: run.results_match,
        }
    }

    /// Percentage improvement of the vector side over the scalar side.
    pub fn improvement_pct(&self) -> Option<f64> {
        self.speedup.map(|s| (s - 1.0) * 100.0)
    }
}

fn fmt_mops(mops: Option<f64>) -> String {
    match mops {
        Some(v) => format!("{v:.2} M ops/sec"),
        None => "n/a".to_string(),
    }
}

/// One formatted block per kernel.
pub fn format_report(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", format!("--- {} ---", report.kernel).bold());
    let _ = writeln!(
        out,
        "Scalar time:    {:.2} ms ({})",
        report.scalar_ms,
        fmt_mops(report.scalar_mops)
    );
    let _ = writeln!(
        out,
        "Vector time:    {:.2} ms ({})",
        report.vector_ms,
        fmt_mops(report.vector_mops)
    );
    match (report.speedup, report.improvement_pct()) {
        (Some(speedup), Some(pct)) => {
            let _ = writeln!(out, "Speedup:        {speedup:.2}x");
            let _ = writeln!(out, "Improvement:    {pct:.1}%");
        }
        _ => {
            let _ = writeln!(out, "Speedup:        n/a (elapsed span too small to measure)");
        }
    }
    let verdict = if report.results_match {
        "Yes".green()
    } else {
        "No".red()
    };
    let _ = writeln!(out, "Results match:  {verdict}");
    out
}

/// Header block: platform and configuration echo.
pub fn format_header(config: &BenchConfig) -> String {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get().to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    let path = dispatch::active_path();

    let mut out = String::new();
    let _ = writeln!(out, "===============================================");
    let _ = writeln!(out, "  vexbench — scalar vs SIMD kernel timing");
    let _ = writeln!(out, "===============================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "System:");
    let _ = writeln!(out, "  Arch:              {}", std::env::consts::ARCH);
    let _ = writeln!(out, "  OS:                {}", std::env::consts::OS);
    let _ = writeln!(out, "  Logical CPUs:      {cpus}");
    let _ = writeln!(out, "  SIMD path:         {}", path.name());
    let _ = writeln!(out, "  Lane width:        {} x f32", path.lane_width());
    let _ = writeln!(out);
    let _ = writeln!(out, "Configuration:");
    let _ = writeln!(
        out,
        "  Array size:        {} elements",
        group_thousands(config.array_size)
    );
    let _ = writeln!(out, "  Iterations:        {}", group_thousands(config.iterations));
    let _ = writeln!(
        out,
        "  Warmup iterations: {}",
        group_thousands(config.warmup_iterations)
    );
    let _ = writeln!(out, "  Seed:              {}", config.seed);
    let _ = writeln!(out);
    let _ = writeln!(out, "===============================================");
    out
}

/// Footer block with the usual caveats.
pub fn format_footer() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===============================================");
    let _ = writeln!(out, "           Benchmark complete");
    let _ = writeln!(out, "===============================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Notes:");
    let _ = writeln!(out, "- Higher speedup means the vector path is faster");
    let _ = writeln!(out, "- Results vary with CPU architecture and compiler flags");
    let _ = writeln!(
        out,
        "- Single-span timing only; run the criterion benches for error bars"
    );
    out
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
