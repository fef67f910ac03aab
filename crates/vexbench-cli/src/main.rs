//! vexbench — scalar vs explicit-SIMD float kernel microbenchmarks.
//!
//! Subcommands:
//! - run: execute the five kernel benchmarks and print the report
//! - info: display the detected SIMD capabilities

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vexbench_core::BenchConfig;
use vexbench_harness::harness::BenchmarkHarness;
use vexbench_harness::report::{self, BenchmarkReport};
use vexbench_kernels::{dispatch, vector, KERNELS};

#[derive(Parser)]
#[command(name = "vexbench")]
#[command(about = "Scalar vs SIMD float kernel microbenchmarks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all kernel benchmarks
    Run {
        /// Elements per input buffer
        #[arg(long)]
        size: Option<usize>,

        /// Timed iterations per implementation
        #[arg(long)]
        iterations: Option<usize>,

        /// Untimed warmup iterations before each timed phase
        #[arg(long)]
        warmup: Option<usize>,

        /// PRNG seed for the input buffers
        #[arg(long)]
        seed: Option<u64>,

        /// TOML config file; flags override file values
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show detected SIMD capabilities and the selected path
    Info,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            size,
            iterations,
            warmup,
            seed,
            config,
        } => run(size, iterations, warmup, seed, config)?,
        Commands::Info => show_info(),
    }

    Ok(())
}

fn init_logging() {
    // Keep the console report clean by default; RUST_LOG opts into more.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().compact())
        .init();
}

fn run(
    size: Option<usize>,
    iterations: Option<usize>,
    warmup: Option<usize>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut cfg = match config_path {
        Some(path) => BenchConfig::from_file(path)?,
        None => BenchConfig::default(),
    };
    if let Some(v) = size {
        cfg.array_size = v;
    }
    if let Some(v) = iterations {
        cfg.iterations = v;
    }
    if let Some(v) = warmup {
        cfg.warmup_iterations = v;
    }
    if let Some(v) = seed {
        cfg.seed = v;
    }
    cfg.validate()?;

    print!("{}", report::format_header(&cfg));
    println!();

    let mut harness = BenchmarkHarness::new(cfg.clone())?;
    for kernel in KERNELS {
        let run = harness.run_kernel(kernel);
        println!("{}", report::format_report(&BenchmarkReport::from_run(&run, &cfg)));
    }

    print!("{}", report::format_footer());
    Ok(())
}

fn show_info() {
    let path = dispatch::active_path();

    println!("{}", "SIMD capability report".bold());
    println!("======================");
    println!();
    println!("Arch:        {}", std::env::consts::ARCH);
    println!("SIMD path:   {}", path.name());
    println!("Lane width:  {} x f32", path.lane_width());
    println!();

    let features = dispatch::detected_features();
    if features.is_empty() {
        println!("No feature probes available on this architecture.");
    } else {
        println!("Detected features:");
        for (name, available) in features {
            let mark = if available {
                "yes".green()
            } else {
                "no".red()
            };
            println!("  {name:<8} {mark}");
        }
    }
    println!();

    // Quick self-check through the active vector path.
    let a: Vec<f32> = (1..=8).map(|i| i as f32).collect();
    let b = vec![1.0f32; 8];
    let mut out = vec![0.0f32; 8];
    vector::vector_add(&a, &b, &mut out);
    if out == [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0] {
        println!("{} vector path self-check passed", "✓".green());
    } else {
        println!("{} vector path self-check FAILED: {out:?}", "✗".red());
    }
}
