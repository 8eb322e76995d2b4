//! Thin-Line Feedback Loop Demo
//!
//! Runs the full evolve → measure → decode → feedback cycle and prints one
//! line per step, either styled for the terminal or as JSON records for
//! downstream tooling.

use clap::Parser;
use console::style;

use thinline_core::{
    CoreResult, DecoderConfig, FeedbackConfig, QuantumConfig, SignalConfig, StepResult,
    ThinLineCore,
};

use thinline_demos::{print_header, print_result, print_section};

#[derive(Parser, Debug)]
#[command(name = "demo-loop")]
#[command(about = "Run the thin-line feedback simulation loop")]
struct Args {
    /// Number of qubits in the register
    #[arg(short = 'n', long, default_value = "6")]
    qubits: usize,

    /// Measurement shots per step
    #[arg(short, long, default_value = "256")]
    shots: u32,

    /// Number of feedback-loop steps
    #[arg(short = 't', long, default_value = "12")]
    steps: usize,

    /// Random seed (omit for a fresh run each time)
    #[arg(long)]
    seed: Option<u64>,

    /// Coupling strength for the global phase rotation
    #[arg(long, default_value = "0.1")]
    coupling: f64,

    /// Detection threshold for the decoder baseline
    #[arg(long, default_value = "1.5")]
    threshold: f64,

    /// Emit one JSON object per step instead of styled output
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn build_core(args: &Args) -> CoreResult<ThinLineCore> {
    let mut quantum = QuantumConfig::new(args.qubits, args.shots, args.coupling)?;
    if let Some(seed) = args.seed {
        quantum = quantum.with_seed(seed);
    }
    ThinLineCore::new(
        quantum,
        SignalConfig::default(),
        FeedbackConfig::default(),
        DecoderConfig::new(args.threshold, 0.25, 5)?,
    )
}

fn print_step(result: &StepResult) {
    let marker = if result.detected_pattern {
        style("pattern").green().bold()
    } else {
        style("noise  ").dim()
    };
    println!(
        "  step {:>3}  {}  peak_ratio {:>8.4}",
        result.step, marker, result.peak_ratio
    );
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut core = match build_core(&args) {
        Ok(core) => core,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if !args.json {
        print_header("Thin-Line Feedback Loop Demo");
        print_section("Setup");
        print_result("Qubits", args.qubits);
        print_result("State dimension", 1_usize << args.qubits);
        print_result("Shots per step", args.shots);
        print_result("Steps", args.steps);
        print_result(
            "Seed",
            args.seed
                .map_or_else(|| "entropy".to_string(), |seed| seed.to_string()),
        );
        print_section("Run");
    }

    let results = match core.run(args.steps) {
        Ok(results) => results,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };

    if args.json {
        for result in &results {
            match serde_json::to_string(result) {
                Ok(line) => println!("{line}"),
                Err(err) => {
                    eprintln!("Error: {err}");
                    std::process::exit(1);
                }
            }
        }
        return;
    }

    for result in &results {
        print_step(result);
    }

    let detections = results.iter().filter(|r| r.detected_pattern).count();
    print_section("Summary");
    print_result("Detections", format!("{detections}/{}", results.len()));
    print_result(
        "Final peak ratio",
        format!("{:.4}", results[results.len() - 1].peak_ratio),
    );
}
