// ─────────────────────────────────────────────────────────────────────
// Sandy's Law Engine — Command-Line Runner
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Headless runner: time-evolves one trapped system and prints the
//! final regime, optionally with the full trajectory table or the
//! columnar log as JSON.
//!
//! Usage:
//!   sandys --z0 0.98 --sigma0 0.05 --entropy-end 5 --steps 200
//!   sandys --config engine.json --json > trajectory.json

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use sandys_engine::{ConstraintEvaluator, TrajectorySimulator};
use sandys_types::{EngineConfig, RunParams, SandysError, SandysResult, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "sandys")]
#[command(about = "Time-evolve a trapped system under Sandy's Law")]
struct Args {
    /// Initial trap strength Z0 in [0, 1]
    #[arg(long, default_value_t = 0.98)]
    z0: f64,

    /// Initial entropy export rate Σ0
    #[arg(long, default_value_t = 0.05)]
    sigma0: f64,

    /// Entropy gradient at the start of the ramp
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    entropy_start: f64,

    /// Entropy gradient at the end of the ramp
    #[arg(long, default_value_t = 5.0, allow_negative_numbers = true)]
    entropy_end: f64,

    /// Number of simulation steps
    #[arg(long, default_value_t = 200)]
    steps: usize,

    /// Keep Z constant instead of softening it
    #[arg(long)]
    no_soften: bool,

    /// JSON file with `engine` and `simulation` sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print every trajectory record
    #[arg(long)]
    table: bool,

    /// Emit the trajectory columns as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    engine: EngineConfig,
    simulation: SimulationConfig,
}

impl Args {
    fn run_params(&self) -> RunParams {
        RunParams {
            z0: self.z0,
            sigma0: self.sigma0,
            entropy_start: self.entropy_start,
            entropy_end: self.entropy_end,
            steps: self.steps,
            soften_z: !self.no_soften,
        }
    }
}

fn parse_config(text: &str, origin: &Path) -> SandysResult<FileConfig> {
    serde_json::from_str(text)
        .map_err(|e| SandysError::Config(format!("JSON parse error in {}: {e}", origin.display())))
}

fn load_config(path: &Path) -> SandysResult<FileConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| SandysError::Config(format!("cannot read {}: {e}", path.display())))?;
    parse_config(&text, path)
}

fn run(args: Args) -> SandysResult<()> {
    let file = match &args.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let evaluator = ConstraintEvaluator::new(file.engine)?;
    let sim = TrajectorySimulator::new(evaluator, file.simulation)?;

    let params = args.run_params();
    let trajectory = sim.run_params(&params)?;

    if args.json {
        let json = serde_json::to_string_pretty(&trajectory.to_columns())
            .map_err(|e| SandysError::Config(format!("JSON encode error: {e}")))?;
        println!("{json}");
        return Ok(());
    }

    if args.table {
        print!("{}", report::render_table(&trajectory));
        println!();
    }
    if let Some(summary) = trajectory.summary(sim.evaluator().config()) {
        print!("{}", report::render_summary(&summary));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
