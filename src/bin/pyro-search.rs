//! Random hyperparameter search for YOLO wildfire-smoke detectors.
//!
//! Reads a hyperparameter space from YAML, draws `--n` configurations from a
//! seed and launches one `yolo train` run per configuration.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use pyro_hparams::prelude::*;
use tracing_subscriber::EnvFilter;

/// Run a seeded random hyperparameter search over YOLO training runs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The data.yaml config file of the dataset
    #[arg(long, default_value = "./data/03_model_input/yolo/small/datasets/data.yaml")]
    data: PathBuf,

    /// Directory the training runs are written to
    #[arg(long, default_value = "./data/04_models/yolo/")]
    output_dir: PathBuf,

    /// Prefix of every run name
    #[arg(long, default_value = "random_hyperparameter_search")]
    experiment_name: String,

    /// Hyperparameter space definition
    #[arg(long, default_value = "./spaces/default.yaml")]
    filepath_space_yaml: PathBuf,

    /// Number of random configurations to run
    #[arg(long, default_value_t = 10)]
    n: usize,

    /// Base seed of the search; defaults to the current UNIX time
    #[arg(long, env = "PYRO_SEARCH_SEED")]
    seed: Option<u64>,

    /// The ultralytics `yolo` executable
    #[arg(long, env = "PYRO_SEARCH_YOLO_BIN", default_value = "yolo")]
    yolo_bin: PathBuf,

    /// Print the drawn configurations as JSON lines instead of training
    #[arg(long)]
    dry_run: bool,

    /// Log level filter, e.g. `debug` or `pyro_hparams=debug,warn`
    #[arg(short = 'l', long = "loglevel", default_value = "warn")]
    loglevel: String,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(DEFAULT_SEED, |d| d.as_secs())
}

fn run(args: &Args) -> Result<()> {
    let space = HyperparameterSpace::from_yaml_file(&args.filepath_space_yaml)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    tracing::info!(
        seed,
        n = args.n,
        space = %args.filepath_space_yaml.display(),
        "random search initialized"
    );

    if args.dry_run {
        for (index, (seed, configuration)) in Configurations::new(&space, seed).take(args.n).enumerate() {
            let line = serde_json::json!({
                "index": index,
                "seed": seed,
                "configuration": configuration,
            });
            println!("{line}");
        }
        return Ok(());
    }

    let template = TrainArgs::new(&args.data, &args.output_dir, &args.experiment_name);
    let runs = run_random_search(&YoloCli::new(&args.yolo_bin), &space, args.n, seed, &template)?;
    tracing::info!(runs = runs.len(), seed, "random search finished");
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.loglevel)),
        )
        .init();

    if !args.dry_run && !args.data.exists() {
        tracing::error!(data = %args.data.display(), "--data does not exist");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "random search failed");
            ExitCode::FAILURE
        }
    }
}
