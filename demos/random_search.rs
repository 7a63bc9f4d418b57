//! Random search without a GPU: draw configurations from the bundled space
//! and print the `yolo train` command each one would launch.
//!
//! Run with: `cargo run --example random_search`

use pyro_hparams::prelude::*;

/// Prints commands instead of training.
struct EchoTrainer;

impl Trainer for EchoTrainer {
    fn train(&self, args: &TrainArgs) -> Result<()> {
        println!("yolo {}", args.to_cli_args().join(" "));
        Ok(())
    }
}

fn main() -> Result<()> {
    let space = HyperparameterSpace::from_yaml_file("spaces/default.yaml")?;
    println!(
        "{} hyperparameters, {} distinct configurations",
        space.len(),
        space.cardinality()
    );

    // Replaying the search only needs the base seed.
    let base_seed = 2024;
    let template = TrainArgs::new("data/03_model_input/yolo/small/datasets/data.yaml", "runs", "demo");
    let runs = run_random_search(&EchoTrainer, &space, 3, base_seed, &template)?;

    for run in &runs {
        println!("run {} (seed {:#018x}): {}", run.index, run.seed, run.configuration);
    }
    Ok(())
}
