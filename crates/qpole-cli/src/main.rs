// qpole trainer
// Learns to balance the cart-pole with a tabular Q-learning agent

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use qpole_cli::cli::{Cli, Commands, TrainArgs};
use qpole_cli::{train, write_report, TrainerConfig, TrainingOutcome};

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => run_training(args).await?,
    }

    Ok(())
}

async fn run_training(args: TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => TrainerConfig::load(path).await?,
        None => TrainerConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let report = tokio::task::spawn_blocking(move || train(&config))
        .await
        .context("training task panicked")?
        .context("training failed")?;

    match report.outcome {
        TrainingOutcome::Balanced { trial, steps } => {
            println!("Pole balanced successfully for at least {steps} steps in trial {trial}.");
        }
        TrainingOutcome::NotBalanced {
            failures,
            best_steps,
            best_trial,
        } => {
            println!("Pole not balanced. Stopping after {failures} failures.");
            println!("High water mark: {best_steps} steps in trial {best_trial}.");
        }
    }

    if let Some(path) = &args.report {
        write_report(path, &report)
            .await
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("Trial report written to {}", path.display());
    }

    Ok(())
}
