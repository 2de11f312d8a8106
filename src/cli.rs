use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Loadcast consumption forecast preparation and scoring.
#[derive(Parser)]
#[command(
    name = "loadcast",
    version,
    about = "Consumption forecast preparation and weighted portfolio scoring"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Score IT and ES forecasts against observed consumption.
    Evaluate(EvaluateArgs),
    /// Build the feature frame of one customer.
    Prepare(PrepareArgs),
    /// Fill missing consumption values with the linear baseline.
    Impute(ImputeArgs),
    /// Time-series cross-validation of the linear baseline for one customer.
    CrossValidate(CrossValidateArgs),
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Predicted consumption of the IT entities.
    #[arg(long = "pred-it")]
    pub pred_it: PathBuf,

    /// Predicted consumption of the ES entities.
    #[arg(long = "pred-es")]
    pub pred_es: PathBuf,

    /// Observed consumption of the IT entities.
    #[arg(long = "true-it")]
    pub true_it: PathBuf,

    /// Observed consumption of the ES entities.
    #[arg(long = "true-es")]
    pub true_es: PathBuf,

    /// Override the number of worst entities listed per group.
    #[arg(short = 'k', long = "top-k")]
    pub top_k: Option<usize>,

    /// Path for the JSON score output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `prepare` subcommand.
#[derive(clap::Args)]
pub struct PrepareArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wide consumption table, one column per customer.
    #[arg(long)]
    pub consumption: PathBuf,

    /// Exogenous feature table (solar production, temperature).
    #[arg(long)]
    pub features: PathBuf,

    /// Customer identifier, e.g. `IT_1023`.
    #[arg(long)]
    pub id: String,

    /// Output table path (`.csv` or `.parquet`).
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `impute` subcommand.
#[derive(clap::Args)]
pub struct ImputeArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wide consumption table with missing values.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output table path (`.csv` or `.parquet`).
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `cross-validate` subcommand.
#[derive(clap::Args)]
pub struct CrossValidateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wide consumption table, one column per customer.
    #[arg(long)]
    pub consumption: PathBuf,

    /// Exogenous feature table (solar production, temperature).
    #[arg(long)]
    pub features: PathBuf,

    /// Customer identifier, e.g. `IT_1023`.
    #[arg(long)]
    pub id: String,

    /// Override the number of folds from config.
    #[arg(short, long)]
    pub splits: Option<usize>,
}
