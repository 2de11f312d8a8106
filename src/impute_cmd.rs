//! Impute command: fill missing consumption with the linear baseline.

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use loadcast_io::{read_table, write_table};
use loadcast_model::LinearRegression;
use loadcast_prepare::{Imputer, fit_on_observed};

use crate::cli::ImputeArgs;
use crate::config::LoadcastConfig;
use crate::convert;

/// Fit the baseline on observed cells, fill the missing ones and write the result.
pub fn run(args: ImputeArgs) -> Result<()> {
    let _cmd = info_span!("impute").entered();
    let config = LoadcastConfig::load(args.config.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io);
    let writer_cfg = convert::build_writer_config(&config.io)?;

    let table = read_table(&args.input, &reader_cfg)
        .with_context(|| format!("failed to read table: {}", args.input.display()))?;
    let missing = table.missing_count();
    info!(
        rows = table.n_rows(),
        cols = table.n_cols(),
        missing,
        "table loaded"
    );

    let filled = if missing == 0 {
        warn!("no missing values, writing input unchanged");
        table
    } else {
        let model = fit_on_observed(LinearRegression::new(), &table)
            .context("failed to fit imputation model")?;
        Imputer::new(model)
            .fill(&table)
            .context("imputation failed")?
    };

    write_table(&args.output, &filled, &writer_cfg)
        .with_context(|| format!("failed to write table: {}", args.output.display()))?;
    info!(path = %args.output.display(), filled = missing, "imputed table written");

    Ok(())
}
