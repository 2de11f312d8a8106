//! Prepare command: write the feature frame of one customer.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use loadcast_calendar::Country;
use loadcast_io::write_table;
use loadcast_prepare::{CustomerFrame, Preprocessor};

use crate::cli::PrepareArgs;
use crate::config::LoadcastConfig;
use crate::convert;

/// Joins consumption with features and builds the frame of `id`.
///
/// Shared with the cross-validation command.
pub fn build_frame(
    config: &LoadcastConfig,
    consumption: &std::path::Path,
    features: &std::path::Path,
    id: &str,
) -> Result<CustomerFrame> {
    let reader_cfg = convert::build_reader_config(&config.io);
    let preprocessor = Preprocessor::load(consumption, features, &reader_cfg)
        .context("failed to load consumption and features")?
        .with_config(convert::build_prepare_config(&config.prepare));

    let country = Country::from_entity_id(id)?;
    let holidays = convert::build_holidays(&config.holidays, country)?;
    let frame = preprocessor
        .customer_frame(id, &holidays)
        .with_context(|| format!("failed to build frame for '{id}'"))?;
    info!(
        id,
        country = %frame.country(),
        rows = frame.table().n_rows(),
        holidays = holidays.len(),
        "customer frame ready"
    );
    Ok(frame)
}

/// Run the preparation and write the frame to the output path.
pub fn run(args: PrepareArgs) -> Result<()> {
    let _cmd = info_span!("prepare", id = %args.id).entered();
    let config = LoadcastConfig::load(args.config.as_deref())?;

    let frame = build_frame(&config, &args.consumption, &args.features, &args.id)?;

    let writer_cfg = convert::build_writer_config(&config.io)?;
    write_table(&args.output, frame.table(), &writer_cfg)
        .with_context(|| format!("failed to write frame: {}", args.output.display()))?;
    info!(path = %args.output.display(), "frame written");

    Ok(())
}
