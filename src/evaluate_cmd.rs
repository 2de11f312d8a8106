//! Evaluate command: score IT and ES forecasts against observed consumption.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use loadcast_evaluate::evaluate;
use loadcast_io::{ConsumptionTable, ReaderConfig, read_table};

use crate::cli::EvaluateArgs;
use crate::config::LoadcastConfig;
use crate::convert;

/// Run the evaluation and print the text report to stdout.
pub fn run(args: EvaluateArgs) -> Result<()> {
    let _cmd = info_span!("evaluate").entered();
    let config = LoadcastConfig::load(args.config.as_deref())?;
    let reader_cfg = convert::build_reader_config(&config.io);
    let eval_cfg = convert::build_evaluate_config(&config.evaluate, args.top_k);

    let pred_it = read(&args.pred_it, &reader_cfg)?;
    let pred_es = read(&args.pred_es, &reader_cfg)?;
    let true_it = read(&args.true_it, &reader_cfg)?;
    let true_es = read(&args.true_es, &reader_cfg)?;

    let evaluation =
        evaluate(&pred_it, &pred_es, &true_it, &true_es, &eval_cfg).context("evaluation failed")?;
    println!("{}", evaluation.report());

    if let Some(path) = args.output {
        let json = evaluation.to_json()?;
        std::fs::write(&path, &json)
            .with_context(|| format!("failed to write scores: {}", path.display()))?;
        info!(path = %path.display(), "scores written");
    }

    Ok(())
}

fn read(path: &Path, config: &ReaderConfig) -> Result<ConsumptionTable> {
    info!(path = %path.display(), "reading table");
    read_table(path, config).with_context(|| format!("failed to read table: {}", path.display()))
}
