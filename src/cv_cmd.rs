//! Cross-validate command: expanding-window CV of the linear baseline.

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use loadcast_model::{
    FoldScore, LinearRegression, Pipeline, StandardScaler, cross_validate,
};

use crate::cli::CrossValidateArgs;
use crate::config::LoadcastConfig;
use crate::convert;
use crate::prepare_cmd::build_frame;

/// Run CV on the customer's calendar and exogenous features and print
/// the per-fold errors.
pub fn run(args: CrossValidateArgs) -> Result<()> {
    let _cmd = info_span!("cross_validate", id = %args.id).entered();
    let config = LoadcastConfig::load(args.config.as_deref())?;
    let scores = fold_scores(&config, &args)?;

    println!(
        "{:>4}  {:>8}  {:>8}  {:>12}  {:>12}",
        "fold", "train", "test", "train MAE", "eval MAE"
    );
    for s in &scores {
        println!(
            "{:>4}  {:>8}  {:>8}  {:>12.4}  {:>12.4}",
            s.fold, s.train_size, s.test_size, s.train_mae, s.eval_mae
        );
    }
    let mean_eval = scores.iter().map(|s| s.eval_mae).sum::<f64>() / scores.len() as f64;
    println!("mean eval MAE: {mean_eval:.4}");

    Ok(())
}

fn fold_scores(config: &LoadcastConfig, args: &CrossValidateArgs) -> Result<Vec<FoldScore>> {
    let frame = build_frame(config, &args.consumption, &args.features, &args.id)?;
    let features = frame.feature_names();
    let (x, y) = frame
        .training_data(&features)
        .context("failed to assemble training data")?;
    if y.is_empty() {
        bail!("customer '{}' has no complete rows to train on", args.id);
    }
    info!(
        samples = y.len(),
        features = features.len(),
        "training data ready"
    );

    let split = convert::build_split(&config.cv, args.splits);
    let model = Pipeline::new(StandardScaler::new(), LinearRegression::new());
    cross_validate(&model, &x, &y, &split).context("cross-validation failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::fmt::Write as _;

    /// Four months of hourly IT_1 consumption with spv and temp features.
    fn write_inputs(dir: &std::path::Path) -> CrossValidateArgs {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let mut consumption = String::from("timestamp,IT_1,ES_2\n");
        let mut features = String::from("timestamp,spv,temp\n");
        for h in 0..(121 * 24) {
            let ts = (start + Duration::hours(h)).format("%Y-%m-%d %H:%M:%S");
            let hour = (h % 24) as f64;
            let day = (h / 24) as f64;
            let spv = if (7.0..=18.0).contains(&hour) { 12.0 - (hour - 12.5).abs() } else { 0.0 };
            let temp = 5.0 + day * 0.1 + (hour - 12.0).abs() * -0.3;
            let load = 30.0 + hour * 0.8 - spv * 1.2 + temp * 0.5;
            writeln!(consumption, "{ts},{load},{}", load * 2.0).unwrap();
            writeln!(features, "{ts},{spv},{temp}").unwrap();
        }
        let consumption_path = dir.join("consumption.csv");
        let features_path = dir.join("features.csv");
        std::fs::write(&consumption_path, consumption).unwrap();
        std::fs::write(&features_path, features).unwrap();

        CrossValidateArgs {
            config: None,
            consumption: consumption_path,
            features: features_path,
            id: "IT_1".to_string(),
            splits: Some(4),
        }
    }

    #[test]
    fn every_fold_is_finite() {
        let dir = tempfile::tempdir().unwrap();
        let args = write_inputs(dir.path());

        let scores = fold_scores(&LoadcastConfig::default(), &args).unwrap();
        assert_eq!(scores.len(), 4);
        for s in &scores {
            assert!(s.train_mae.is_finite() && s.eval_mae.is_finite());
        }

        run(args).unwrap();
    }

    #[test]
    fn unknown_customer_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = write_inputs(dir.path());
        args.id = "IT_9".to_string();

        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("customer 'IT_9' not found"));
    }
}
