//! Plain-text evaluation report.

use loadcast_calendar::Country;

use crate::metrics::ErrorReport;
use crate::scoring::ScoreTable;

/// Report width in characters.
pub const REPORT_WIDTH: usize = 60;

/// Renders the diagnostic report: per group (IT, then ES) its score rows
/// and its `top_k` worst entities, then the rounded total score.
pub fn render_report(
    scores: &ScoreTable,
    it: &ErrorReport,
    es: &ErrorReport,
    top_k: usize,
) -> String {
    let heavy = "=".repeat(REPORT_WIDTH);
    let light = "-".repeat(REPORT_WIDTH);

    let mut lines = vec![
        String::new(),
        heavy.clone(),
        centered("FORECAST EVALUATION REPORT"),
        heavy,
        String::new(),
    ];

    for (i, report) in [it, es].into_iter().enumerate() {
        let group = report.group();
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(format!("{} PERFORMANCE", group.code()));
        lines.push(light.clone());
        lines.push(String::new());
        lines.extend(score_rows(scores, group));
        lines.push(String::new());
        lines.push(format!(
            "Top {top_k} consumers with highest error in {}:",
            group.name()
        ));
        lines.push(String::new());
        lines.extend(ranking_rows(report, top_k));
    }

    lines.push(String::new());
    lines.push(light.clone());
    lines.push(centered("TOTAL FORECAST SCORE"));
    lines.push(centered(&scores.rounded_score().to_string()));
    lines.push(light);
    lines.push(String::new());

    lines.join("\n")
}

fn centered(text: &str) -> String {
    format!("{text:^width$}", width = REPORT_WIDTH)
}

fn score_rows(scores: &ScoreTable, group: Country) -> Vec<String> {
    let mut rows = vec![format!(
        "{:<16}{:>14}{:>12}{:>18}",
        "Metric", "Score", "Weight", "Weighted Score"
    )];
    for entry in scores.group_entries(group) {
        rows.push(format!(
            "{:<16}{:>14.2}{:>12.1}{:>18.2}",
            entry.kind.label(),
            entry.raw,
            entry.weight,
            entry.weighted
        ));
    }
    rows
}

fn ranking_rows(report: &ErrorReport, top_k: usize) -> Vec<String> {
    let top = report.top(top_k);
    let width = top.iter().map(|c| c.entity.len()).max().unwrap_or(0);
    top.iter()
        .map(|c| format!("{:<width$}  {:>12.2}", c.entity, c.error))
        .collect()
}
