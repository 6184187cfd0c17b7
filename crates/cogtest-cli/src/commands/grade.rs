//! The `cogtest grade` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cogtest_core::model::{Response, SectionCode};
use cogtest_core::plan::{grade_submission, section_codes};
use cogtest_core::report::GradeReport;

#[allow(clippy::too_many_arguments)]
pub fn execute(
    seed: String,
    section: Option<String>,
    responses_path: PathBuf,
    variant: Option<String>,
    coding: bool,
    format: String,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config, variant, coding)?;

    let content = std::fs::read_to_string(&responses_path)
        .with_context(|| format!("failed to read responses from {}", responses_path.display()))?;
    let responses: Vec<Response> =
        serde_json::from_str(&content).context("failed to parse responses JSON")?;

    let codes: Vec<String> = match section {
        Some(code) => vec![code],
        None => section_codes(config.variant, config.includes_coding)
            .into_iter()
            .map(|c: SectionCode| c.as_str().to_string())
            .collect(),
    };

    let mut scores = Vec::with_capacity(codes.len());
    for code in &codes {
        let score = grade_submission(&seed, code, &responses, &config)
            .with_context(|| format!("failed to grade section '{code}'"))?;
        tracing::debug!(section = %score.code, overall = score.overall, "graded section");
        scores.push(score);
    }

    let report = GradeReport::new(seed, config.variant, scores);

    match format.as_str() {
        "markdown" | "md" => println!("{}", report.to_markdown()),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_summary(&report),
    }

    if let Some(path) = output {
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &GradeReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Section", "Items", "Full credit", "Score"]);

    for s in &report.summary.sections {
        table.add_row(vec![
            Cell::new(&s.label),
            Cell::new(s.items),
            Cell::new(s.full_credit),
            Cell::new(format!("{:.1}%", s.overall * 100.0)),
        ]);
    }

    println!("{table}");
    println!(
        "Mean score: {:.1}% ({} variant)",
        report.summary.mean_overall * 100.0,
        report.variant
    );

    for score in &report.scores {
        let misses: Vec<_> = score
            .items
            .iter()
            .filter(|r| r.correctness < 1.0)
            .collect();
        if misses.is_empty() {
            continue;
        }
        println!("\n{}:", score.code.label());
        for r in misses {
            println!("  {} {:.2} {}", r.item_id, r.correctness, r.feedback);
        }
    }
}
