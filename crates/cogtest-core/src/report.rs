//! Grade report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{SectionCode, SectionScore};
use crate::plan::PlanVariant;

/// Correctness at or above this counts as full credit in summaries.
const FULL_CREDIT: f64 = 1.0 - 1e-9;

/// A complete grading report for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Seed the graded sections were regenerated from.
    pub seed: String,
    /// Plan shape the responses were graded under.
    pub variant: PlanVariant,
    /// Per-section scores, in grading order.
    pub scores: Vec<SectionScore>,
    /// Aggregate across sections.
    pub summary: PlanSummary,
}

/// Aggregate across graded sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub sections: Vec<SectionSummary>,
    /// Unweighted mean of section `overall` values.
    pub mean_overall: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSummary {
    pub code: SectionCode,
    pub label: String,
    pub overall: f64,
    pub items: usize,
    /// Items with full credit.
    pub full_credit: usize,
}

impl PlanSummary {
    pub fn from_scores(scores: &[SectionScore]) -> Self {
        let sections: Vec<SectionSummary> = scores
            .iter()
            .map(|s| SectionSummary {
                code: s.code,
                label: s.code.label().to_string(),
                overall: s.overall,
                items: s.items.len(),
                full_credit: s
                    .items
                    .iter()
                    .filter(|r| r.correctness >= FULL_CREDIT)
                    .count(),
            })
            .collect();
        let mean_overall = if sections.is_empty() {
            0.0
        } else {
            sections.iter().map(|s| s.overall).sum::<f64>() / sections.len() as f64
        };
        Self {
            sections,
            mean_overall,
        }
    }
}

impl GradeReport {
    pub fn new(seed: impl Into<String>, variant: PlanVariant, scores: Vec<SectionScore>) -> Self {
        let summary = PlanSummary::from_scores(&scores);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            seed: seed.into(),
            variant,
            scores,
            summary,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: GradeReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Report:** {} ({} variant)\n\n**Mean score:** {:.1}%\n\n",
            self.id,
            self.variant,
            self.summary.mean_overall * 100.0
        ));

        md.push_str("| Section | Items | Full credit | Score |\n");
        md.push_str("|---------|-------|-------------|-------|\n");
        for s in &self.summary.sections {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% |\n",
                s.label,
                s.items,
                s.full_credit,
                s.overall * 100.0
            ));
        }

        for score in &self.scores {
            md.push_str(&format!("\n### {}\n\n", score.code.label()));
            md.push_str("| Item | Score | Feedback |\n");
            md.push_str("|------|-------|----------|\n");
            for item in &score.items {
                md.push_str(&format!(
                    "| {} | {:.2} | {} |\n",
                    item.item_id,
                    item.correctness,
                    item.feedback.replace('|', "\\|")
                ));
            }
        }

        md
    }
}
