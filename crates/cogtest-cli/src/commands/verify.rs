//! The `cogtest verify` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cogtest_core::error::AssessError;
use cogtest_core::hashing::verify;
use cogtest_core::plan::{PlanVariant, TestPlan};

pub fn execute(plan_path: PathBuf, question: String, answer: String, strict: bool) -> Result<()> {
    let content = std::fs::read_to_string(&plan_path)
        .with_context(|| format!("failed to read plan from {}", plan_path.display()))?;
    let plan: TestPlan = serde_json::from_str(&content).context("failed to parse plan JSON")?;

    if plan.variant != PlanVariant::Hashed {
        return Err(AssessError::VariantMismatch {
            expected: PlanVariant::Hashed.to_string(),
            found: plan.variant.to_string(),
        }
        .into());
    }

    let q = plan
        .questions()
        .iter()
        .find(|q| q.id == question)
        .with_context(|| format!("question '{question}' not found in plan"))?;

    let verdict = verify(&answer, &q.key);
    if verdict.correct {
        println!("{}: correct", q.id);
    } else {
        println!("{}: incorrect", q.id);
        if strict {
            std::process::exit(1);
        }
    }

    Ok(())
}
