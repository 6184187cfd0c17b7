//! The `cogtest validate` command.

use anyhow::Result;

use cogtest_core::config::AssessmentConfig;
use cogtest_core::plan::{generate_test_plan_with, PlanVariant};
use cogtest_core::validate::validate_plan;

pub fn execute(seeds: usize, prefix: String, coding: bool) -> Result<()> {
    let mut total_warnings = 0;

    for variant in [PlanVariant::Sectioned, PlanVariant::Hashed] {
        let config = AssessmentConfig {
            variant,
            includes_coding: coding,
            ..AssessmentConfig::default()
        };
        for n in 0..seeds {
            let seed = format!("{prefix}-{n}");
            let plan = generate_test_plan_with(&seed, &config);
            let warnings = validate_plan(&plan, coding);
            for w in &warnings {
                let location = match (&w.section, &w.item_id) {
                    (_, Some(id)) => format!("[{id}]"),
                    (Some(code), None) => format!("[{code}]"),
                    (None, None) => String::new(),
                };
                println!("  {variant} {seed} {location} WARNING: {}", w.message);
            }
            total_warnings += warnings.len();
        }
        println!("Checked {seeds} {variant} plan(s).");
    }

    if total_warnings == 0 {
        println!("All plans valid.");
        Ok(())
    } else {
        anyhow::bail!("{total_warnings} warning(s) found")
    }
}
