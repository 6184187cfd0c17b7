//! The `cogtest plan` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use cogtest_core::plan::generate_test_plan_with;

pub fn execute(
    seed: String,
    variant: Option<String>,
    coding: bool,
    public: bool,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = super::resolve_config(config, variant, coding)?;
    let plan = generate_test_plan_with(&seed, &config);

    let json = if public {
        serde_json::to_string_pretty(&plan.public_view())?
    } else {
        serde_json::to_string_pretty(&plan)?
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write plan to {}", path.display()))?;
            eprintln!(
                "{} plan with {} section(s) saved to: {}",
                plan.variant,
                plan.section_codes().len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
