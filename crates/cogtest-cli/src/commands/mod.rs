pub mod grade;
pub mod init;
pub mod plan;
pub mod validate;
pub mod verify;

use std::path::PathBuf;

use anyhow::Result;
use cogtest_core::config::{load_config_from, AssessmentConfig};
use cogtest_core::plan::PlanVariant;

/// Load config, then apply command-line overrides on top.
pub fn resolve_config(
    path: Option<PathBuf>,
    variant: Option<String>,
    coding: bool,
) -> Result<AssessmentConfig> {
    let mut config = load_config_from(path.as_deref())?;
    if let Some(v) = variant {
        config.variant = v.parse::<PlanVariant>().map_err(anyhow::Error::msg)?;
    }
    if coding {
        config.includes_coding = true;
    }
    Ok(config)
}
