//! Assessment configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AssessError;
use crate::plan::PlanVariant;

/// Longest session a plan may be stamped with.
pub const MAX_SESSION_MINUTES: u32 = 24 * 60;
/// Most decimal places a numeric key may be rounded to.
pub const MAX_DECIMAL_PLACES: u32 = 12;

/// Top-level cogtest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentConfig {
    /// Session duration used to stamp `expires_at`.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
    /// Plan shape and grading strategy.
    #[serde(default)]
    pub variant: PlanVariant,
    /// Append the code-tracing section.
    #[serde(default)]
    pub includes_coding: bool,
    /// Rounding for numeric keys whose expected value has no decimal point.
    #[serde(default = "default_decimal_places")]
    pub default_decimal_places: u32,
}

fn default_session_minutes() -> u32 {
    45
}
fn default_decimal_places() -> u32 {
    crate::hashing::DEFAULT_DECIMAL_PLACES
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            session_minutes: default_session_minutes(),
            variant: PlanVariant::default(),
            includes_coding: false,
            default_decimal_places: default_decimal_places(),
        }
    }
}

impl AssessmentConfig {
    /// Reject values the engine cannot honour.
    pub fn validate(&self) -> Result<(), AssessError> {
        if self.session_minutes == 0 || self.session_minutes > MAX_SESSION_MINUTES {
            return Err(AssessError::InvalidConfig(format!(
                "session_minutes must be between 1 and {MAX_SESSION_MINUTES}, got {}",
                self.session_minutes
            )));
        }
        if self.default_decimal_places > MAX_DECIMAL_PLACES {
            return Err(AssessError::InvalidConfig(format!(
                "default_decimal_places must be at most {MAX_DECIMAL_PLACES}, got {}",
                self.default_decimal_places
            )));
        }
        Ok(())
    }

    /// Serialize as TOML, e.g. for a starter config file.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize config")
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cogtest.toml` in the current directory
/// 2. `~/.config/cogtest/config.toml`
///
/// Environment variable overrides: `COGTEST_SESSION_MINUTES`, `COGTEST_VARIANT`.
pub fn load_config() -> Result<AssessmentConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AssessmentConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cogtest.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AssessmentConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<AssessmentConfig> {
    toml::from_str::<AssessmentConfig>(content).context("invalid config TOML")
}

/// Apply `COGTEST_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut AssessmentConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(minutes) = lookup("COGTEST_SESSION_MINUTES") {
        config.session_minutes = minutes
            .trim()
            .parse()
            .with_context(|| format!("COGTEST_SESSION_MINUTES is not a number: {minutes}"))?;
    }
    if let Some(variant) = lookup("COGTEST_VARIANT") {
        config.variant = variant.parse().map_err(anyhow::Error::msg)?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cogtest"))
}
