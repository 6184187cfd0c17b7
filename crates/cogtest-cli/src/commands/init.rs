//! The `cogtest init` command.

use anyhow::Result;

use cogtest_core::config::AssessmentConfig;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("cogtest.toml");
    if path.exists() {
        println!("cogtest.toml already exists, skipping.");
        return Ok(());
    }

    let body = AssessmentConfig::default().to_toml()?;
    std::fs::write(path, format!("{HEADER}{body}"))?;
    println!("Created cogtest.toml");

    println!("\nNext steps:");
    println!("  1. Edit cogtest.toml (variant = \"sectioned\" or \"hashed\")");
    println!("  2. Run: cogtest plan --seed my-session");
    println!("  3. Run: cogtest grade --seed my-session --responses responses.json");

    Ok(())
}

const HEADER: &str = "# cogtest configuration\n\
# Environment overrides: COGTEST_SESSION_MINUTES, COGTEST_VARIANT\n\n";
