//! The `leiturapro init` command.

use std::path::Path;

use anyhow::Result;

use leiturapro_core::sample::SAMPLE_ROSTER;

pub fn execute() -> Result<()> {
    write_if_missing("leiturapro.toml", SAMPLE_CONFIG)?;
    write_if_missing("roster.toml", SAMPLE_ROSTER)?;

    println!("\nNext steps:");
    println!("  1. Export GEMINI_API_KEY or edit leiturapro.toml");
    println!("  2. Run: leiturapro validate --roster roster.toml");
    println!("  3. Run: leiturapro dashboard --roster roster.toml");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# leiturapro configuration

[gemini]
api_key = "${GEMINI_API_KEY}"
model = "gemini-3-flash-preview"
timeout_secs = 60
"#;
