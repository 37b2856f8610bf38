//! The `leiturapro validate` command.

use std::path::PathBuf;

use anyhow::Result;

use leiturapro_core::roster::{parse_roster, validate_roster};

pub fn execute(roster_path: PathBuf) -> Result<()> {
    let roster = parse_roster(&roster_path)?;

    println!(
        "Roster: {} ({} classes, {} students, {} assessments)",
        roster_path.display(),
        roster.classes.len(),
        roster.students.len(),
        roster.assessments.len()
    );

    let warnings = validate_roster(&roster);
    for w in &warnings {
        let prefix = w
            .key
            .as_ref()
            .map(|key| format!("  [{key}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Roster valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
