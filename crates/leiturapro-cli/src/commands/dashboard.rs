//! The `leiturapro dashboard` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use leiturapro_core::statistics::{dashboard_summary, DashboardSummary};

use super::session::load_store;

pub fn execute(roster: Option<PathBuf>, format: String) -> Result<()> {
    let store = load_store(roster.as_deref())?;
    let summary = dashboard_summary(&store);

    match format.as_str() {
        "text" => print_summary(&summary),
        "json" => println!("{}", serde_json::to_string_pretty(&summary)?),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}

fn print_summary(summary: &DashboardSummary) {
    let mut totals = Table::new();
    totals.set_header(vec![
        "Alunos",
        "Avaliações",
        "Turmas",
        "Precisão média",
        "WPM médio",
    ]);
    totals.add_row(vec![
        Cell::new(summary.total_students),
        Cell::new(summary.total_assessments),
        Cell::new(summary.total_classes),
        Cell::new(format!("{}%", summary.average_accuracy_pct)),
        Cell::new(format!("{:.0}", summary.average_wpm)),
    ]);
    println!("{totals}");

    let mut levels = Table::new();
    levels.set_header(vec!["Nível de leitura", "Alunos"]);
    for entry in &summary.levels {
        levels.add_row(vec![Cell::new(entry.level), Cell::new(entry.count)]);
    }
    println!("\n{levels}");

    if summary.trend.is_empty() {
        println!("\nNenhuma avaliação registrada.");
        return;
    }

    let mut trend = Table::new();
    trend.set_header(vec!["Data", "Aluno", "WPM"]);
    for point in &summary.trend {
        trend.add_row(vec![
            Cell::new(&point.label),
            Cell::new(&point.student),
            Cell::new(point.wpm),
        ]);
    }
    println!("\nEvolução de fluência (últimas avaliações)\n{trend}");
}
