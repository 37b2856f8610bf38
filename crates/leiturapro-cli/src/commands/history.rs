//! The `leiturapro history` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use leiturapro_core::model::CriteriaTally;
use leiturapro_core::statistics::{history_newest_first, student_rollup_for};

use super::session::{format_date, load_store, resolve_student};

pub fn execute(student: String, roster: Option<PathBuf>) -> Result<()> {
    let store = load_store(roster.as_deref())?;
    let student = resolve_student(&store, &student)?;
    let rollup = student_rollup_for(&store, &student.id);

    println!("{}", student.name);
    println!(
        "Turma: {} | Nível: {}",
        store.class_name_of(student),
        student.reading_level
    );
    println!(
        "Avaliações: {} | WPM médio: {} | Matemática média: {:.1}",
        rollup.assessment_count, rollup.mean_wpm, rollup.mean_math
    );

    let history = history_newest_first(&store, &student.id);
    if history.is_empty() {
        println!("\nNenhuma avaliação registrada.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Data",
        "Texto",
        "WPM",
        "Precisão",
        "Leitura",
        "Matemática",
        "Critérios (F/D/C/M)",
        "Observações",
    ]);
    for a in history {
        let tally = a.criteria.tally();
        table.add_row(vec![
            Cell::new(format_date(a.date)),
            Cell::new(&a.text_title),
            Cell::new(a.wpm),
            Cell::new(format!("{}%", a.accuracy)),
            Cell::new(format!("{}/10", a.comprehension)),
            Cell::new(format!("{}/10", a.math_score)),
            Cell::new(format!(
                "{}/{} {}/{} {}/{} {}/{}",
                tally.fluency,
                CriteriaTally::FLUENCY_ITEMS,
                tally.decoding,
                CriteriaTally::DECODING_ITEMS,
                tally.comprehension,
                CriteriaTally::COMPREHENSION_ITEMS,
                tally.math,
                CriteriaTally::MATH_ITEMS,
            )),
            Cell::new(&a.notes),
        ]);
    }
    println!("\n{table}");

    Ok(())
}
