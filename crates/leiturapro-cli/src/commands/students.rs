//! The `leiturapro students` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use leiturapro_core::store::StudentFilter;

use super::session::{load_store, resolve_class};

pub fn execute(roster: Option<PathBuf>, class: Option<String>, search: Option<String>) -> Result<()> {
    let store = load_store(roster.as_deref())?;

    let class_id = match &class {
        Some(query) => Some(resolve_class(&store, query)?.id),
        None => None,
    };
    let students = store.filter_students(&StudentFilter { class_id, search });

    if students.is_empty() {
        println!("Nenhum aluno encontrado.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Aluno", "Turma", "Nível", "Avaliações", "ID"]);
    for student in students {
        table.add_row(vec![
            Cell::new(&student.name),
            Cell::new(store.class_name_of(student)),
            Cell::new(student.reading_level),
            Cell::new(store.assessments_for(&student.id).len()),
            Cell::new(student.id),
        ]);
    }
    println!("{table}");

    Ok(())
}
