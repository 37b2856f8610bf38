//! The `leiturapro classes` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::session::load_store;

pub fn execute(roster: Option<PathBuf>) -> Result<()> {
    let store = load_store(roster.as_deref())?;

    if store.classes().is_empty() {
        println!("Nenhuma turma cadastrada.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Turma", "Série", "Ano", "Alunos", "ID"]);
    for class in store.classes() {
        table.add_row(vec![
            Cell::new(&class.name),
            Cell::new(&class.grade_level),
            Cell::new(class.year),
            Cell::new(store.class_student_count(&class.id)),
            Cell::new(class.id),
        ]);
    }
    println!("{table}");

    Ok(())
}
