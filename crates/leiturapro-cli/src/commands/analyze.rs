//! The `leiturapro analyze` command.

use std::path::PathBuf;

use anyhow::Result;

use leiturapro_core::advisor::PedagogyAdvisor;
use leiturapro_core::classroom::Classroom;
use leiturapro_core::traits::GroundingSource;
use leiturapro_providers::config::load_config_from;
use leiturapro_providers::create_model;

use super::session::{load_store, resolve_student};

pub async fn execute(
    student: String,
    roster: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let store = load_store(roster.as_deref())?;
    let student_id = resolve_student(&store, &student)?.id;

    let config = load_config_from(config_path.as_deref())?;
    let model = create_model(&config.gemini)?;
    let advisor = PedagogyAdvisor::new(model);

    let mut classroom = Classroom::with_store(store);
    let analysis = classroom.request_analysis(&advisor, &student_id).await?;

    if let Some(student) = classroom.store().find_student(&student_id) {
        println!("Análise pedagógica: {}\n", student.name);
    }
    println!("{}", analysis.text);
    print_sources(&analysis.sources);

    Ok(())
}

pub(crate) fn print_sources(sources: &[GroundingSource]) {
    if sources.is_empty() {
        return;
    }
    println!("\nFontes:");
    for source in sources {
        println!("  - {} <{}>", source.display_title(), source.uri);
    }
}
