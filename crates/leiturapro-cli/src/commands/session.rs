//! Helpers shared by the commands: loading a session and resolving records
//! named on the command line.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use leiturapro_core::model::{ClassId, SchoolClass, Student, StudentId};
use leiturapro_core::roster::parse_roster;
use leiturapro_core::sample::sample_store;
use leiturapro_core::store::EntityStore;

/// Load the roster at `path`, or the built-in sample when none is given.
pub fn load_store(path: Option<&Path>) -> Result<EntityStore> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading roster");
            let roster = parse_roster(path)?;
            roster
                .into_store()
                .with_context(|| format!("failed to load roster: {}", path.display()))
        }
        None => sample_store().context("failed to load sample roster"),
    }
}

/// Find a student by id, exact name, or unique name fragment.
pub fn resolve_student<'a>(store: &'a EntityStore, query: &str) -> Result<&'a Student> {
    if let Ok(uuid) = Uuid::parse_str(query.trim()) {
        let id = StudentId::from(uuid);
        return store
            .find_student(&id)
            .with_context(|| format!("no student with id {id}"));
    }

    let names: Vec<(&str, &Student)> = store
        .students()
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect();
    resolve_by_name("student", &names, query)
}

/// Find a class by id, exact name, or unique name fragment.
pub fn resolve_class<'a>(store: &'a EntityStore, query: &str) -> Result<&'a SchoolClass> {
    if let Ok(uuid) = Uuid::parse_str(query.trim()) {
        let id = ClassId::from(uuid);
        return store
            .find_class(&id)
            .with_context(|| format!("no class with id {id}"));
    }

    let names: Vec<(&str, &SchoolClass)> = store
        .classes()
        .iter()
        .map(|c| (c.name.as_str(), c))
        .collect();
    resolve_by_name("class", &names, query)
}

fn resolve_by_name<'a, T>(kind: &str, candidates: &[(&str, &'a T)], query: &str) -> Result<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        anyhow::bail!("{kind} name is empty");
    }

    if let Some((_, item)) = candidates
        .iter()
        .find(|(name, _)| name.to_lowercase() == needle)
    {
        return Ok(*item);
    }

    let partial: Vec<&(&str, &'a T)> = candidates
        .iter()
        .filter(|(name, _)| name.to_lowercase().contains(&needle))
        .collect();
    match partial.as_slice() {
        [(_, item)] => Ok(*item),
        [] => anyhow::bail!("no {kind} matches {query:?}"),
        many => {
            let names: Vec<&str> = many.iter().map(|(name, _)| *name).collect();
            anyhow::bail!("{kind} {query:?} is ambiguous: {}", names.join(", "))
        }
    }
}

/// `dd/mm/yyyy`, as shown on the history view.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}
