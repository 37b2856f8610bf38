//! TOML roster fixture parser.
//!
//! A roster seeds a session with classes, students, and assessments. Keys are
//! local to the file; loading maps each key to a freshly generated id.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::StoreError;
use crate::model::{
    AssessmentCriteria, ClassId, NewAssessment, NewClass, NewStudent, ReadingLevel, StudentId,
};
use crate::store::EntityStore;

/// Intermediate TOML structure for roster files.
#[derive(Debug, Deserialize)]
struct TomlRoster {
    #[serde(default)]
    classes: Vec<TomlClass>,
    #[serde(default)]
    students: Vec<TomlStudent>,
    #[serde(default)]
    assessments: Vec<TomlAssessment>,
}

#[derive(Debug, Deserialize)]
struct TomlClass {
    key: String,
    name: String,
    grade_level: String,
    year: i32,
}

#[derive(Debug, Deserialize)]
struct TomlStudent {
    key: String,
    name: String,
    #[serde(default)]
    class: Option<String>,
    #[serde(default)]
    reading_level: Option<String>,
    #[serde(default)]
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessment {
    student: String,
    date: String,
    text_title: String,
    wpm: u32,
    accuracy: u8,
    comprehension: u8,
    math_score: u8,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    criteria: AssessmentCriteria,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterClass {
    pub key: String,
    pub name: String,
    pub grade_level: String,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStudent {
    pub key: String,
    pub name: String,
    /// Key of the student's class, if any.
    pub class: Option<String>,
    pub reading_level: ReadingLevel,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterAssessment {
    /// Key of the assessed student.
    pub student: String,
    pub date: NaiveDate,
    pub text_title: String,
    pub wpm: u32,
    pub accuracy: u8,
    pub comprehension: u8,
    pub math_score: u8,
    pub notes: String,
    pub criteria: AssessmentCriteria,
}

/// A parsed roster fixture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub classes: Vec<RosterClass>,
    pub students: Vec<RosterStudent>,
    pub assessments: Vec<RosterAssessment>,
}

/// Parse a roster file.
pub fn parse_roster(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path.display()))?;

    parse_roster_str(&content, path)
}

/// Parse roster TOML from a string. `source_path` is only used in messages.
pub fn parse_roster_str(content: &str, source_path: &Path) -> Result<Roster> {
    let parsed: TomlRoster = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let classes = parsed
        .classes
        .into_iter()
        .map(|c| RosterClass {
            key: c.key,
            name: c.name,
            grade_level: c.grade_level,
            year: c.year,
        })
        .collect();

    let students = parsed
        .students
        .into_iter()
        .map(|s| {
            let reading_level = match s.reading_level {
                Some(label) => label
                    .parse()
                    .with_context(|| format!("student {}: invalid reading_level", s.key))?,
                None => ReadingLevel::default(),
            };
            Ok(RosterStudent {
                key: s.key,
                name: s.name,
                class: s.class.filter(|c| !c.trim().is_empty()),
                reading_level,
                avatar_url: s.avatar_url,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let assessments = parsed
        .assessments
        .into_iter()
        .map(|a| {
            let date = NaiveDate::parse_from_str(a.date.trim(), "%Y-%m-%d").with_context(|| {
                format!(
                    "assessment for {}: invalid date {:?} (expected YYYY-MM-DD)",
                    a.student, a.date
                )
            })?;
            Ok(RosterAssessment {
                student: a.student,
                date,
                text_title: a.text_title,
                wpm: a.wpm,
                accuracy: a.accuracy,
                comprehension: a.comprehension,
                math_score: a.math_score,
                notes: a.notes,
                criteria: a.criteria,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Roster {
        classes,
        students,
        assessments,
    })
}

impl Roster {
    /// Load the roster into a fresh store.
    ///
    /// Records go through the store's create operations, so every form rule
    /// applies. A duplicate key or a reference to an unknown key fails the
    /// whole load.
    pub fn into_store(self) -> Result<EntityStore, StoreError> {
        let mut store = EntityStore::new();
        let mut class_ids: HashMap<String, ClassId> = HashMap::new();
        let mut student_ids: HashMap<String, StudentId> = HashMap::new();

        for class in self.classes {
            let created = store.create_class(NewClass {
                name: class.name,
                grade_level: class.grade_level,
                year: class.year,
            })?;
            if class_ids.insert(class.key.clone(), created.id).is_some() {
                return Err(StoreError::DuplicateKey {
                    kind: "class",
                    key: class.key,
                });
            }
        }

        for student in self.students {
            let class_id = match &student.class {
                Some(key) => Some(
                    *class_ids
                        .get(key)
                        .ok_or_else(|| StoreError::UnknownClass(key.clone()))?,
                ),
                None => None,
            };
            let created = store.create_student(NewStudent {
                name: student.name,
                class_id,
                reading_level: student.reading_level,
                avatar_url: student.avatar_url,
            })?;
            if student_ids.insert(student.key.clone(), created.id).is_some() {
                return Err(StoreError::DuplicateKey {
                    kind: "student",
                    key: student.key,
                });
            }
        }

        for a in self.assessments {
            let student_id = *student_ids
                .get(&a.student)
                .ok_or_else(|| StoreError::UnknownStudent(a.student.clone()))?;
            store.create_assessment(NewAssessment {
                student_id,
                date: a.date,
                text_title: a.text_title,
                wpm: a.wpm,
                accuracy: a.accuracy,
                comprehension: a.comprehension,
                math_score: a.math_score,
                notes: a.notes,
                criteria: a.criteria,
            })?;
        }

        tracing::debug!(
            classes = store.classes().len(),
            students = store.students().len(),
            assessments = store.assessments().len(),
            "roster loaded"
        );
        Ok(store)
    }
}

/// A warning from roster validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Key of the record the warning is about (if applicable).
    pub key: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a roster for common issues.
pub fn validate_roster(roster: &Roster) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut class_keys = HashSet::new();
    for class in &roster.classes {
        if !class_keys.insert(class.key.as_str()) {
            warnings.push(ValidationWarning {
                key: Some(class.key.clone()),
                message: format!("duplicate class key: {}", class.key),
            });
        }
        if class.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                key: Some(class.key.clone()),
                message: "class name is empty".into(),
            });
        }
    }

    let mut student_keys = HashSet::new();
    for student in &roster.students {
        if !student_keys.insert(student.key.as_str()) {
            warnings.push(ValidationWarning {
                key: Some(student.key.clone()),
                message: format!("duplicate student key: {}", student.key),
            });
        }
        if student.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                key: Some(student.key.clone()),
                message: "student name is empty".into(),
            });
        }
        match &student.class {
            Some(class) if !class_keys.contains(class.as_str()) => {
                warnings.push(ValidationWarning {
                    key: Some(student.key.clone()),
                    message: format!("unknown class: {class}"),
                });
            }
            Some(_) => {}
            None => warnings.push(ValidationWarning {
                key: Some(student.key.clone()),
                message: "student is not assigned to a class".into(),
            }),
        }
    }

    for a in &roster.assessments {
        if !student_keys.contains(a.student.as_str()) {
            warnings.push(ValidationWarning {
                key: Some(a.student.clone()),
                message: format!("assessment on {} references unknown student", a.date),
            });
        }
        let form = NewAssessment {
            student_id: StudentId::new(),
            date: a.date,
            text_title: a.text_title.clone(),
            wpm: a.wpm,
            accuracy: a.accuracy,
            comprehension: a.comprehension,
            math_score: a.math_score,
            notes: a.notes.clone(),
            criteria: a.criteria,
        };
        if let Err(e) = form.validate() {
            warnings.push(ValidationWarning {
                key: Some(a.student.clone()),
                message: format!("assessment on {}: {e}", a.date),
            });
        }
    }

    warnings
}
