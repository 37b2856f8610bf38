//! Core data model types for leiturapro.
//!
//! Three record kinds make up a session: classes, students, and assessments.
//! Students reference a class (or none), assessments reference a student.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generate a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s.trim()).map(Self)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`SchoolClass`].
    ClassId
);
entity_id!(
    /// Identifier of a [`Student`].
    StudentId
);
entity_id!(
    /// Identifier of an [`Assessment`].
    AssessmentId
);

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// A class (turma) of students for one school year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolClass {
    pub id: ClassId,
    /// Display name, e.g. "Turma 2A".
    pub name: String,
    /// Grade label, e.g. "2º Ano".
    pub grade_level: String,
    pub year: i32,
}

/// Form payload for creating a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub grade_level: String,
    pub year: i32,
}

impl NewClass {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_class_fields(&self.name, &self.grade_level, self.year)
    }
}

impl SchoolClass {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_class_fields(&self.name, &self.grade_level, self.year)
    }
}

fn check_class_fields(name: &str, grade_level: &str, year: i32) -> Result<(), ValidationError> {
    require("name", name)?;
    require("grade_level", grade_level)?;
    check_range("year", year as i64, 1, 9999)
}

// ---------------------------------------------------------------------------
// Reading levels
// ---------------------------------------------------------------------------

/// Reading proficiency, in ascending order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum ReadingLevel {
    #[default]
    #[serde(rename = "Iniciante")]
    Beginner,
    #[serde(rename = "Em Desenvolvimento")]
    Developing,
    #[serde(rename = "Intermediário")]
    Intermediate,
    #[serde(rename = "Avançado")]
    Advanced,
    #[serde(rename = "Fluente")]
    Fluent,
}

impl ReadingLevel {
    /// All levels in canonical order.
    pub const ALL: [ReadingLevel; 5] = [
        ReadingLevel::Beginner,
        ReadingLevel::Developing,
        ReadingLevel::Intermediate,
        ReadingLevel::Advanced,
        ReadingLevel::Fluent,
    ];

    /// The pt-BR label shown to teachers.
    pub fn label(&self) -> &'static str {
        match self {
            ReadingLevel::Beginner => "Iniciante",
            ReadingLevel::Developing => "Em Desenvolvimento",
            ReadingLevel::Intermediate => "Intermediário",
            ReadingLevel::Advanced => "Avançado",
            ReadingLevel::Fluent => "Fluente",
        }
    }
}

impl fmt::Display for ReadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReadingLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iniciante" => Ok(ReadingLevel::Beginner),
            "em desenvolvimento" => Ok(ReadingLevel::Developing),
            "intermediário" | "intermediario" => Ok(ReadingLevel::Intermediate),
            "avançado" | "avancado" => Ok(ReadingLevel::Advanced),
            "fluente" => Ok(ReadingLevel::Fluent),
            _ => Err(ValidationError::UnknownReadingLevel(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// A student. `class_id` is `None` when the student is unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub reading_level: ReadingLevel,
    pub avatar_url: String,
}

impl Student {
    /// First word of the name, as used on chart labels.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

/// Form payload for creating a student.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    #[serde(default)]
    pub reading_level: ReadingLevel,
    /// Falls back to a generated placeholder when absent or blank.
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl NewStudent {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

/// Placeholder avatar seeded by the student's id.
pub fn placeholder_avatar(id: &StudentId) -> String {
    format!("https://picsum.photos/seed/{id}/200")
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

/// One recorded literacy/math assessment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    /// Text read, or the unit/topic covered.
    pub text_title: String,
    /// Words read per minute.
    pub wpm: u32,
    /// Reading accuracy percent, 0–100.
    pub accuracy: u8,
    /// Comprehension score, 1–10.
    pub comprehension: u8,
    /// Math score, 1–10.
    pub math_score: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub criteria: AssessmentCriteria,
}

/// Form payload for recording an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub text_title: String,
    pub wpm: u32,
    pub accuracy: u8,
    pub comprehension: u8,
    pub math_score: u8,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub criteria: AssessmentCriteria,
}

impl NewAssessment {
    /// A payload with the entry form's initial values.
    pub fn blank(student_id: StudentId, date: NaiveDate) -> Self {
        Self {
            student_id,
            date,
            text_title: String::new(),
            wpm: 0,
            accuracy: 95,
            comprehension: 5,
            math_score: 5,
            notes: String::new(),
            criteria: AssessmentCriteria::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require("text_title", &self.text_title)?;
        check_range("accuracy", self.accuracy as i64, 0, 100)?;
        check_range("comprehension", self.comprehension as i64, 1, 10)?;
        check_range("math_score", self.math_score as i64, 1, 10)
    }
}

/// Observed sub-skills, grouped into four fixed categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentCriteria {
    pub fluency: FluencyCriteria,
    pub decoding: DecodingCriteria,
    pub comprehension: ComprehensionCriteria,
    pub math: MathCriteria,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FluencyCriteria {
    pub rhythm: bool,
    pub pauses: bool,
    pub intonation: bool,
    pub security: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodingCriteria {
    pub recognition: bool,
    pub no_omissions: bool,
    pub complex_words: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComprehensionCriteria {
    pub main_idea: bool,
    pub explicit: bool,
    pub implicit: bool,
    pub inference: bool,
    pub title_relation: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MathCriteria {
    pub number_sense: bool,
    pub operations: bool,
    pub problem_solving: bool,
    pub logic_reasoning: bool,
    pub geometry: bool,
}

/// Number of checked items per criteria category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaTally {
    pub fluency: u8,
    pub decoding: u8,
    pub comprehension: u8,
    pub math: u8,
}

impl CriteriaTally {
    pub const FLUENCY_ITEMS: u8 = 4;
    pub const DECODING_ITEMS: u8 = 3;
    pub const COMPREHENSION_ITEMS: u8 = 5;
    pub const MATH_ITEMS: u8 = 5;
}

impl AssessmentCriteria {
    pub fn tally(&self) -> CriteriaTally {
        let count = |flags: &[bool]| flags.iter().filter(|&&b| b).count() as u8;
        let f = &self.fluency;
        let d = &self.decoding;
        let c = &self.comprehension;
        let m = &self.math;
        CriteriaTally {
            fluency: count(&[f.rhythm, f.pauses, f.intonation, f.security]),
            decoding: count(&[d.recognition, d.no_omissions, d.complex_words]),
            comprehension: count(&[
                c.main_idea,
                c.explicit,
                c.implicit,
                c.inference,
                c.title_relation,
            ]),
            math: count(&[
                m.number_sense,
                m.operations,
                m.problem_solving,
                m.logic_reasoning,
                m.geometry,
            ]),
        }
    }
}

// ---------------------------------------------------------------------------
// Field checks
// ---------------------------------------------------------------------------

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}
