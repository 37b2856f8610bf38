//! In-memory entity store for classes, students, and assessments.
//!
//! Collections keep insertion order. Every mutation validates its input
//! first, so a rejected form never leaves a partial change behind.

use serde::Serialize;
use tracing::debug;

use crate::error::StoreError;
use crate::model::{
    placeholder_avatar, Assessment, AssessmentId, ClassId, NewAssessment, NewClass, NewStudent,
    SchoolClass, Student, StudentId,
};

/// Label used wherever a student has no class.
pub const UNASSIGNED_CLASS_LABEL: &str = "Sem turma";

/// Filter applied by the student list.
#[derive(Debug, Clone, Default)]
pub struct StudentFilter {
    /// Only students of this class.
    pub class_id: Option<ClassId>,
    /// Case-insensitive substring of the student name.
    pub search: Option<String>,
}

/// The session's classroom records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EntityStore {
    classes: Vec<SchoolClass>,
    students: Vec<Student>,
    assessments: Vec<Assessment>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }

    pub fn find_class(&self, id: &ClassId) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| &c.id == id)
    }

    pub fn find_student(&self, id: &StudentId) -> Option<&Student> {
        self.students.iter().find(|s| &s.id == id)
    }

    pub fn find_assessment(&self, id: &AssessmentId) -> Option<&Assessment> {
        self.assessments.iter().find(|a| &a.id == id)
    }

    // -----------------------------------------------------------------------
    // Classes
    // -----------------------------------------------------------------------

    pub fn create_class(&mut self, form: NewClass) -> Result<SchoolClass, StoreError> {
        form.validate()?;
        let class = SchoolClass {
            id: ClassId::new(),
            name: form.name.trim().to_string(),
            grade_level: form.grade_level.trim().to_string(),
            year: form.year,
        };
        debug!(id = %class.id, "created class");
        self.classes.push(class.clone());
        Ok(class)
    }

    /// Replace the class with the same id.
    pub fn update_class(&mut self, mut class: SchoolClass) -> Result<(), StoreError> {
        class.validate()?;
        class.name = class.name.trim().to_string();
        class.grade_level = class.grade_level.trim().to_string();
        let slot = self
            .classes
            .iter_mut()
            .find(|c| c.id == class.id)
            .ok_or_else(|| not_found("class", &class.id))?;
        debug!(id = %class.id, "updated class");
        *slot = class;
        Ok(())
    }

    /// Remove a class and unassign its students.
    ///
    /// Returns the number of students that were unassigned.
    pub fn delete_class(&mut self, id: &ClassId) -> Result<usize, StoreError> {
        let before = self.classes.len();
        self.classes.retain(|c| &c.id != id);
        if self.classes.len() == before {
            return Err(not_found("class", id));
        }

        let mut unassigned = 0;
        for student in self.students.iter_mut() {
            if student.class_id.as_ref() == Some(id) {
                student.class_id = None;
                unassigned += 1;
            }
        }
        debug!(%id, unassigned, "deleted class");
        Ok(unassigned)
    }

    // -----------------------------------------------------------------------
    // Students
    // -----------------------------------------------------------------------

    pub fn create_student(&mut self, form: NewStudent) -> Result<Student, StoreError> {
        form.validate()?;
        self.check_class_ref(form.class_id.as_ref())?;

        let id = StudentId::new();
        let avatar_url = form
            .avatar_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| placeholder_avatar(&id));
        let student = Student {
            id,
            name: form.name.trim().to_string(),
            class_id: form.class_id,
            reading_level: form.reading_level,
            avatar_url,
        };
        debug!(id = %student.id, "created student");
        self.students.push(student.clone());
        Ok(student)
    }

    /// Replace the student with the same id.
    pub fn update_student(&mut self, mut student: Student) -> Result<(), StoreError> {
        student.validate()?;
        student.name = student.name.trim().to_string();
        self.check_class_ref(student.class_id.as_ref())?;
        let slot = self
            .students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or_else(|| not_found("student", &student.id))?;
        debug!(id = %student.id, "updated student");
        *slot = student;
        Ok(())
    }

    /// Remove a student together with all of their assessments.
    ///
    /// Returns the number of assessments removed.
    pub fn delete_student(&mut self, id: &StudentId) -> Result<usize, StoreError> {
        let before = self.students.len();
        self.students.retain(|s| &s.id != id);
        if self.students.len() == before {
            return Err(not_found("student", id));
        }

        let before = self.assessments.len();
        self.assessments.retain(|a| &a.student_id != id);
        let removed = before - self.assessments.len();
        debug!(%id, removed, "deleted student");
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Assessments
    // -----------------------------------------------------------------------

    pub fn create_assessment(&mut self, form: NewAssessment) -> Result<Assessment, StoreError> {
        form.validate()?;
        if self.find_student(&form.student_id).is_none() {
            return Err(StoreError::UnknownStudent(form.student_id.to_string()));
        }

        let assessment = Assessment {
            id: AssessmentId::new(),
            student_id: form.student_id,
            date: form.date,
            text_title: form.text_title.trim().to_string(),
            wpm: form.wpm,
            accuracy: form.accuracy,
            comprehension: form.comprehension,
            math_score: form.math_score,
            notes: form.notes,
            criteria: form.criteria,
        };
        debug!(id = %assessment.id, student = %assessment.student_id, "created assessment");
        self.assessments.push(assessment.clone());
        Ok(assessment)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn students_in_class(&self, class_id: &ClassId) -> Vec<&Student> {
        self.students
            .iter()
            .filter(|s| s.class_id.as_ref() == Some(class_id))
            .collect()
    }

    pub fn class_student_count(&self, class_id: &ClassId) -> usize {
        self.students_in_class(class_id).len()
    }

    /// A student's assessments in insertion order.
    pub fn assessments_for(&self, student_id: &StudentId) -> Vec<&Assessment> {
        self.assessments
            .iter()
            .filter(|a| &a.student_id == student_id)
            .collect()
    }

    pub fn filter_students(&self, filter: &StudentFilter) -> Vec<&Student> {
        let needle = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();

        self.students
            .iter()
            .filter(|s| match &filter.class_id {
                Some(class_id) => s.class_id.as_ref() == Some(class_id),
                None => true,
            })
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// The class of a student, if assigned and still present.
    pub fn class_of(&self, student: &Student) -> Option<&SchoolClass> {
        student.class_id.as_ref().and_then(|id| self.find_class(id))
    }

    pub fn class_name_of(&self, student: &Student) -> &str {
        self.class_of(student)
            .map(|c| c.name.as_str())
            .unwrap_or(UNASSIGNED_CLASS_LABEL)
    }

    fn check_class_ref(&self, class_id: Option<&ClassId>) -> Result<(), StoreError> {
        match class_id {
            Some(id) if self.find_class(id).is_none() => {
                Err(StoreError::UnknownClass(id.to_string()))
            }
            _ => Ok(()),
        }
    }
}

fn not_found(kind: &'static str, id: &impl ToString) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}
