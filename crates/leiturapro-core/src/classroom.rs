//! Session controller.
//!
//! `Classroom` owns the entity store, the router, and the two report slots.
//! It is the only mutation surface; everything else reads snapshots.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::advisor::{PedagogyAdvisor, ReadingPassage, StudentAnalysis, StudentProfile};
use crate::error::{AdvisorError, StoreError};
use crate::model::{
    Assessment, ClassId, NewAssessment, NewClass, NewStudent, SchoolClass, Student, StudentId,
};
use crate::report::{ReportSlot, Ticket};
use crate::router::{Router, Screen, View};
use crate::store::EntityStore;

/// Message shown when passage generation fails.
pub const PASSAGE_RETRY_MESSAGE: &str =
    "Erro ao gerar material. Tente novamente ou verifique as configurações.";

/// An analysis together with the student it is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectAnalysis {
    pub student_id: StudentId,
    pub analysis: StudentAnalysis,
}

/// Everything needed to run an analysis request outside the controller.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub ticket: Ticket,
    pub student_id: StudentId,
    pub profile: StudentProfile,
    pub history: Vec<Assessment>,
}

/// Everything needed to run a passage request outside the controller.
#[derive(Debug, Clone)]
pub struct PassageJob {
    pub ticket: Ticket,
    pub grade_level: String,
    pub topic: String,
}

#[derive(Debug, Default)]
pub struct Classroom {
    store: EntityStore,
    router: Router,
    analysis: ReportSlot<SubjectAnalysis>,
    /// Student of the in-flight analysis, if any.
    analysis_pending_for: Option<StudentId>,
    passage: ReportSlot<ReadingPassage>,
}

impl Classroom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from pre-populated records.
    pub fn with_store(store: EntityStore) -> Self {
        Self {
            store,
            ..Self::default()
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn analysis(&self) -> &ReportSlot<SubjectAnalysis> {
        &self.analysis
    }

    pub fn passage(&self) -> &ReportSlot<ReadingPassage> {
        &self.passage
    }

    /// The screen to render right now.
    pub fn screen(&self) -> Screen {
        self.router.resolve(&self.store)
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    pub fn add_class(&mut self, form: NewClass) -> Result<SchoolClass, StoreError> {
        self.store.create_class(form)
    }

    pub fn update_class(&mut self, class: SchoolClass) -> Result<(), StoreError> {
        self.store.update_class(class)
    }

    pub fn delete_class(&mut self, id: &ClassId) -> Result<usize, StoreError> {
        let unassigned = self.store.delete_class(id)?;
        info!(%id, unassigned, "class deleted");
        Ok(unassigned)
    }

    pub fn add_student(&mut self, form: NewStudent) -> Result<Student, StoreError> {
        self.store.create_student(form)
    }

    pub fn update_student(&mut self, student: Student) -> Result<(), StoreError> {
        self.store.update_student(student)
    }

    /// Delete a student and their assessments. An open or in-flight
    /// analysis about the student is closed.
    pub fn delete_student(&mut self, id: &StudentId) -> Result<usize, StoreError> {
        let removed = self.store.delete_student(id)?;
        let shown = self.analysis.value().is_some_and(|a| &a.student_id == id);
        if shown || self.analysis_pending_for.as_ref() == Some(id) {
            self.close_analysis();
        }
        info!(%id, removed, "student deleted");
        Ok(removed)
    }

    /// Save an assessment and return to the dashboard.
    pub fn record_assessment(&mut self, form: NewAssessment) -> Result<Assessment, StoreError> {
        let assessment = self.store.create_assessment(form)?;
        self.router.assessment_saved();
        Ok(assessment)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn navigate(&mut self, view: View) {
        self.router.navigate(view);
    }

    pub fn view_class_students(&mut self, class_id: ClassId) {
        self.router.view_class_students(class_id);
    }

    pub fn view_history(&mut self, student_id: StudentId) {
        self.router.view_history(student_id);
    }

    pub fn back_from_history(&mut self) {
        self.router.back_from_history();
    }

    pub fn cancel_assessment(&mut self) {
        self.router.cancel_assessment();
    }

    // -----------------------------------------------------------------------
    // Student analysis
    // -----------------------------------------------------------------------

    /// Start an analysis for a student, superseding any earlier one.
    pub fn begin_analysis(&mut self, student_id: &StudentId) -> Result<AnalysisJob, StoreError> {
        let student = self
            .store
            .find_student(student_id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "student",
                id: student_id.to_string(),
            })?;
        let profile = StudentProfile::from_store(&self.store, student);
        let history = self
            .store
            .assessments_for(student_id)
            .into_iter()
            .cloned()
            .collect();

        self.analysis_pending_for = Some(*student_id);
        Ok(AnalysisJob {
            ticket: self.analysis.begin(),
            student_id: *student_id,
            profile,
            history,
        })
    }

    /// Deliver an analysis. Returns `false` if a newer request superseded it
    /// or the student no longer exists.
    pub fn finish_analysis(
        &mut self,
        ticket: Ticket,
        student_id: StudentId,
        analysis: StudentAnalysis,
    ) -> bool {
        if self.store.find_student(&student_id).is_none() {
            debug!(%student_id, "dropping analysis for deleted student");
            return false;
        }
        let applied = self.analysis.complete(
            ticket,
            SubjectAnalysis {
                student_id,
                analysis,
            },
        );
        if applied {
            self.analysis_pending_for = None;
        }
        applied
    }

    /// Run an analysis end to end.
    pub async fn request_analysis(
        &mut self,
        advisor: &PedagogyAdvisor,
        student_id: &StudentId,
    ) -> Result<StudentAnalysis, StoreError> {
        let job = self.begin_analysis(student_id)?;
        let analysis = advisor.analyze_student(&job.profile, &job.history).await;
        self.finish_analysis(job.ticket, job.student_id, analysis.clone());
        Ok(analysis)
    }

    pub fn close_analysis(&mut self) {
        self.analysis.clear();
        self.analysis_pending_for = None;
    }

    // -----------------------------------------------------------------------
    // Reading passages
    // -----------------------------------------------------------------------

    /// Start a passage request, superseding any earlier one.
    pub fn begin_passage(&mut self, grade_level: &str, topic: &str) -> PassageJob {
        PassageJob {
            ticket: self.passage.begin(),
            grade_level: grade_level.to_string(),
            topic: topic.to_string(),
        }
    }

    /// Deliver a passage result. On failure the previous passage stays and
    /// the slot carries [`PASSAGE_RETRY_MESSAGE`].
    pub fn finish_passage(
        &mut self,
        ticket: Ticket,
        result: Result<ReadingPassage, AdvisorError>,
    ) -> bool {
        match result {
            Ok(passage) => self.passage.complete(ticket, passage),
            Err(e) => self.fail_passage(ticket, &e),
        }
    }

    fn fail_passage(&mut self, ticket: Ticket, error: &AdvisorError) -> bool {
        warn!(error = %error, "passage generation failed");
        self.passage.fail(ticket, PASSAGE_RETRY_MESSAGE)
    }

    /// Run a passage request end to end. The error is returned as well as
    /// recorded on the slot.
    pub async fn request_passage(
        &mut self,
        advisor: &PedagogyAdvisor,
        grade_level: &str,
        topic: &str,
    ) -> Result<ReadingPassage, AdvisorError> {
        let job = self.begin_passage(grade_level, topic);
        let result = advisor
            .generate_reading_passage(&job.grade_level, &job.topic)
            .await;
        match &result {
            Ok(passage) => {
                self.finish_passage(job.ticket, Ok(passage.clone()));
            }
            Err(e) => {
                self.fail_passage(job.ticket, e);
            }
        }
        result
    }
}
