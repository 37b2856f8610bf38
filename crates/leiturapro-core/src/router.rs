//! View routing.
//!
//! Exactly one view is current. Navigation is a single-step jump with no
//! history stack; "back" is a jump to a fixed view.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{ClassId, StudentId};
use crate::store::EntityStore;

/// The closed set of views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    #[default]
    Dashboard,
    Classes,
    Students,
    StudentHistory,
    Assessment,
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Dashboard => write!(f, "dashboard"),
            View::Classes => write!(f, "classes"),
            View::Students => write!(f, "students"),
            View::StudentHistory => write!(f, "student_history"),
            View::Assessment => write!(f, "assessment"),
        }
    }
}

/// The screen to render once the router state is checked against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Classes,
    Students { class_filter: Option<ClassId> },
    StudentHistory { student_id: StudentId },
    Assessment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Router {
    current: View,
    class_filter: Option<ClassId>,
    selected_student: Option<StudentId>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn class_filter(&self) -> Option<ClassId> {
        self.class_filter
    }

    pub fn selected_student(&self) -> Option<StudentId> {
        self.selected_student
    }

    /// Plain navigation (the top navigation bar).
    ///
    /// Leaving Students drops the class filter, leaving StudentHistory drops
    /// the selected student.
    pub fn navigate(&mut self, view: View) {
        self.current = view;
        if view != View::Students {
            self.class_filter = None;
        }
        if view != View::StudentHistory {
            self.selected_student = None;
        }
    }

    /// Open the student list filtered to one class.
    pub fn view_class_students(&mut self, class_id: ClassId) {
        self.navigate(View::Students);
        self.class_filter = Some(class_id);
    }

    /// Open the history of one student.
    pub fn view_history(&mut self, student_id: StudentId) {
        self.navigate(View::StudentHistory);
        self.selected_student = Some(student_id);
    }

    pub fn back_from_history(&mut self) {
        self.navigate(View::Students);
    }

    pub fn assessment_saved(&mut self) {
        self.navigate(View::Dashboard);
    }

    pub fn cancel_assessment(&mut self) {
        self.navigate(View::Dashboard);
    }

    /// The screen to show for the current state.
    ///
    /// A history view whose student is missing from the store resolves to
    /// the dashboard.
    pub fn resolve(&self, store: &EntityStore) -> Screen {
        match self.current {
            View::Dashboard => Screen::Dashboard,
            View::Classes => Screen::Classes,
            View::Students => Screen::Students {
                class_filter: self.class_filter,
            },
            View::StudentHistory => match self.selected_student {
                Some(id) if store.find_student(&id).is_some() => {
                    Screen::StudentHistory { student_id: id }
                }
                _ => Screen::Dashboard,
            },
            View::Assessment => Screen::Assessment,
        }
    }
}
