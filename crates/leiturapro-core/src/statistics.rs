//! Derived statistics over a store snapshot.
//!
//! Every function here is pure. Means over an empty set are `0`, never NaN.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Assessment, ReadingLevel, Student, StudentId};
use crate::store::EntityStore;

/// Number of points kept in the dashboard trend series.
pub const TREND_WINDOW: usize = 10;

/// Label for a trend point whose student can no longer be resolved.
pub const UNKNOWN_STUDENT_LABEL: &str = "Aluno";

/// One point of the words-per-minute trend chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    /// `dd/mm` label.
    pub label: String,
    pub wpm: u32,
    /// First name of the student.
    pub student: String,
}

/// Student count for one reading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    pub level: ReadingLevel,
    pub count: usize,
}

/// Per-student figures shown on the history view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentRollup {
    pub assessment_count: usize,
    /// Rounded to the nearest integer.
    pub mean_wpm: u32,
    /// Rounded to one decimal place.
    pub mean_math: f64,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_students: usize,
    pub total_assessments: usize,
    pub total_classes: usize,
    /// Exact mean accuracy.
    pub average_accuracy: f64,
    /// Mean accuracy rounded for display.
    pub average_accuracy_pct: u32,
    pub average_wpm: f64,
    pub trend: Vec<TrendPoint>,
    pub levels: Vec<LevelCount>,
}

/// Arithmetic mean, `0.0` for an empty input.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, n) = values
        .into_iter()
        .fold((0.0f64, 0usize), |(sum, n), v| (sum + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Round to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn average_accuracy(assessments: &[Assessment]) -> f64 {
    mean(assessments.iter().map(|a| a.accuracy as f64))
}

pub fn average_wpm(assessments: &[Assessment]) -> f64 {
    mean(assessments.iter().map(|a| a.wpm as f64))
}

/// The most recent [`TREND_WINDOW`] assessments by date, oldest first.
///
/// Assessments sharing a date keep their collection order.
pub fn trend_series(assessments: &[Assessment], students: &[Student]) -> Vec<TrendPoint> {
    let names: HashMap<&StudentId, &str> =
        students.iter().map(|s| (&s.id, s.first_name())).collect();

    let mut sorted: Vec<&Assessment> = assessments.iter().collect();
    sorted.sort_by_key(|a| a.date);
    let skip = sorted.len().saturating_sub(TREND_WINDOW);

    sorted
        .into_iter()
        .skip(skip)
        .map(|a| TrendPoint {
            date: a.date,
            label: a.date.format("%d/%m").to_string(),
            wpm: a.wpm,
            student: names
                .get(&a.student_id)
                .filter(|name| !name.is_empty())
                .copied()
                .unwrap_or(UNKNOWN_STUDENT_LABEL)
                .to_string(),
        })
        .collect()
}

/// Student count per reading level, all five levels in canonical order.
pub fn reading_level_distribution(students: &[Student]) -> Vec<LevelCount> {
    ReadingLevel::ALL
        .iter()
        .map(|&level| LevelCount {
            level,
            count: students.iter().filter(|s| s.reading_level == level).count(),
        })
        .collect()
}

pub fn student_rollup<'a, I>(assessments: I) -> StudentRollup
where
    I: IntoIterator<Item = &'a Assessment>,
{
    let assessments: Vec<&Assessment> = assessments.into_iter().collect();
    let mean_wpm = mean(assessments.iter().map(|a| a.wpm as f64));
    let mean_math = mean(assessments.iter().map(|a| a.math_score as f64));

    StudentRollup {
        assessment_count: assessments.len(),
        mean_wpm: mean_wpm.round() as u32,
        mean_math: round_to(mean_math, 1),
    }
}

/// Rollup for one student of the store.
pub fn student_rollup_for(store: &EntityStore, student_id: &StudentId) -> StudentRollup {
    student_rollup(store.assessments_for(student_id))
}

/// A student's assessments, newest first.
pub fn history_newest_first<'a>(
    store: &'a EntityStore,
    student_id: &StudentId,
) -> Vec<&'a Assessment> {
    let mut history = store.assessments_for(student_id);
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

pub fn dashboard_summary(store: &EntityStore) -> DashboardSummary {
    let average_accuracy = average_accuracy(store.assessments());
    DashboardSummary {
        total_students: store.students().len(),
        total_assessments: store.assessments().len(),
        total_classes: store.classes().len(),
        average_accuracy,
        average_accuracy_pct: average_accuracy.round() as u32,
        average_wpm: average_wpm(store.assessments()),
        trend: trend_series(store.assessments(), store.students()),
        levels: reading_level_distribution(store.students()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentCriteria, AssessmentId, NewAssessment, NewStudent};

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, day).unwrap()
    }

    fn assessment(student_id: StudentId, date: NaiveDate, wpm: u32, accuracy: u8) -> Assessment {
        Assessment {
            id: AssessmentId::new(),
            student_id,
            date,
            text_title: "Texto".into(),
            wpm,
            accuracy,
            comprehension: 5,
            math_score: 5,
            notes: String::new(),
            criteria: AssessmentCriteria::default(),
        }
    }

    fn student(name: &str, level: ReadingLevel) -> Student {
        Student {
            id: StudentId::new(),
            name: name.into(),
            class_id: None,
            reading_level: level,
            avatar_url: String::new(),
        }
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(std::iter::empty()), 0.0);
        assert_eq!(average_accuracy(&[]), 0.0);
        assert_eq!(average_wpm(&[]), 0.0);
    }

    #[test]
    fn average_accuracy_is_arithmetic_mean() {
        let id = StudentId::new();
        let list = vec![
            assessment(id, date(3, 1), 40, 90),
            assessment(id, date(3, 2), 50, 85),
            assessment(id, date(3, 3), 60, 71),
        ];
        let avg = average_accuracy(&list);
        assert!((avg - 82.0).abs() < 1e-9, "got {avg}");
        assert!((average_wpm(&list) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn trend_keeps_ten_most_recent_in_ascending_order() {
        let ana = student("Ana Souza", ReadingLevel::Beginner);
        let bia = student("Bia Lima", ReadingLevel::Fluent);
        // Insert out of date order, twelve distinct dates.
        let days = [12, 3, 7, 1, 9, 11, 2, 5, 10, 4, 8, 6];
        let list: Vec<Assessment> = days
            .iter()
            .enumerate()
            .map(|(i, &d)| {
                let who = if i % 2 == 0 { ana.id } else { bia.id };
                assessment(who, date(4, d), d * 10, 90)
            })
            .collect();

        let trend = trend_series(&list, &[ana, bia]);
        assert_eq!(trend.len(), TREND_WINDOW);
        let got: Vec<u32> = trend.iter().map(|p| p.wpm / 10).collect();
        assert_eq!(got, (3..=12).collect::<Vec<u32>>());
        assert!(trend.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(trend[0].label, "03/04");
    }

    #[test]
    fn trend_uses_first_name_and_fallback_label() {
        let ana = student("Ana Souza", ReadingLevel::Beginner);
        let list = vec![
            assessment(ana.id, date(3, 1), 40, 90),
            assessment(StudentId::new(), date(3, 2), 50, 90),
        ];
        let trend = trend_series(&list, std::slice::from_ref(&ana));
        assert_eq!(trend[0].student, "Ana");
        assert_eq!(trend[1].student, UNKNOWN_STUDENT_LABEL);
    }

    #[test]
    fn trend_ties_keep_collection_order() {
        let id = StudentId::new();
        let list = vec![
            assessment(id, date(3, 5), 11, 90),
            assessment(id, date(3, 1), 22, 90),
            assessment(id, date(3, 5), 33, 90),
        ];
        let wpms: Vec<u32> = trend_series(&list, &[]).iter().map(|p| p.wpm).collect();
        assert_eq!(wpms, vec![22, 11, 33]);
    }

    #[test]
    fn distribution_lists_every_level() {
        let students = vec![
            student("A", ReadingLevel::Beginner),
            student("B", ReadingLevel::Beginner),
            student("C", ReadingLevel::Fluent),
        ];
        let dist = reading_level_distribution(&students);
        assert_eq!(dist.len(), 5);
        let levels: Vec<ReadingLevel> = dist.iter().map(|l| l.level).collect();
        assert_eq!(levels, ReadingLevel::ALL.to_vec());
        assert_eq!(dist[0].count, 2);
        assert_eq!(dist[2].count, 0);
        assert_eq!(dist[4].count, 1);
        assert_eq!(dist.iter().map(|l| l.count).sum::<usize>(), students.len());

        let empty = reading_level_distribution(&[]);
        assert_eq!(empty.len(), 5);
        assert!(empty.iter().all(|l| l.count == 0));
    }

    #[test]
    fn rollup_without_assessments_is_zero() {
        let rollup = student_rollup(std::iter::empty());
        assert_eq!(
            rollup,
            StudentRollup {
                assessment_count: 0,
                mean_wpm: 0,
                mean_math: 0.0,
            }
        );
    }

    #[test]
    fn rollup_rounds_means() {
        let id = StudentId::new();
        let mut a = assessment(id, date(3, 1), 41, 90);
        a.math_score = 7;
        let mut b = assessment(id, date(3, 2), 42, 90);
        b.math_score = 8;
        let mut c = assessment(id, date(3, 3), 42, 90);
        c.math_score = 8;
        let rollup = student_rollup([&a, &b, &c]);
        assert_eq!(rollup.assessment_count, 3);
        assert_eq!(rollup.mean_wpm, 42);
        assert!((rollup.mean_math - 7.7).abs() < 1e-9);
    }

    #[test]
    fn dashboard_summary_over_store() {
        let mut store = EntityStore::new();
        let ana = store
            .create_student(NewStudent {
                name: "Ana".into(),
                ..Default::default()
            })
            .unwrap();
        for (day, accuracy) in [(1, 90), (2, 95)] {
            let mut form = NewAssessment::blank(ana.id, date(5, day));
            form.text_title = "Texto".into();
            form.accuracy = accuracy;
            store.create_assessment(form).unwrap();
        }

        let summary = dashboard_summary(&store);
        assert_eq!(summary.total_students, 1);
        assert_eq!(summary.total_assessments, 2);
        assert_eq!(summary.total_classes, 0);
        assert!((summary.average_accuracy - 92.5).abs() < 1e-9);
        assert_eq!(summary.average_accuracy_pct, 93);
        assert_eq!(summary.trend.len(), 2);
        assert_eq!(summary.levels[0].count, 1);

        let history = history_newest_first(&store, &ana.id);
        assert_eq!(history[0].date, date(5, 2));
        assert_eq!(student_rollup_for(&store, &ana.id).assessment_count, 2);
    }
}
