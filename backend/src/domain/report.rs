//! Aggregate course and note report.

use std::collections::HashMap;

use crate::domain::{Course, Note};

/// Number of notes attached to one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseNoteCount {
    pub course_id: String,
    pub course_title: String,
    pub note_count: usize,
}

/// Totals plus per-course note counts, busiest course first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseNoteReport {
    pub total_courses: usize,
    pub total_notes: usize,
    pub notes_per_course: Vec<CourseNoteCount>,
}

impl CourseNoteReport {
    /// Build the report from full course and note listings.
    ///
    /// Every course appears, including those without notes. Notes whose
    /// course no longer exists count towards `total_notes` only.
    ///
    /// # Examples
    /// ```
    /// use coursenote::domain::CourseNoteReport;
    ///
    /// let report = CourseNoteReport::from_listings(&[], &[]);
    /// assert_eq!(report.total_courses, 0);
    /// assert!(report.notes_per_course.is_empty());
    /// ```
    pub fn from_listings(courses: &[Course], notes: &[Note]) -> Self {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for note in notes {
            *counts.entry(note.course_id.as_str()).or_default() += 1;
        }

        let mut notes_per_course: Vec<CourseNoteCount> = courses
            .iter()
            .map(|course| CourseNoteCount {
                course_id: course.id.clone(),
                course_title: course.title.clone(),
                note_count: counts.get(course.id.as_str()).copied().unwrap_or_default(),
            })
            .collect();
        notes_per_course.sort_by(|left, right| {
            right
                .note_count
                .cmp(&left.note_count)
                .then_with(|| left.course_title.cmp(&right.course_title))
        });

        Self {
            total_courses: courses.len(),
            total_notes: notes.len(),
            notes_per_course,
        }
    }
}
