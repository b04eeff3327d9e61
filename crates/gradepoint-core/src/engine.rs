//! CGPA aggregation over a course collection.
//!
//! Everything here is a pure function of the slice it is given. Nothing is
//! cached between calls, so figures can never lag behind an edit or delete.

use serde::{Deserialize, Serialize};

use crate::grade::GradeTable;
use crate::model::Course;

/// Grade points earned by one course: `points_for(grade) * credit_hours`.
///
/// This is the only place the per-course formula lives; list views and
/// reports call it rather than re-deriving it.
pub fn grade_points(course: &Course) -> f64 {
    GradeTable::STANDARD.points_for(course.grade) * f64::from(course.credit_hours)
}

/// Sum of credit hours. `0` for an empty collection.
pub fn total_credit_hours(courses: &[Course]) -> u32 {
    courses.iter().map(|c| u32::from(c.credit_hours)).sum()
}

/// Sum of [`grade_points`] over all courses, at full precision.
pub fn total_grade_points(courses: &[Course]) -> f64 {
    courses.iter().map(grade_points).sum()
}

/// Credit-weighted grade point average.
///
/// Returns exactly `0.0` when there are no credit hours instead of dividing
/// by zero.
pub fn cgpa(courses: &[Course]) -> f64 {
    let hours = total_credit_hours(courses);
    if hours == 0 {
        return 0.0;
    }
    total_grade_points(courses) / f64::from(hours)
}

/// Derived figures for one snapshot of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CgpaSummary {
    /// Cumulative grade point average, unrounded.
    pub cgpa: f64,
    /// Total credit hours.
    pub total_credit_hours: u32,
    /// Total grade points, unrounded.
    pub total_grade_points: f64,
    /// Number of courses.
    pub course_count: usize,
}

impl CgpaSummary {
    /// Recompute every figure from `courses`.
    pub fn compute(courses: &[Course]) -> Self {
        Self {
            cgpa: cgpa(courses),
            total_credit_hours: total_credit_hours(courses),
            total_grade_points: total_grade_points(courses),
            course_count: courses.len(),
        }
    }

    /// CGPA rounded to two decimals for display, e.g. `"3.48"`.
    pub fn display_cgpa(&self) -> String {
        format!("{:.2}", self.cgpa)
    }
}
