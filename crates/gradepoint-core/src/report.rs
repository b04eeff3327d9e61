//! Shareable CGPA reports with JSON export and Markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{grade_points, CgpaSummary};
use crate::grade::Grade;
use crate::model::{Course, CourseId};

/// A snapshot of the course record and its derived figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Backend the courses were read from.
    pub backend: String,
    /// One line per course, in collection order.
    pub courses: Vec<CourseLine>,
    /// Aggregate figures.
    pub summary: CgpaSummary,
}

/// A course as it appears in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseLine {
    pub id: CourseId,
    pub name: String,
    pub credit_hours: u8,
    pub grade: Grade,
    pub grade_points: f64,
}

impl From<&Course> for CourseLine {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            name: course.name.clone(),
            credit_hours: course.credit_hours,
            grade: course.grade,
            grade_points: grade_points(course),
        }
    }
}

impl CourseReport {
    /// Build a report from the current collection.
    pub fn new(backend: &str, courses: &[Course]) -> Self {
        Self {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            backend: backend.to_string(),
            courses: courses.iter().map(CourseLine::from).collect(),
            summary: CgpaSummary::compute(courses),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("## CGPA Report\n\n");
        md.push_str(&format!(
            "**CGPA:** {} / 4.00 across {} credit hours ({} course{})\n\n",
            self.summary.display_cgpa(),
            self.summary.total_credit_hours,
            self.summary.course_count,
            if self.summary.course_count == 1 { "" } else { "s" }
        ));

        if self.courses.is_empty() {
            md.push_str("_No courses recorded._\n");
            return md;
        }

        md.push_str("| Course | Credits | Grade | Grade Points |\n");
        md.push_str("|--------|---------|-------|--------------|\n");
        for line in &self.courses {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1} |\n",
                line.name, line.credit_hours, line.grade, line.grade_points
            ));
        }
        md.push_str(&format!(
            "| **Total** | {} | | {:.1} |\n",
            self.summary.total_credit_hours, self.summary.total_grade_points
        ));

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CourseDraft;

    fn courses() -> Vec<Course> {
        [
            ("Data Structures", 3, "A"),
            ("Database Systems", 4, "A-"),
            ("Web Development", 3, "B+"),
            ("Machine Learning", 4, "B"),
        ]
        .iter()
        .enumerate()
        .map(|(i, (name, hours, grade))| {
            Course::from_draft(
                CourseId::from(i as u64 + 1),
                &CourseDraft::new(name, *hours, grade).unwrap(),
                None,
            )
        })
        .collect()
    }

    #[test]
    fn lines_use_per_course_points() {
        let report = CourseReport::new("memory", &courses());
        assert_eq!(report.courses.len(), 4);
        assert!((report.courses[1].grade_points - 14.8).abs() < 1e-9);
        assert_eq!(report.summary.total_credit_hours, 14);
    }

    #[test]
    fn json_written_to_disk() {
        let report = CourseReport::new("memory", &courses());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.json");

        report.save_json(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let loaded: CourseReport = serde_json::from_str(&content).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.courses[0].name, "Data Structures");
        assert!(content.contains("\"grade\": \"A-\""));
    }

    #[test]
    fn markdown_output() {
        let md = CourseReport::new("memory", &courses()).to_markdown();
        assert!(md.contains("**CGPA:** 3.48 / 4.00 across 14 credit hours (4 courses)"));
        assert!(md.contains("| Database Systems | 4 | A- | 14.8 |"));
        assert!(md.contains("| **Total** | 14 | | 48.7 |"));
    }

    #[test]
    fn markdown_empty() {
        let md = CourseReport::new("memory", &[]).to_markdown();
        assert!(md.contains("0.00 / 4.00"));
        assert!(md.contains("No courses recorded"));
    }
}
