//! Core data model types for gradepoint.
//!
//! A [`Course`] is a stored record; a [`CourseDraft`] is the validated
//! `{name, credit_hours, grade}` triple a caller supplies; a [`CourseForm`] is
//! the raw, unvalidated submission coming from a front end.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{Field, ValidationError};
use crate::grade::Grade;

/// Smallest accepted credit-hour weight.
pub const MIN_CREDIT_HOURS: u8 = 1;
/// Largest accepted credit-hour weight.
pub const MAX_CREDIT_HOURS: u8 = 6;

/// Opaque, backend-assigned course identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Mint a fresh random id. Used by local backends.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CourseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for CourseId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

// Remote services commonly hand out integer primary keys.
impl<'de> Deserialize<'de> for CourseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => CourseId(s),
            RawId::Number(n) => CourseId(n.to_string()),
        })
    }
}

/// A recorded course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier, stable for the record's lifetime.
    pub id: CourseId,
    /// Course name, trimmed and non-empty.
    pub name: String,
    /// Credit-hour weight in `1..=6`.
    pub credit_hours: u8,
    /// Letter grade earned.
    pub grade: Grade,
    /// When the record was created. Informational only.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Course {
    /// Build a stored record from a draft and a backend-assigned identity.
    pub fn from_draft(id: CourseId, draft: &CourseDraft, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            credit_hours: draft.credit_hours,
            grade: draft.grade,
            created_at,
        }
    }

    /// The mutable part of this record.
    pub fn draft(&self) -> CourseDraft {
        CourseDraft {
            name: self.name.clone(),
            credit_hours: self.credit_hours,
            grade: self.grade,
        }
    }

    /// Check name and credit hours of a record that was not built from a
    /// validated draft, such as one read back from storage.
    pub fn check(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_credit_hours(i64::from(self.credit_hours))?;
        Ok(())
    }

    /// Replace name, credit hours and grade together. Identity is untouched.
    pub fn apply(&mut self, draft: &CourseDraft) {
        self.name = draft.name.clone();
        self.credit_hours = draft.credit_hours;
        self.grade = draft.grade;
    }
}

/// A validated `{name, credit_hours, grade}` triple without identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub credit_hours: u8,
    pub grade: Grade,
}

impl CourseDraft {
    /// Validate each field, reporting the first one that is wrong.
    ///
    /// The name is trimmed, credit hours must fall in `1..=6`, and the grade
    /// must be one of the eleven letters on the 4.0 scale.
    pub fn new(name: &str, credit_hours: i64, grade: &str) -> Result<Self, ValidationError> {
        let name = validate_name(name)?;
        let credit_hours = validate_credit_hours(credit_hours)?;
        let grade = grade
            .parse::<Grade>()
            .map_err(|_| invalid_grade(grade))?;
        Ok(Self {
            name,
            credit_hours,
            grade,
        })
    }
}

fn validate_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(Field::Name, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_credit_hours(credit_hours: i64) -> Result<u8, ValidationError> {
    let range = i64::from(MIN_CREDIT_HOURS)..=i64::from(MAX_CREDIT_HOURS);
    if !range.contains(&credit_hours) {
        return Err(ValidationError::new(
            Field::CreditHours,
            format!("must be between {MIN_CREDIT_HOURS} and {MAX_CREDIT_HOURS}, got {credit_hours}"),
        ));
    }
    // In range, so the narrowing cannot truncate.
    Ok(credit_hours as u8)
}

fn invalid_grade(raw: &str) -> ValidationError {
    let raw = raw.trim();
    if raw.is_empty() {
        ValidationError::new(Field::Grade, "is required")
    } else {
        ValidationError::new(Field::Grade, format!("'{raw}' is not on the 4.0 scale"))
    }
}

/// Raw form submission as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseForm {
    pub name: String,
    pub credit_hours: String,
    pub grade: String,
}

impl CourseForm {
    pub fn new(
        name: impl Into<String>,
        credit_hours: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            credit_hours: credit_hours.into(),
            grade: grade.into(),
        }
    }

    /// Prefill a form from an existing record, as when entering edit mode.
    pub fn from_course(course: &Course) -> Self {
        Self {
            name: course.name.clone(),
            credit_hours: course.credit_hours.to_string(),
            grade: course.grade.to_string(),
        }
    }

    /// Parse and validate every field.
    pub fn validate(&self) -> Result<CourseDraft, ValidationError> {
        let name = validate_name(&self.name)?;
        let raw_hours = self.credit_hours.trim();
        if raw_hours.is_empty() {
            return Err(ValidationError::new(Field::CreditHours, "is required"));
        }
        let hours = raw_hours.parse::<i64>().map_err(|_| {
            ValidationError::new(
                Field::CreditHours,
                format!("'{raw_hours}' is not a whole number"),
            )
        })?;
        let credit_hours = validate_credit_hours(hours)?;
        let grade = self
            .grade
            .parse::<Grade>()
            .map_err(|_| invalid_grade(&self.grade))?;
        Ok(CourseDraft {
            name,
            credit_hours,
            grade,
        })
    }
}
