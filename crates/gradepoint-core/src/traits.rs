//! The asynchronous persistence boundary consumed by the course store.
//!
//! Implemented by the `gradepoint-backends` crate (in-memory, JSON file and
//! REST API backends). The store never talks to storage any other way.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::model::{Course, CourseDraft, CourseId};

/// Storage for course records.
///
/// Implementations assign ids and creation timestamps; callers never do.
#[async_trait]
pub trait CourseBackend: Send + Sync {
    /// Human-readable backend name (e.g. "json-file").
    fn name(&self) -> &str;

    /// Fetch every stored course, newest first.
    async fn fetch_all(&self) -> Result<Vec<Course>, TransportError>;

    /// Store a new course and return it with its assigned id.
    async fn persist_create(&self, draft: &CourseDraft) -> Result<Course, TransportError>;

    /// Replace the mutable fields of an existing course.
    ///
    /// Returns [`TransportError::MissingRecord`] if the backend has no such id.
    async fn persist_update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, TransportError>;

    /// Remove one course.
    ///
    /// Returns [`TransportError::MissingRecord`] if the backend has no such id.
    async fn persist_delete(&self, id: &CourseId) -> Result<(), TransportError>;

    /// Remove every course.
    async fn persist_clear_all(&self) -> Result<(), TransportError>;
}
