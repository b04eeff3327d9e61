//! The course collection and its create/update/delete/clear state machine.
//!
//! [`CourseStore`] owns the ordered list of courses. Every mutation first
//! validates its input, then awaits the backend, and only touches the local
//! collection once the backend call has succeeded. Mutating methods take
//! `&mut self`, so no reader can see the collection mid-change.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::engine::CgpaSummary;
use crate::error::{StoreError, TransportError};
use crate::model::{Course, CourseDraft, CourseForm, CourseId};
use crate::traits::CourseBackend;

/// Ordered course collection backed by a [`CourseBackend`].
///
/// Newly created courses go to the front. Updates keep their position and
/// deletes leave the rest of the order alone.
pub struct CourseStore {
    backend: Arc<dyn CourseBackend>,
    courses: Vec<Course>,
    revision: watch::Sender<u64>,
}

impl CourseStore {
    /// An empty store. Call [`refresh`](Self::refresh) to pull existing data.
    pub fn new(backend: Arc<dyn CourseBackend>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            backend,
            courses: Vec::new(),
            revision,
        }
    }

    /// Build a store populated from the backend.
    pub async fn load(backend: Arc<dyn CourseBackend>) -> Result<Self, StoreError> {
        let mut store = Self::new(backend);
        store.refresh().await?;
        Ok(store)
    }

    /// Replace the local collection with the backend's current contents.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let fetched = self.backend.fetch_all().await.map_err(|e| {
            tracing::warn!(backend = self.backend.name(), "fetch failed: {e}");
            e
        })?;

        if let Some(dup) = first_duplicate(&fetched) {
            return Err(TransportError::Protocol(format!(
                "backend returned duplicate id {dup}"
            ))
            .into());
        }
        fetched.iter().try_for_each(check_record)?;

        tracing::debug!(
            backend = self.backend.name(),
            count = fetched.len(),
            "loaded courses"
        );
        self.courses = fetched;
        self.bump();
        Ok(())
    }

    /// Current snapshot, newest first.
    pub fn list(&self) -> &[Course] {
        &self.courses
    }

    pub fn get(&self, id: &CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| &c.id == id)
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Name of the backend this store persists through.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Derived CGPA figures, recomputed from the current snapshot.
    pub fn summary(&self) -> CgpaSummary {
        CgpaSummary::compute(&self.courses)
    }

    /// Number of successful mutations and refreshes so far.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Receive a notification after every successful mutation or refresh.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Validate and add a course to the front of the collection.
    pub async fn create(
        &mut self,
        name: &str,
        credit_hours: i64,
        grade: &str,
    ) -> Result<Course, StoreError> {
        let draft = CourseDraft::new(name, credit_hours, grade)?;
        self.create_from_draft(draft).await
    }

    /// Add an already-validated course to the front of the collection.
    pub async fn create_from_draft(&mut self, draft: CourseDraft) -> Result<Course, StoreError> {
        let course = self.backend.persist_create(&draft).await.map_err(|e| {
            tracing::warn!(backend = self.backend.name(), "create failed: {e}");
            e
        })?;
        check_record(&course)?;

        if self.get(&course.id).is_some() {
            return Err(TransportError::Protocol(format!(
                "backend reused existing id {}",
                course.id
            ))
            .into());
        }

        tracing::debug!(id = %course.id, name = %course.name, "course created");
        self.courses.insert(0, course.clone());
        self.bump();
        Ok(course)
    }

    /// Validate and replace name, credit hours and grade of an existing course.
    ///
    /// The course keeps its id, creation time and position.
    pub async fn update(
        &mut self,
        id: &CourseId,
        name: &str,
        credit_hours: i64,
        grade: &str,
    ) -> Result<Course, StoreError> {
        let draft = CourseDraft::new(name, credit_hours, grade)?;
        self.update_from_draft(id, draft).await
    }

    /// Replace the mutable fields of an existing course with a validated draft.
    pub async fn update_from_draft(
        &mut self,
        id: &CourseId,
        draft: CourseDraft,
    ) -> Result<Course, StoreError> {
        let index = self.position(id)?;

        let stored = self
            .backend
            .persist_update(id, &draft)
            .await
            .map_err(|e| {
                tracing::warn!(backend = self.backend.name(), %id, "update failed: {e}");
                e
            })?;
        check_record(&stored)?;

        let course = &mut self.courses[index];
        course.apply(&stored.draft());
        let updated = course.clone();

        tracing::debug!(%id, "course updated");
        self.bump();
        Ok(updated)
    }

    /// Remove one course. Deleting an id that is already gone is an error.
    pub async fn delete(&mut self, id: &CourseId) -> Result<(), StoreError> {
        let index = self.position(id)?;

        self.backend.persist_delete(id).await.map_err(|e| {
            tracing::warn!(backend = self.backend.name(), %id, "delete failed: {e}");
            e
        })?;

        self.courses.remove(index);
        tracing::debug!(%id, "course deleted");
        self.bump();
        Ok(())
    }

    /// Remove every course. Succeeds on an empty collection too.
    pub async fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.persist_clear_all().await.map_err(|e| {
            tracing::warn!(backend = self.backend.name(), "clear failed: {e}");
            e
        })?;

        let removed = self.courses.len();
        self.courses.clear();
        tracing::debug!(removed, "courses cleared");
        self.bump();
        Ok(())
    }

    /// Handle a raw form submission.
    ///
    /// With `editing` set the form replaces that course; otherwise a new
    /// course is created.
    pub async fn submit(
        &mut self,
        form: &CourseForm,
        editing: Option<&CourseId>,
    ) -> Result<Course, StoreError> {
        let draft = form.validate()?;
        match editing {
            Some(id) => self.update_from_draft(id, draft).await,
            None => self.create_from_draft(draft).await,
        }
    }

    fn position(&self, id: &CourseId) -> Result<usize, StoreError> {
        self.courses
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.clone() })
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

/// Reject a backend record that breaks the course field rules.
fn check_record(course: &Course) -> Result<(), TransportError> {
    course.check().map_err(|e| {
        TransportError::Protocol(format!("backend returned invalid course {}: {e}", course.id))
    })
}

fn first_duplicate(courses: &[Course]) -> Option<CourseId> {
    let mut seen = HashSet::with_capacity(courses.len());
    courses
        .iter()
        .find(|c| !seen.insert(&c.id))
        .map(|c| c.id.clone())
}
