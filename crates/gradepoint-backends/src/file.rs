//! Local storage backend: the whole collection in one JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::instrument;

use gradepoint_core::error::TransportError;
use gradepoint_core::model::{Course, CourseDraft, CourseId};
use gradepoint_core::traits::CourseBackend;

/// Stores courses as a pretty-printed JSON array, newest first.
///
/// A missing file reads as an empty collection. Writes go to a sibling temp
/// file that is renamed over the original.
pub struct JsonFileBackend {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Course>, TransportError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(TransportError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            TransportError::Storage(format!("failed to parse {}: {e}", self.path.display()))
        })
    }

    async fn write(&self, courses: &[Course]) -> Result<(), TransportError> {
        let json = serde_json::to_string_pretty(courses)
            .map_err(|e| TransportError::Storage(format!("failed to serialize courses: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_err("create directory", parent, e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| storage_err("write", &tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| storage_err("replace", &self.path, e))?;
        Ok(())
    }
}

fn storage_err(action: &str, path: &Path, err: std::io::Error) -> TransportError {
    TransportError::Storage(format!("failed to {action} {}: {err}", path.display()))
}

#[async_trait]
impl CourseBackend for JsonFileBackend {
    fn name(&self) -> &str {
        "json-file"
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn fetch_all(&self) -> Result<Vec<Course>, TransportError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    #[instrument(skip(self, draft), fields(path = %self.path.display()))]
    async fn persist_create(&self, draft: &CourseDraft) -> Result<Course, TransportError> {
        let _guard = self.lock.lock().await;
        let mut courses = self.read().await?;
        let course = Course::from_draft(CourseId::generate(), draft, Some(Utc::now()));
        courses.insert(0, course.clone());
        self.write(&courses).await?;
        Ok(course)
    }

    #[instrument(skip(self, draft), fields(path = %self.path.display()))]
    async fn persist_update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, TransportError> {
        let _guard = self.lock.lock().await;
        let mut courses = self.read().await?;
        let row = courses
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TransportError::MissingRecord(id.clone()))?;
        row.apply(draft);
        let updated = row.clone();
        self.write(&courses).await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn persist_delete(&self, id: &CourseId) -> Result<(), TransportError> {
        let _guard = self.lock.lock().await;
        let mut courses = self.read().await?;
        let index = courses
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| TransportError::MissingRecord(id.clone()))?;
        courses.remove(index);
        self.write(&courses).await
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn persist_clear_all(&self) -> Result<(), TransportError> {
        let _guard = self.lock.lock().await;
        self.write(&[]).await
    }
}
