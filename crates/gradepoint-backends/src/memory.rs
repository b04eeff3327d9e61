//! In-memory backend for tests, demos and ephemeral sessions.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use gradepoint_core::error::TransportError;
use gradepoint_core::grade::Grade;
use gradepoint_core::model::{Course, CourseDraft, CourseId};
use gradepoint_core::traits::CourseBackend;

/// A process-local course backend.
///
/// Can simulate network latency and be told to fail the next call, which
/// makes it a stand-in for a remote service in tests.
pub struct MemoryBackend {
    rows: Mutex<Vec<Course>>,
    latency: Option<Duration>,
    /// Number of calls made.
    call_count: AtomicU32,
    /// Error returned by the next call, if armed.
    fail_next: Mutex<Option<TransportError>>,
}

impl MemoryBackend {
    /// An empty backend with no simulated latency.
    pub fn new() -> Self {
        Self::with_courses(Vec::new())
    }

    /// A backend holding `courses`, in the given order.
    pub fn with_courses(courses: Vec<Course>) -> Self {
        Self {
            rows: Mutex::new(courses),
            latency: None,
            call_count: AtomicU32::new(0),
            fail_next: Mutex::new(None),
        }
    }

    /// A backend seeded with four sample courses (CGPA 3.48 over 14 hours).
    pub fn with_sample_data() -> Self {
        Self::with_courses(sample_courses())
    }

    /// Delay every call by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make the next call fail with `err`. Later calls succeed again.
    pub fn fail_next(&self, err: TransportError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    /// Get the number of calls made to this backend.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Copy of the stored rows.
    pub fn snapshot(&self) -> Vec<Course> {
        self.rows.lock().unwrap().clone()
    }

    async fn enter(&self) -> Result<(), TransportError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.fail_next.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch_all(&self) -> Result<Vec<Course>, TransportError> {
        self.enter().await?;
        Ok(self.snapshot())
    }

    async fn persist_create(&self, draft: &CourseDraft) -> Result<Course, TransportError> {
        self.enter().await?;
        let course = Course::from_draft(CourseId::generate(), draft, Some(Utc::now()));
        self.rows.lock().unwrap().insert(0, course.clone());
        Ok(course)
    }

    async fn persist_update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, TransportError> {
        self.enter().await?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| TransportError::MissingRecord(id.clone()))?;
        row.apply(draft);
        Ok(row.clone())
    }

    async fn persist_delete(&self, id: &CourseId) -> Result<(), TransportError> {
        self.enter().await?;
        let mut rows = self.rows.lock().unwrap();
        let index = rows
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| TransportError::MissingRecord(id.clone()))?;
        rows.remove(index);
        Ok(())
    }

    async fn persist_clear_all(&self) -> Result<(), TransportError> {
        self.enter().await?;
        self.rows.lock().unwrap().clear();
        Ok(())
    }
}

fn sample_courses() -> Vec<Course> {
    let rows = [
        (1u64, "Data Structures", 3u8, Grade::A, 15u32),
        (2, "Database Systems", 4, Grade::AMinus, 16),
        (3, "Web Development", 3, Grade::BPlus, 17),
        (4, "Machine Learning", 4, Grade::B, 18),
    ];
    rows.iter()
        .map(|&(id, name, credit_hours, grade, day)| Course {
            id: CourseId::from(id),
            name: name.to_string(),
            credit_hours,
            grade,
            created_at: january_2024(day),
        })
        .collect()
}

fn january_2024(day: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, hours: i64, grade: &str) -> CourseDraft {
        CourseDraft::new(name, hours, grade).unwrap()
    }

    #[tokio::test]
    async fn create_assigns_id_and_timestamp() {
        let backend = MemoryBackend::new();
        let a = backend.persist_create(&draft("A", 3, "A")).await.unwrap();
        let b = backend.persist_create(&draft("B", 2, "C")).await.unwrap();

        assert_ne!(a.id, b.id);
        assert!(a.created_at.is_some());
        let rows = backend.fetch_all().await.unwrap();
        assert_eq!(rows[0].id, b.id);
        assert_eq!(backend.call_count(), 3);
    }

    #[tokio::test]
    async fn missing_ids_are_reported() {
        let backend = MemoryBackend::new();
        let id = CourseId::from("missing");
        assert!(matches!(
            backend.persist_update(&id, &draft("X", 1, "A")).await,
            Err(TransportError::MissingRecord(_))
        ));
        assert!(matches!(
            backend.persist_delete(&id).await,
            Err(TransportError::MissingRecord(_))
        ));
    }

    #[tokio::test]
    async fn fail_next_is_one_shot() {
        let backend = MemoryBackend::with_sample_data();
        backend.fail_next(TransportError::Timeout(5));
        assert!(matches!(
            backend.fetch_all().await,
            Err(TransportError::Timeout(5))
        ));
        assert_eq!(backend.fetch_all().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn sample_data_matches_reference_record() {
        let rows = MemoryBackend::with_sample_data().snapshot();
        let names: Vec<_> = rows.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Data Structures",
                "Database Systems",
                "Web Development",
                "Machine Learning"
            ]
        );
        assert_eq!(rows[1].grade, Grade::AMinus);
        assert_eq!(rows[3].id, CourseId::from("4"));
        assert!(rows.iter().all(|c| c.created_at.is_some()));
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_simulated() {
        let backend = MemoryBackend::new().with_latency(Duration::from_millis(300));
        let start = tokio::time::Instant::now();
        backend.persist_clear_all().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(300));
    }
}
