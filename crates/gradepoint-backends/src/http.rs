//! REST API backend.
//!
//! Talks to a `courses` resource in the shape of a typical Django REST
//! Framework router:
//!
//! | Operation           | Request                  |
//! |---------------------|--------------------------|
//! | `fetch_all`         | `GET    /courses/`       |
//! | `persist_create`    | `POST   /courses/`       |
//! | `persist_update`    | `PUT    /courses/{id}/`  |
//! | `persist_delete`    | `DELETE /courses/{id}/`  |
//! | `persist_clear_all` | `DELETE /courses/`       |

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use gradepoint_core::error::TransportError;
use gradepoint_core::model::{Course, CourseDraft, CourseId};
use gradepoint_core::traits::CourseBackend;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Course backend over HTTP.
pub struct HttpBackend {
    base_url: String,
    api_token: Option<String>,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(
        base_url: &str,
        api_token: Option<String>,
        timeout_secs: Option<u64>,
    ) -> anyhow::Result<Self> {
        let timeout_secs = timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            timeout_secs,
            client,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/courses/", self.base_url)
    }

    fn record_url(&self, id: &CourseId) -> String {
        format!("{}/courses/{}/", self.base_url, id)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        record: Option<&CourseId>,
    ) -> Result<reqwest::Response, TransportError> {
        let response = self.authorize(request).send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(self.timeout_secs)
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 404 {
            if let Some(id) = record {
                return Err(TransportError::MissingRecord(id.clone()));
            }
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.detail)
                .unwrap_or(body);
            return Err(TransportError::Api { status, message });
        }
        Ok(response)
    }
}

/// Error body in DRF style: `{"detail": "..."}`.
#[derive(Deserialize)]
struct ApiError {
    detail: String,
}

/// `GET /courses/` may return a bare list or a paginated envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum CourseListing {
    Plain(Vec<Course>),
    Paginated { results: Vec<Course> },
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    response
        .json::<T>()
        .await
        .map_err(|e| TransportError::Protocol(format!("failed to parse response: {e}")))
}

#[async_trait]
impl CourseBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_all(&self) -> Result<Vec<Course>, TransportError> {
        let response = self
            .send(self.client.get(self.collection_url()), None)
            .await?;
        Ok(match decode::<CourseListing>(response).await? {
            CourseListing::Plain(courses) => courses,
            CourseListing::Paginated { results } => results,
        })
    }

    #[instrument(skip(self, draft), fields(base_url = %self.base_url))]
    async fn persist_create(&self, draft: &CourseDraft) -> Result<Course, TransportError> {
        let request = self.client.post(self.collection_url()).json(draft);
        decode(self.send(request, None).await?).await
    }

    #[instrument(skip(self, draft), fields(base_url = %self.base_url))]
    async fn persist_update(
        &self,
        id: &CourseId,
        draft: &CourseDraft,
    ) -> Result<Course, TransportError> {
        let request = self.client.put(self.record_url(id)).json(draft);
        decode(self.send(request, Some(id)).await?).await
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn persist_delete(&self, id: &CourseId) -> Result<(), TransportError> {
        self.send(self.client.delete(self.record_url(id)), Some(id))
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn persist_clear_all(&self) -> Result<(), TransportError> {
        self.send(self.client.delete(self.collection_url()), None)
            .await?;
        Ok(())
    }
}
