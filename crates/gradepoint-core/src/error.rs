//! Error types for the course store and its persistence backends.
//!
//! Every failure is reported as a typed value so a front end can decide
//! whether to re-prompt, refresh, or retry without string matching.

use std::fmt;

use thiserror::Error;

use crate::model::CourseId;

/// Which input field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    CreditHours,
    Grade,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Name => write!(f, "name"),
            Field::CreditHours => write!(f, "credit_hours"),
            Field::Grade => write!(f, "grade"),
        }
    }
}

/// Rejected user input. Raised before any mutation is attempted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The remote API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The backend has no record with this id.
    #[error("record {0} does not exist in the backend")]
    MissingRecord(CourseId),

    /// Local storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// The backend answered with data that breaks the collection contract.
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl TransportError {
    /// Returns `true` if repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Timeout(_) | TransportError::Network(_) => true,
            TransportError::Api { status, .. } => *status == 408 || *status == 429 || *status >= 500,
            TransportError::Storage(_) => true,
            TransportError::MissingRecord(_) | TransportError::Protocol(_) => false,
        }
    }
}

/// Errors returned by [`CourseStore`](crate::store::CourseStore) operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Update or delete of an id that is not in the collection.
    #[error("course not found: {id}")]
    NotFound { id: CourseId },

    #[error("backend failure")]
    Transport(#[source] TransportError),
}

impl From<TransportError> for StoreError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::MissingRecord(id) => StoreError::NotFound { id },
            other => StoreError::Transport(other),
        }
    }
}

impl StoreError {
    /// Returns `true` if the caller may retry the operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transport(e) if e.is_retryable())
    }
}
