//! gradepoint-core: Grade table, course store, and CGPA engine.
//!
//! This crate defines the course data model, the asynchronous persistence
//! trait, the course store state machine, and the CGPA aggregation that the
//! rest of gradepoint builds on.

pub mod engine;
pub mod error;
pub mod grade;
pub mod model;
pub mod report;
pub mod store;
pub mod traits;

pub use engine::CgpaSummary;
pub use error::{Field, StoreError, TransportError, ValidationError};
pub use grade::{Grade, GradeTable};
pub use model::{Course, CourseDraft, CourseForm, CourseId};
pub use store::CourseStore;
pub use traits::CourseBackend;
