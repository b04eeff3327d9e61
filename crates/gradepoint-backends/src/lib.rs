//! gradepoint-backends: Course storage backends.
//!
//! Implements the `CourseBackend` trait for process memory, a local JSON
//! file, and a REST API, plus the configuration that selects between them.

pub mod config;
pub mod file;
pub mod http;
pub mod memory;

pub use config::{create_backend, load_config, BackendConfig, GradepointConfig};
pub use file::JsonFileBackend;
pub use http::HttpBackend;
pub use memory::MemoryBackend;
