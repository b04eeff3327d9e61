//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use gradepoint_backends::config::{create_backend, load_config_from};
use gradepoint_core::CourseStore;

pub mod clear;
pub mod init;
pub mod list;
pub mod remove;
pub mod save;
pub mod scale;
pub mod summary;

/// Load config, build the configured backend, and fetch the current courses.
pub async fn open_store(config_path: Option<&Path>) -> Result<CourseStore> {
    let config = load_config_from(config_path)?;
    tracing::debug!(backend = ?config.backend, "opening course store");
    let backend = create_backend(&config.backend)?;
    CourseStore::load(backend)
        .await
        .context("failed to load courses")
}

/// One-line CGPA status shown after every change.
pub fn status_line(store: &CourseStore) -> String {
    let summary = store.summary();
    format!(
        "CGPA {} / 4.00 · {} credit hour{} · {} course{}",
        summary.display_cgpa(),
        summary.total_credit_hours,
        plural(summary.total_credit_hours as usize),
        summary.course_count,
        plural(summary.course_count),
    )
}

pub fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
