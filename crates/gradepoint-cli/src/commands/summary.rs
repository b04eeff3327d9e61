//! The `gradepoint summary` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use gradepoint_core::report::CourseReport;

use super::open_store;

pub async fn execute(
    config_path: Option<&Path>,
    format: String,
    output: Option<PathBuf>,
) -> Result<()> {
    let store = open_store(config_path).await?;
    let report = CourseReport::new(store.backend_name(), store.list());

    let rendered = match format.as_str() {
        "json" => {
            if let Some(path) = &output {
                report.save_json(path)?;
                eprintln!("Report saved to: {}", path.display());
                return Ok(());
            }
            serde_json::to_string_pretty(&report)?
        }
        "markdown" | "md" => report.to_markdown(),
        "text" => {
            let summary = &report.summary;
            format!(
                "CGPA: {} / 4.00\nTotal credits: {}\nTotal courses: {}",
                summary.display_cgpa(),
                summary.total_credit_hours,
                summary.course_count
            )
        }
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    };

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            eprintln!("Report saved to: {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
