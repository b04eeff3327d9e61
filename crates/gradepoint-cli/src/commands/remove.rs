//! The `gradepoint remove` command.

use std::path::Path;

use anyhow::{Context, Result};

use gradepoint_core::model::CourseId;

use super::{open_store, status_line};

pub async fn execute(config_path: Option<&Path>, id: String) -> Result<()> {
    let mut store = open_store(config_path).await?;
    let id = CourseId::from(id);
    let name = store.get(&id).map(|c| c.name.clone());

    store
        .delete(&id)
        .await
        .context("could not delete course")?;

    println!("Deleted {}", name.unwrap_or_else(|| id.to_string()));
    println!("{}", status_line(&store));
    Ok(())
}
