//! The `gradepoint add` and `gradepoint edit` commands.

use std::path::Path;

use anyhow::{Context, Result};

use gradepoint_core::model::{CourseForm, CourseId};

use super::{open_store, status_line};

pub async fn add(
    config_path: Option<&Path>,
    name: String,
    credits: String,
    grade: String,
) -> Result<()> {
    let mut store = open_store(config_path).await?;
    let form = CourseForm::new(name, credits, grade);

    let course = store
        .submit(&form, None)
        .await
        .context("could not add course")?;

    println!("Added {} (id {})", course.name, course.id);
    println!("{}", status_line(&store));
    Ok(())
}

pub async fn edit(
    config_path: Option<&Path>,
    id: String,
    name: String,
    credits: String,
    grade: String,
) -> Result<()> {
    let mut store = open_store(config_path).await?;
    let id = CourseId::from(id);
    let form = CourseForm::new(name, credits, grade);

    let course = store
        .submit(&form, Some(&id))
        .await
        .context("could not update course")?;

    println!("Updated {} (id {})", course.name, course.id);
    println!("{}", status_line(&store));
    Ok(())
}
