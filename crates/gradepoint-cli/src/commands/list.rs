//! The `gradepoint list` command.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradepoint_core::engine::grade_points;
use gradepoint_core::model::Course;

use super::{open_store, status_line};

pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let store = open_store(config_path).await?;

    if store.is_empty() {
        println!("No courses added yet. Add your first one with `gradepoint add`.");
        return Ok(());
    }

    println!("{}", course_table(store.list()));
    println!("{}", status_line(&store));
    Ok(())
}

fn course_table(courses: &[Course]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Course", "Credits", "Grade", "Grade Points"]);

    for course in courses {
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.name),
            Cell::new(course.credit_hours),
            Cell::new(course.grade),
            Cell::new(format!("{:.1}", grade_points(course))),
        ]);
    }

    table
}
