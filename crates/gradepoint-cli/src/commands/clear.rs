//! The `gradepoint clear` command.

use std::path::Path;

use anyhow::{Context, Result};

use super::{open_store, plural};

pub async fn execute(config_path: Option<&Path>, yes: bool) -> Result<()> {
    let mut store = open_store(config_path).await?;
    let count = store.len();

    anyhow::ensure!(
        yes || count == 0,
        "this permanently deletes {count} course{}; re-run with --yes to confirm",
        plural(count)
    );

    store.clear().await.context("could not clear courses")?;
    println!("Cleared {count} course{}.", plural(count));
    Ok(())
}
