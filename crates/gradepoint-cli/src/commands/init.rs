//! The `gradepoint init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("gradepoint.toml").exists() {
        println!("gradepoint.toml already exists, skipping.");
    } else {
        std::fs::write("gradepoint.toml", SAMPLE_CONFIG)?;
        println!("Created gradepoint.toml");
    }

    println!("\nNext steps:");
    println!("  1. Pick a backend in gradepoint.toml (local file by default)");
    println!("  2. Run: gradepoint add --name \"Data Structures\" --credits 3 --grade A");
    println!("  3. Run: gradepoint list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradepoint configuration

# Courses live in a local JSON file.
[backend]
type = "file"
path = "./gradepoint-courses.json"

# Or use a REST API:
# [backend]
# type = "http"
# base_url = "http://localhost:8000/api"
# api_token = "${GRADEPOINT_API_TOKEN}"
# timeout_secs = 30

# Or keep everything in memory (lost on exit), optionally with sample data:
# [backend]
# type = "memory"
# sample_data = true
# latency_ms = 300
"#;
