//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `gradepoint` invocation that stores courses in `dir`.
fn gradepoint(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("gradepoint").unwrap();
    cmd.current_dir(dir)
        .env("GRADEPOINT_DATA_FILE", dir.join("courses.json"))
        .env_remove("GRADEPOINT_API_URL")
        .env_remove("GRADEPOINT_API_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

fn add(dir: &Path, name: &str, credits: &str, grade: &str) {
    gradepoint(dir)
        .args(["add", "--name", name, "--credits", credits, "--grade", grade])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Added {name}")));
}

/// Course ids in list order, read from the JSON summary.
fn course_ids(dir: &Path) -> Vec<String> {
    let output = gradepoint(dir)
        .args(["summary", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    report["courses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap().to_string())
        .collect()
}

fn add_reference_record(dir: &Path) {
    add(dir, "Data Structures", "3", "A");
    add(dir, "Database Systems", "4", "A-");
    add(dir, "Web Development", "3", "B+");
    add(dir, "Machine Learning", "4", "B");
}

#[test]
fn empty_list() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No courses added yet"));
}

#[test]
fn add_and_list_reference_record() {
    let dir = TempDir::new().unwrap();
    add_reference_record(dir.path());

    gradepoint(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Machine Learning"))
        .stdout(predicate::str::contains("14.8"))
        .stdout(predicate::str::contains("CGPA 3.48 / 4.00"))
        .stdout(predicate::str::contains("14 credit hours"))
        .stdout(predicate::str::contains("4 courses"));

    gradepoint(dir.path())
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("CGPA: 3.48 / 4.00"))
        .stdout(predicate::str::contains("Total credits: 14"))
        .stdout(predicate::str::contains("Total courses: 4"));
}

#[test]
fn newest_course_listed_first() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "First", "3", "A");
    add(dir.path(), "Second", "3", "A");

    let output = gradepoint(dir.path())
        .args(["summary", "--format", "json"])
        .output()
        .unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["courses"][0]["name"], "Second");
    assert_eq!(report["courses"][1]["name"], "First");
}

#[test]
fn add_rejects_out_of_range_credits() {
    let dir = TempDir::new().unwrap();

    for credits in ["0", "7", "three"] {
        gradepoint(dir.path())
            .args(["add", "--name", "X", "--credits", credits, "--grade", "A"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid credit_hours"));
    }

    gradepoint(dir.path())
        .args(["add", "--name", "X", "--credits", "3", "--grade", "E"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid grade"));

    gradepoint(dir.path())
        .args(["add", "--name", "  ", "--credits", "3", "--grade", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid name"));

    assert!(course_ids(dir.path()).is_empty());
}

#[test]
fn edit_keeps_id_and_updates_cgpa() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "Algorithms", "3", "C");
    let id = course_ids(dir.path()).remove(0);

    gradepoint(dir.path())
        .args(["edit", &id, "--name", "Algorithms II", "--credits", "4", "--grade", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Algorithms II"))
        .stdout(predicate::str::contains("CGPA 3.00"));

    assert_eq!(course_ids(dir.path()), vec![id]);
}

#[test]
fn edit_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .args(["edit", "nope", "--name", "X", "--credits", "3", "--grade", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("course not found: nope"));
}

#[test]
fn remove_twice_fails_second_time() {
    let dir = TempDir::new().unwrap();
    add_reference_record(dir.path());
    let ids = course_ids(dir.path());
    // Web Development is second in the list (newest first).
    let web = ids[1].clone();

    gradepoint(dir.path())
        .args(["remove", &web])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted Web Development"))
        .stdout(predicate::str::contains("11 credit hours"));

    gradepoint(dir.path())
        .args(["remove", &web])
        .assert()
        .failure()
        .stderr(predicate::str::contains("course not found"));

    let remaining = course_ids(dir.path());
    assert_eq!(remaining, vec![ids[0].clone(), ids[2].clone(), ids[3].clone()]);
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), "Ethics", "1", "A");

    gradepoint(dir.path())
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
    assert_eq!(course_ids(dir.path()).len(), 1);

    gradepoint(dir.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 course."));
    assert!(course_ids(dir.path()).is_empty());

    // Clearing an empty record needs no confirmation and still succeeds.
    gradepoint(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 0 courses."));
}

#[test]
fn summary_markdown_and_file_output() {
    let dir = TempDir::new().unwrap();
    add_reference_record(dir.path());

    gradepoint(dir.path())
        .args(["summary", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::contains("| Database Systems | 4 | A- | 14.8 |"));

    let out = dir.path().join("reports").join("cgpa.json");
    gradepoint(dir.path())
        .args(["summary", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .success();
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(report["summary"]["total_credit_hours"], 14);

    gradepoint(dir.path())
        .args(["summary", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn summary_markdown_output_creates_directories() {
    let dir = TempDir::new().unwrap();
    add_reference_record(dir.path());

    let out = dir.path().join("out").join("nested").join("cgpa.md");
    gradepoint(dir.path())
        .args(["summary", "--format", "markdown", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("Report saved to"));

    let md = std::fs::read_to_string(&out).unwrap();
    assert!(md.contains("**CGPA:** 3.48 / 4.00"));
}

#[test]
fn memory_backend_with_sample_data() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("memory.toml");
    std::fs::write(&config, "[backend]\ntype = \"memory\"\nsample_data = true\n").unwrap();

    #[allow(deprecated)]
    Command::cargo_bin("gradepoint")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("GRADEPOINT_DATA_FILE")
        .env_remove("GRADEPOINT_API_URL")
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Data Structures"))
        .stdout(predicate::str::contains("CGPA 3.48"));
}

#[test]
fn scale_output() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .arg("scale")
        .assert()
        .success()
        .stdout(predicate::str::contains("A-  3.7"))
        .stdout(predicate::str::contains("F   0.0"));
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();

    gradepoint(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created gradepoint.toml"));
    assert!(dir.path().join("gradepoint.toml").exists());

    gradepoint(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn missing_config_file() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .args(["--config", "nonexistent.toml", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Course records and CGPA calculator"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    gradepoint(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gradepoint"));
}
