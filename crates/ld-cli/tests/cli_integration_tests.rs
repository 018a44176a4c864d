//! Integration tests for the `ladder` binary
//!
//! Each test builds a throwaway project directory with a `migrations/`
//! tree and a file-backed DuckDB database.

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled ladder binary
fn ladder_bin() -> String {
    env!("CARGO_BIN_EXE_ladder").to_string()
}

/// Run a `ladder` command in `project` and return (stdout, stderr, exit code).
fn run_ladder(project: &Path, args: &[&str]) -> (String, String, Option<i32>) {
    let output = Command::new(ladder_bin())
        .arg("--project-dir")
        .arg(project)
        .args(args)
        .env_remove("LADDER_DATABASE")
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute ladder with args {:?}: {}", args, e));
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.code(),
    )
}

fn write(root: &Path, rel: &str, sql: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, sql).unwrap();
}

fn sample_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "ladder.yml", "database: app.duckdb\n");
    write(
        root,
        "migrations/schema/1.0.0_create-users_up.sql",
        "CREATE TABLE users (id INTEGER, name VARCHAR);",
    );
    write(
        root,
        "migrations/schema/1.0.0_create-users_down.sql",
        "DROP TABLE users;",
    );
    write(
        root,
        "migrations/schema/1.1.0_add-email_up.sql",
        "ALTER TABLE users ADD COLUMN email VARCHAR;",
    );
    write(
        root,
        "migrations/schema/1.1.0_add-email_down.sql",
        "ALTER TABLE users DROP COLUMN email;",
    );
    dir
}

#[test]
fn test_migrate_latest_then_status_json() {
    let project = sample_project();

    let (stdout, stderr, code) = run_ladder(project.path(), &["migrate"]);
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert!(stdout.contains("Migrated to 1.1.0: 2 applied"), "{stdout}");
    assert!(project.path().join("app.duckdb").exists());

    let (stdout, _, code) = run_ladder(project.path(), &["status", "--json"]);
    assert_eq!(code, Some(0));
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["version"], "1.0.0");
    assert_eq!(rows[1]["scope"], "schema");
}

#[test]
fn test_pending_then_migrate_to() {
    let project = sample_project();

    let (stdout, _, code) = run_ladder(project.path(), &["pending"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("2 pending up to 1.1.0"), "{stdout}");

    let (_, stderr, code) = run_ladder(project.path(), &["migrate", "--to", "1.0.0"]);
    assert_eq!(code, Some(0), "stderr: {stderr}");

    let (stdout, _, _) = run_ladder(project.path(), &["pending"]);
    assert!(stdout.contains("1 pending up to 1.1.0"), "{stdout}");
}

#[test]
fn test_downgrade_needs_flag() {
    let project = sample_project();
    run_ladder(project.path(), &["migrate"]);

    let (stdout, _, code) = run_ladder(project.path(), &["migrate", "--to", "1.0.0"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("--allow-downgrade"), "{stdout}");

    let (stdout, stderr, code) = run_ladder(
        project.path(),
        &["migrate", "--to", "1.0.0", "--allow-downgrade"],
    );
    assert_eq!(code, Some(0), "stderr: {stderr}");
    assert!(stdout.contains("1 reverted"), "{stdout}");
}

#[test]
fn test_verify_reports_edited_script() {
    let project = sample_project();
    run_ladder(project.path(), &["migrate"]);

    let (stdout, _, code) = run_ladder(project.path(), &["verify"]);
    assert_eq!(code, Some(0));
    assert!(stdout.contains("2 applied migration(s)"), "{stdout}");

    write(
        project.path(),
        "migrations/schema/1.0.0_create-users_up.sql",
        "CREATE TABLE users (id BIGINT, name VARCHAR);",
    );
    let (_, stderr, code) = run_ladder(project.path(), &["verify"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("[M003]"), "{stderr}");
}

#[test]
fn test_bad_target_fails() {
    let project = sample_project();
    let (_, stderr, code) = run_ladder(project.path(), &["migrate", "--to", "latest"]);
    assert_eq!(code, Some(1));
    assert!(stderr.contains("[L001]"), "{stderr}");
}
