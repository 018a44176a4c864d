use super::*;
use duckdb::Connection;
use ld_core::MemorySource;
use ld_db::MigrationRecord;

fn ready_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    store::create_table_if_missing(&conn).unwrap();
    conn
}

fn source() -> MemorySource {
    MemorySource::from_files([
        ("schema/1.0.0_create-users_up.sql", "CREATE TABLE users (id INT);"),
        ("schema/1.0.0_create-users_down.sql", "DROP TABLE users;"),
        ("schema/1.1.0_add-email_up.sql", "ALTER TABLE users ADD COLUMN email VARCHAR;"),
    ])
}

/// Record `path` as applied with the scripts currently in `tree`.
fn record_applied(conn: &Connection, tree: &MemorySource, path: &str) {
    let file = MigrationFile::from_up_path(path).unwrap();
    let (up, down) = read_scripts(tree, &file, false).unwrap();
    store::insert(conn, &MigrationRecord::from_file(&file, up, down)).unwrap();
}

#[test]
fn test_read_scripts_tolerates_missing_down() {
    let tree = source();
    let file = MigrationFile::from_up_path("schema/1.1.0_add-email_up.sql").unwrap();
    let (up, down) = read_scripts(&tree, &file, false).unwrap();
    assert!(up.starts_with("ALTER TABLE"));
    assert_eq!(down, "");
}

#[test]
fn test_read_scripts_requires_down_when_asked() {
    let tree = source();
    let file = MigrationFile::from_up_path("schema/1.1.0_add-email_up.sql").unwrap();
    let err = read_scripts(&tree, &file, true).unwrap_err();
    assert!(matches!(err, MigrateError::MissingDownScript { ref path } if path == "schema/1.1.0_add-email_down.sql"));
}

#[test]
fn test_read_scripts_missing_up_is_source_error() {
    let tree = MemorySource::new();
    let file = MigrationFile::from_up_path("schema/1.0.0_gone_up.sql").unwrap();
    let err = read_scripts(&tree, &file, false).unwrap_err();
    assert!(matches!(err, MigrateError::Source { .. }));
}

#[test]
fn test_verify_passes_for_untouched_scripts() {
    let conn = ready_conn();
    let tree = source();
    record_applied(&conn, &tree, "schema/1.0.0_create-users_up.sql");
    let catalog = Catalog::build(&tree).unwrap();
    assert_eq!(verify(&conn, &tree, &catalog, false).unwrap(), 1);
}

#[test]
fn test_verify_ignores_line_ending_and_whitespace_changes() {
    let conn = ready_conn();
    let mut tree = source();
    record_applied(&conn, &tree, "schema/1.0.0_create-users_up.sql");
    tree.insert(
        "schema/1.0.0_create-users_up.sql",
        "\r\n  CREATE TABLE users (id INT);\r\n\r\n",
    );
    let catalog = Catalog::build(&tree).unwrap();
    assert_eq!(verify(&conn, &tree, &catalog, false).unwrap(), 1);
}

#[test]
fn test_verify_detects_edited_up_script() {
    let conn = ready_conn();
    let mut tree = source();
    record_applied(&conn, &tree, "schema/1.0.0_create-users_up.sql");
    tree.insert(
        "schema/1.0.0_create-users_up.sql",
        "CREATE TABLE users (id BIGINT);",
    );
    let catalog = Catalog::build(&tree).unwrap();
    let err = verify(&conn, &tree, &catalog, false).unwrap_err();
    assert!(
        matches!(err, MigrateError::Corruption { ref path, .. } if path == "schema/1.0.0_create-users_up.sql")
    );
}

#[test]
fn test_verify_detects_removed_down_script() {
    let conn = ready_conn();
    let mut tree = source();
    record_applied(&conn, &tree, "schema/1.0.0_create-users_up.sql");
    tree.remove("schema/1.0.0_create-users_down.sql");
    let catalog = Catalog::build(&tree).unwrap();
    let err = verify(&conn, &tree, &catalog, false).unwrap_err();
    assert!(matches!(err, MigrateError::Corruption { .. }));
}

#[test]
fn test_verify_skips_unapplied_files() {
    let conn = ready_conn();
    let tree = source();
    let catalog = Catalog::build(&tree).unwrap();
    assert_eq!(verify(&conn, &tree, &catalog, false).unwrap(), 0);
}

#[test]
fn test_verify_requires_down_scripts_when_downgrade_enabled() {
    let conn = ready_conn();
    let tree = source();
    let catalog = Catalog::build(&tree).unwrap();
    let err = verify(&conn, &tree, &catalog, true).unwrap_err();
    assert!(matches!(err, MigrateError::MissingDownScript { .. }));
}
