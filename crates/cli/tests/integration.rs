//! Integration tests for the bu CLI
//!
//! These tests spawn the actual binary against a seeded temporary SQLite
//! database. No external services are required; the overwrite prompt is
//! exercised through its non-interactive fallback (a non-tty stdin counts
//! as a declined confirmation).

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use bu_store::{SqliteUserStore, ensure_schema};

/// Get the path to the bu binary
fn bu_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_bu"))
}

/// Run bu with an isolated config and working directory
fn run_bu(args: &[&str], config_dir: &Path) -> Output {
    Command::new(bu_binary())
        .args(args)
        .env("XDG_CONFIG_HOME", config_dir)
        .current_dir(config_dir)
        .output()
        .expect("Failed to execute bu command")
}

/// Create a database file with the standard seed set:
/// alice (banned, active), bob (banned, deleted), carol (not banned),
/// dave (banned, admin).
async fn seed_database(dir: &Path) -> PathBuf {
    let db_path = dir.join("users.db");
    std::fs::File::create(&db_path).unwrap();

    let store = SqliteUserStore::open(&db_path).await.unwrap();
    let pool = store.pool();
    ensure_schema(pool).await.unwrap();

    let users: [(i64, &str, Option<&str>, Option<&str>); 4] = [
        (1, "alice@example.com", Some("2023-01-01T00:00:00Z"), None),
        (
            2,
            "bob@example.com",
            Some("2023-01-01T00:00:00Z"),
            Some("2024-05-01T00:00:00Z"),
        ),
        (3, "carol@example.com", Some("2023-01-01T00:00:00Z"), None),
        (4, "dave@example.com", Some("2023-01-01T00:00:00Z"), None),
    ];
    for (id, email, activated_at, deleted_at) in users {
        let banned_at = (id != 3).then_some("2024-03-01T10:00:00Z");
        sqlx::query(
            "INSERT INTO users (id, email, banned_at, activated_at, deleted_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(email)
        .bind(banned_at)
        .bind(activated_at)
        .bind(deleted_at)
        .execute(pool)
        .await
        .unwrap();
    }

    sqlx::query("INSERT INTO roles (id, name) VALUES (1, 'admin')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO roles_users (role_id, user_id) VALUES (1, 4)")
        .execute(pool)
        .await
        .unwrap();

    db_path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[tokio::test]
async fn test_get_prints_banned_users_table() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;

    let output = run_bu(
        &["get", "--database", db.to_str().unwrap()],
        temp_dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("alice@example.com"));
    assert!(out.contains("dave@example.com"));
    // bob is soft-deleted, carol is not banned
    assert!(!out.contains("bob@example.com"));
    assert!(!out.contains("carol@example.com"));
}

#[tokio::test]
async fn test_incompatible_flags_exit_with_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;

    let output = run_bu(
        &[
            "get",
            "--database",
            db.to_str().unwrap(),
            "--no-admin",
            "--admin-only",
        ],
        temp_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--no-admin"));
}

#[tokio::test]
async fn test_incompatible_flags_rejected_before_database_is_opened() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.db");

    // even with an unreachable database the usage error must win
    let output = run_bu(
        &[
            "get",
            "--database",
            missing.to_str().unwrap(),
            "--no-admin",
            "--admin-only",
        ],
        temp_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--no-admin"));
    assert!(!stderr(&output).contains("does not exist"));
}

#[tokio::test]
async fn test_bad_sort_field_exits_with_usage_error() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;

    // positional order is save-to then sort-by
    let target = temp_dir.path().join("unused.csv");
    let output = run_bu(
        &[
            "get",
            "--database",
            db.to_str().unwrap(),
            target.to_str().unwrap(),
            "name",
        ],
        temp_dir.path(),
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(!target.exists());
    assert!(stderr(&output).contains("must be one of"));
}

#[tokio::test]
async fn test_save_to_creates_file_and_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;
    let target = temp_dir.path().join("out/file.csv");

    let output = run_bu(
        &[
            "get",
            "--database",
            db.to_str().unwrap(),
            "--with-headers",
            target.to_str().unwrap(),
        ],
        temp_dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(&target.display().to_string()));

    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.starts_with("id;email;banned_at\n"));
    assert!(content.contains("alice@example.com"));
}

#[tokio::test]
async fn test_empty_save_to_writes_no_file() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;

    let output = run_bu(&["get", "--database", db.to_str().unwrap(), ""], temp_dir.path());

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("alice@example.com"));
    // the working directory must not pick up a default-named export
    assert!(!temp_dir.path().join("banned_users.csv").exists());
}

#[tokio::test]
async fn test_declined_overwrite_keeps_file_and_exits_zero() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;
    let target = temp_dir.path().join("out.csv");
    std::fs::write(&target, "original").unwrap();

    // stdin is not a tty, so the confirmation falls back to "no"
    let output = run_bu(
        &[
            "get",
            "--database",
            db.to_str().unwrap(),
            target.to_str().unwrap(),
        ],
        temp_dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(std::fs::read_to_string(&target).unwrap(), "original");
    assert!(stderr(&output).contains("not overridden"));
}

#[tokio::test]
async fn test_force_overwrites_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;
    let target = temp_dir.path().join("out.csv");
    std::fs::write(&target, "original").unwrap();

    let output = run_bu(
        &[
            "get",
            "--database",
            db.to_str().unwrap(),
            "--force",
            target.to_str().unwrap(),
        ],
        temp_dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let content = std::fs::read_to_string(&target).unwrap();
    assert!(content.contains("alice@example.com"));
}

#[tokio::test]
async fn test_json_output_lists_users_and_total() {
    let temp_dir = TempDir::new().unwrap();
    let db = seed_database(temp_dir.path()).await;

    let output = run_bu(
        &["get", "--json", "--database", db.to_str().unwrap()],
        temp_dir.path(),
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let parsed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(parsed["total"], 2);
    assert_eq!(parsed["users"][0]["email"], "alice@example.com");
    assert_eq!(parsed["users"][1]["email"], "dave@example.com");
}

#[tokio::test]
async fn test_missing_database_exits_with_store_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.db");

    let output = run_bu(
        &["get", "--database", missing.to_str().unwrap()],
        temp_dir.path(),
    );

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("does not exist"));
}
