use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn expenses(home: &Path, db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.env("HOME", home)
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db);
    cmd
}

fn setup() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("data").join("expenses.db");
    (dir, db)
}

#[test]
fn init_creates_database_and_saves_settings() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized expense store"));
    assert!(db.exists());

    let settings = std::fs::read_to_string(dir.path().join(".config/expense-tracker/settings.json")).unwrap();
    assert!(settings.contains("expenses.db"));
}

#[test]
fn add_then_list_round_trips() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["add", "2024-03-01", "42.5", "Food & Dining", "--note", "lunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added expense #"));

    let out = expenses(dir.path(), &db)
        .args(["--json", "list", "--from", "2024-03-01", "--to", "2024-03-01"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["amount"], 42.5);
    assert_eq!(rows[0]["category"], "Food & Dining");
    assert_eq!(rows[0]["subcategory"], "");
    assert_eq!(rows[0]["note"], "lunch");
}

#[test]
fn summary_totals_by_category() {
    let (dir, db) = setup();
    for (date, amount) in [("2024-01-10", "10"), ("2024-01-20", "20")] {
        expenses(dir.path(), &db)
            .args(["add", date, amount, "Travel"])
            .assert()
            .success();
    }

    let out = expenses(dir.path(), &db)
        .args(["--json", "summary", "--month", "2024-01"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let groups: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(
        groups,
        serde_json::json!([{"category": "Travel", "total_amount": 30.0, "count": 2}])
    );
}

#[test]
fn empty_range_lists_nothing() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["--json", "list", "--from", "2099-01-01", "--to", "2099-01-02"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn add_rejects_malformed_date() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["add", "03/01/2024", "5", "Other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected a YYYY-MM-DD date"));
}

#[test]
fn from_without_to_is_rejected() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["list", "--from", "2024-01-01"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--from requires --to"));
}

#[test]
fn unusable_store_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    // The database path is an existing directory.
    expenses(dir.path(), dir.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Storage init error"));
}

#[test]
fn categories_prints_defaults() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["--json", "categories"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bills & Utilities"));
}

#[test]
fn export_writes_csv() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["add", "2024-03-01", "42.5", "Food & Dining"])
        .assert()
        .success();
    let csv_path = dir.path().join("out.csv");
    expenses(dir.path(), &db)
        .args(["export", "--month", "2024-03", "--output"])
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 expenses"));
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.starts_with("id,date,amount,category,subcategory,note"));
    assert!(content.contains("2024-03-01,42.5,Food & Dining"));
}

#[test]
fn status_reports_count() {
    let (dir, db) = setup();
    expenses(dir.path(), &db)
        .args(["add", "2024-03-01", "1", "Other"])
        .assert()
        .success();
    expenses(dir.path(), &db)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expenses:    1"));
}
