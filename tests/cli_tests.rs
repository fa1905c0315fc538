use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Creates a scratch directory holding a config that points at a fresh log.
fn workspace(budget: f64) -> (PathBuf, PathBuf) {
    let dir = std::env::temp_dir().join(format!("expenses_cli_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let log = dir.join("expenses.csv");
    let config = dir.join("config.toml");
    let path = log.to_string_lossy();
    let content = format!("budget = {budget}\nexpense_file = {path:?}\n");
    std::fs::write(&config, content).unwrap();
    (dir, config)
}

fn expenses(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expenses").unwrap();
    cmd.arg("--config").arg(config);
    cmd
}

fn add(config: &Path, name: &str, amount: &str, category: &str) -> Assert {
    expenses(config)
        .args(["add", "--name", name, "--amount", amount])
        .args(["--category", category])
        .assert()
}

#[test]
fn add_then_summarize() {
    let (dir, config) = workspace(100.0);
    add(&config, "Coffee", "5", "food")
        .success()
        .stdout(predicate::str::contains("Saved expense: Coffee, Food"));
    add(&config, "Shirt", "20", "Clothing").success();

    expenses(&config)
        .args(["summary", "--month", "6", "--date", "2024-06-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Spent: $25.00"))
        .stdout(predicate::str::contains("Budget Per Day: $7.50"))
        .stdout(predicate::str::contains("  Clothing: 80.00%"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn unknown_category_is_rejected() {
    let (dir, config) = workspace(100.0);
    add(&config, "Flight", "300", "Travel")
        .failure()
        .stderr(predicate::str::contains("unknown category: Travel"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn summary_as_json() {
    let (dir, config) = workspace(50.0);
    add(&config, "Rent", "40", "rent").success();
    let output = expenses(&config)
        .args(["summary", "--json", "--date", "2024-02-29"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["selected_month"], 2);
    assert_eq!(value["remaining_budget"], 10.0);
    assert!(value["daily_budget"].is_null());
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn strict_summary_fails_on_malformed_log() {
    let (dir, config) = workspace(100.0);
    std::fs::write(dir.join("expenses.csv"), "Coffee,5,Food\nnot a record\n").unwrap();
    expenses(&config)
        .args(["summary", "--month", "1", "--date", "2024-01-10"])
        .assert()
        .success()
        .stderr(predicate::str::contains("malformed record at line 2"));
    expenses(&config)
        .args(["summary", "--month", "1", "--date", "2024-01-10"])
        .arg("--strict")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Rejected"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn set_budget_updates_config() {
    let (dir, config) = workspace(100.0);
    expenses(&config)
        .args(["set-budget", "750"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget set to $750.00"));
    let saved = std::fs::read_to_string(&config).unwrap();
    assert!(saved.contains("budget = 750.0"));
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn interactive_is_the_default() {
    let (dir, config) = workspace(100.0);
    expenses(&config)
        .write_stdin("3\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Expense Tracker Menu"));
    let _ = std::fs::remove_dir_all(dir);
}
