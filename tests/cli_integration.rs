//! CLI integration tests for timecard
//!
//! Each test runs against its own temporary hours directory and a scratch
//! HOME, so no user configuration leaks in.

use std::fs;
use std::path::PathBuf;

use chrono::Local;
use predicates::prelude::*;
use tempfile::TempDir;

use timecard_cli::domain::{Date, Month};
use timecard_cli::storage::active_month;

/// Get a command instance for the timecard binary
fn timecard_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("timecard"));
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .env("TIMECARD_HOURS_DIR", dir.path().join("hours"))
        .env_remove("VISUAL")
        .env("EDITOR", "true");
    cmd
}

/// The month and year the binary will target with default configuration
fn target_month() -> (u32, i32) {
    active_month(Local::now().naive_local().date(), 20, 0)
}

/// Path of the BRF file the binary will write to
fn month_file(dir: &TempDir) -> PathBuf {
    let (month, year) = target_month();
    dir.path()
        .join("hours")
        .join(format!("{}_{}.txt", Month::name_of(month).to_lowercase(), year))
}

fn today_str() -> String {
    Date::from_naive(Local::now().naive_local().date()).to_string()
}

// =============================================================================
// Recording
// =============================================================================

#[test]
fn test_add_records_a_block() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .args(["add", "08:00-12:00"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("08:00-12:00").and(predicate::str::contains("Total: 04:00")),
        );

    assert!(month_file(&dir).is_file());
}

#[test]
fn test_add_merges_overlapping_ranges() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir).args(["add", "08:00-12:00"]).assert().success();
    timecard_cmd(&dir).args(["add", "10-13"]).assert().success();

    timecard_cmd(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("08:00-13:00").and(predicate::str::contains("Total: 05:00")),
        );
}

#[test]
fn test_add_accepts_midnight_crossing_ranges() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .args(["add", "23-02"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("23:00-02:00").and(predicate::str::contains("Total: 03:00")),
        );
}

#[test]
fn test_add_on_a_specific_day() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .args(["add", "--day", "03.05.15", "08:00-09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("03.05.15"));

    timecard_cmd(&dir)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("03.05.15   08:00-09:30   Total: 01:30"));
}

#[test]
fn test_add_yesterday() {
    let dir = TempDir::new().unwrap();
    let yesterday = Date::from_naive(
        Local::now()
            .naive_local()
            .date()
            .pred_opt()
            .unwrap(),
    )
    .to_string();

    timecard_cmd(&dir)
        .args(["add", "--yesterday", "08-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&yesterday));
}

#[test]
fn test_add_tags() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .args(["add", "--tags", "chrank, WI", "08-09"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[CHRANK, WI]"));
}

#[test]
fn test_add_rejects_invalid_ranges() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .args(["add", "25:99-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid block range"));
}

#[test]
fn test_add_without_arguments_fails() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir)
        .arg("add")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to record"));
}

#[test]
fn test_remove_splits_a_block() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir).args(["add", "08-18"]).assert().success();
    timecard_cmd(&dir)
        .args(["remove", "12:00-13:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "08:00-12:00   13:00-18:00   Total: 09:00",
        ));
}

// =============================================================================
// Show and stats
// =============================================================================

#[test]
fn test_show_is_the_default_command() {
    let dir = TempDir::new().unwrap();
    let (month, year) = target_month();

    timecard_cmd(&dir)
        .assert()
        .success()
        .stdout(
            predicate::str::contains(format!("{} {}", Month::name_of(month), year))
                .and(predicate::str::contains(today_str())),
        );
}

#[test]
fn test_show_raw_prints_the_file_verbatim() {
    let dir = TempDir::new().unwrap();
    let (month, year) = target_month();

    timecard_cmd(&dir)
        .args(["show", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{} {}\n",
            Month::name_of(month),
            year
        )));
}

#[test]
fn test_show_json_lists_days() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir).args(["add", "08:00-12:15"]).assert().success();

    let output = timecard_cmd(&dir)
        .args(["show", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let days = json["days"].as_array().unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0]["date"], today_str());
    assert_eq!(days[0]["total"], "04:15");
    assert_eq!(days[0]["today"], true);
}

#[test]
fn test_stats_summarizes_the_month() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir).args(["add", "08:00-12:00"]).assert().success();

    timecard_cmd(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Days worked:   1")
                .and(predicate::str::contains("Month total:   04:00")),
        );
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn test_fmt_is_idempotent_on_messy_files() {
    let dir = TempDir::new().unwrap();
    let path = month_file(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(
        &path,
        format!(
            "{} 16:00-18:00 08:00-12:30 10:00-13:00 Total: 99:99\n",
            today_str()
        ),
    )
    .unwrap();

    timecard_cmd(&dir).arg("fmt").assert().success();
    let once = fs::read_to_string(&path).unwrap();
    assert!(once.contains("08:00-13:00   16:00-18:00   Total: 07:00"));

    timecard_cmd(&dir).arg("fmt").assert().success();
    let twice = fs::read_to_string(&path).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_fmt_drops_empty_days() {
    let dir = TempDir::new().unwrap();

    timecard_cmd(&dir).args(["add", "08-09"]).assert().success();
    timecard_cmd(&dir).args(["remove", "08-09"]).assert().success();
    timecard_cmd(&dir).arg("fmt").assert().success();

    let text = fs::read_to_string(month_file(&dir)).unwrap();
    assert!(!text.contains(&today_str()));
}

#[test]
fn test_malformed_file_is_rejected_with_line_context() {
    let dir = TempDir::new().unwrap();
    let path = month_file(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "gibberish line\n").unwrap();

    timecard_cmd(&dir)
        .arg("show")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("Couldn't parse")
                .and(predicate::str::contains("could not parse line 1")),
        );
}

// =============================================================================
// Upkeep
// =============================================================================

#[test]
fn test_backup_copies_the_month_file() {
    let dir = TempDir::new().unwrap();
    let dest = dir.path().join("copy.txt");

    timecard_cmd(&dir).args(["add", "08-09"]).assert().success();
    timecard_cmd(&dir)
        .args(["backup", dest.to_str().unwrap()])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&dest).unwrap(),
        fs::read_to_string(month_file(&dir)).unwrap()
    );
}

#[test]
fn test_config_generates_a_default_file() {
    let dir = TempDir::new().unwrap();

    let output = timecard_cmd(&dir)
        .args(["config", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let line = stdout.lines().last().unwrap();
    let json: serde_json::Value = serde_json::from_str(line).unwrap();
    let path = PathBuf::from(json["path"].as_str().unwrap());
    assert!(path.is_file());
    assert!(fs::read_to_string(path).unwrap().contains("hand_in_day"));
}
