//! Integration tests for the ptz CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use ptz::testing::DatasetBuilder;
use ptz::{DataStore, TaskStatus};

const TODAY: &str = "2026-10-19";

/// Get a Command for the ptz binary, isolated in `temp`
fn ptz(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ptz"));
    cmd.arg("--project")
        .arg(temp.path())
        .env("PTZ_TODAY", TODAY)
        .env("NO_COLOR", "1")
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env_remove("PTZ_DATA");
    cmd
}

fn run_ok(temp: &TempDir, args: &[&str]) {
    ptz(temp).args(args).assert().success();
}

fn add_areas(temp: &TempDir, names: &[&str]) {
    for name in names {
        run_ok(temp, &["add-focus", name]);
    }
}

#[test]
fn test_help() {
    Command::new(cargo::cargo_bin!("ptz"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rank focus areas"));
}

#[test]
fn test_version() {
    Command::new(cargo::cargo_bin!("ptz"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_show_empty_dataset() {
    let temp = TempDir::new().unwrap();
    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== PTZ Focus Areas ==="))
        .stdout(predicate::str::contains(
            "No focus areas yet. Add one with: ptz add-focus <name>",
        ));
    assert!(!temp.path().join("priorities.json").exists());
}

#[test]
fn test_add_focus_writes_default_data_file() {
    let temp = TempDir::new().unwrap();
    ptz(&temp)
        .args(["add-focus", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added focus area: Work (position 1)"));
    ptz(&temp)
        .args(["add-focus", "Home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added focus area: Home (position 2)"));

    let data = DataStore::new(temp.path().join("priorities.json"))
        .load()
        .unwrap();
    let names: Vec<_> = data.focus_areas.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Work", "Home"]);
}

#[test]
fn test_duplicate_focus_area_rejected() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work"]);
    ptz(&temp)
        .args(["add-focus", "work"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Focus area already exists: work"));
}

#[test]
fn test_data_flag_overrides_location() {
    let temp = TempDir::new().unwrap();
    let custom = temp.path().join("elsewhere").join("mine.json");
    ptz(&temp)
        .arg("--data")
        .arg(&custom)
        .args(["add-focus", "Work"])
        .assert()
        .success();
    assert!(custom.exists());
    assert!(!temp.path().join("priorities.json").exists());
}

#[test]
fn test_wip_limit_rejection() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["A", "B", "C"]);
    run_ok(&temp, &["add-task", "A", "a1", "--status", "in_progress"]);
    run_ok(&temp, &["add-task", "B", "b1", "--status", "in-progress"]);
    run_ok(&temp, &["add-task", "B", "b2", "-s", "in-progress"]);

    ptz(&temp)
        .args(["add-task", "C", "c1", "--status", "in-progress"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("WIP limit reached (3/3)"));

    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 3/3 in progress, 0 pending, 0 done"))
        .stdout(predicate::str::contains("c1").not());
}

#[test]
fn test_red_zone_rejection_on_update() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["A", "B", "C", "D", "E", "F"]);
    run_ok(&temp, &["add-task", "F", "someday"]);

    ptz(&temp)
        .args(["update-task", "F", "someday", "--status", "in-progress"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Cannot set in-progress in red zone"));

    run_ok(&temp, &["reorder-focus", "F", "-p", "2"]);
    ptz(&temp)
        .args(["update-task", "F", "someday", "--status", "in-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: someday"));
}

#[test]
fn test_reorder_focus() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["A", "B", "C", "D", "E"]);
    ptz(&temp)
        .args(["reorder-focus", "E", "--position", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved E to position 1"));

    ptz(&temp)
        .args(["reorder-focus", "E", "-p", "9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Invalid position: 9 (must be 1-5)"));

    let out = ptz(&temp).arg("show").output().unwrap();
    let stdout = String::from_utf8(out.stdout).unwrap();
    let e = stdout.find("#1 E").unwrap();
    let a = stdout.find("#2 A").unwrap();
    assert!(e < a);
}

#[test]
fn test_set_weekly_focus() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work", "Home", "Health"]);
    ptz(&temp)
        .args(["set-weekly-focus", "health"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set weekly focus: Health"));

    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Focus: Health (week of 2026-10-19)"))
        .stdout(predicate::str::contains("#1 Health ★ (0 active)"))
        .stdout(predicate::str::contains("#2 Work (0 active)"));
}

#[test]
fn test_remove_focus_clears_weekly_focus() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work", "Home"]);
    run_ok(&temp, &["set-weekly-focus", "Work"]);
    run_ok(&temp, &["add-task", "Work", "Review PR"]);

    ptz(&temp)
        .args(["remove-focus", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed focus area: Work"));

    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("Weekly Focus").not())
        .stdout(predicate::str::contains("Review PR").not());
}

#[test]
fn test_unknown_identifiers_are_not_found() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work"]);
    ptz(&temp)
        .args(["remove-focus", "Garden"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Focus area not found: Garden"));
    ptz(&temp)
        .args(["remove-task", "Work", "ghost"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Task not found: ghost"));
}

#[test]
fn test_task_lifecycle() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Admin"]);
    ptz(&temp)
        .args(["add-task", "admin", "Taxes", "--due", "2026-10-01", "--notes", "receipts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task \"Taxes\" to Admin"));

    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("○ Taxes [due: 2026-10-01] OVERDUE"))
        .stdout(predicate::str::contains(
            "[WARN] Overdue: \"Taxes\" in Admin (due: 2026-10-01)",
        ));

    run_ok(&temp, &["update-task", "Admin", "taxes", "--due", ""]);
    ptz(&temp)
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("OVERDUE").not());

    run_ok(&temp, &["update-task", "Admin", "Taxes", "--status", "done"]);
    ptz(&temp)
        .args(["remove-task", "Admin", "Taxes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: Taxes"));
}

#[test]
fn test_check_passes_on_healthy_data() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work"]);
    run_ok(&temp, &["add-task", "Work", "t", "--status", "in-progress"]);
    ptz(&temp)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Integrity Check ==="))
        .stdout(predicate::str::contains("All checks passed!"));
}

#[test]
fn test_check_fails_on_hand_edited_data() {
    let temp = TempDir::new().unwrap();
    let data = DatasetBuilder::new()
        .area("Work")
        .task("1", TaskStatus::InProgress)
        .task("2", TaskStatus::InProgress)
        .task("3", TaskStatus::InProgress)
        .task("4", TaskStatus::InProgress)
        .build();
    DataStore::new(temp.path().join("priorities.json"))
        .save(&data)
        .unwrap();

    ptz(&temp)
        .arg("check")
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[ERROR] WIP limit exceeded: 4 in-progress tasks (max 3)",
        ))
        .stdout(predicate::str::contains("Found 1 error(s), 0 warning(s)"));
}

#[test]
fn test_check_json() {
    let temp = TempDir::new().unwrap();
    let data = DatasetBuilder::new()
        .areas(["A", "B", "C", "D", "E", "F"])
        .task("stuck", TaskStatus::InProgress)
        .build();
    DataStore::new(temp.path().join("priorities.json"))
        .save(&data)
        .unwrap();

    let out = ptz(&temp).args(["check", "--json"]).output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let issues: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(issues[0]["level"], "error");
    assert_eq!(issues[0]["kind"], "red_zone");
}

#[test]
fn test_show_json() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work", "Home"]);
    run_ok(&temp, &["set-weekly-focus", "Home"]);

    let out = ptz(&temp).args(["show", "--json"]).output().unwrap();
    assert!(out.status.success());
    let view: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(view["areas"][0]["name"], "Home");
    assert_eq!(view["areas"][0]["color"], "gold");
    assert_eq!(view["areas"][1]["color"], "green");
    assert_eq!(view["weekly_focus"]["week_of"], TODAY);
}

#[test]
fn test_project_config_limits() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join(".ptz")).unwrap();
    std::fs::write(
        temp.path().join(".ptz").join("config.json"),
        r#"{ "limits": { "max_in_progress": 1 } }"#,
    )
    .unwrap();

    add_areas(&temp, &["Work"]);
    run_ok(&temp, &["add-task", "Work", "first", "--status", "in-progress"]);
    ptz(&temp)
        .args(["add-task", "Work", "second", "--status", "in-progress"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("WIP limit reached (1/1)"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join(".ptz")).unwrap();
    std::fs::write(
        temp.path().join(".ptz").join("config.json"),
        r#"{ "limits": { "max_in_progress": 0 } }"#,
    )
    .unwrap();

    ptz(&temp)
        .arg("show")
        .assert()
        .code(7)
        .stderr(predicate::str::contains("max_in_progress"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let temp = TempDir::new().unwrap();
    add_areas(&temp, &["Work"]);
    ptz(&temp)
        .args(["add-task", "Work", "t", "--due", "tomorrow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--due"));
}

#[test]
fn test_relative_data_path_resolves_against_project() {
    let temp = TempDir::new().unwrap();
    let cwd = TempDir::new().unwrap();
    ptz(&temp)
        .current_dir(cwd.path())
        .env("PTZ_DATA", "data/mine.json")
        .args(["add-focus", "Work"])
        .assert()
        .success();
    assert!(temp.path().join("data").join("mine.json").exists());
    assert!(!cwd.path().join("data").exists());
}

#[test]
fn test_missing_project_dir() {
    let temp = TempDir::new().unwrap();
    Command::new(cargo::cargo_bin!("ptz"))
        .arg("--project")
        .arg(temp.path().join("nope"))
        .arg("show")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("Project directory does not exist"));
}
