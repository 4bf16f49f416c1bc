//! Integration tests for sweeper CLI

use filetime::FileTime;
use std::path::Path;
use std::process::{Command, Output};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

const DAY: u64 = 24 * 60 * 60;

fn sweeper(config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sweeper"))
        .arg("--config")
        .arg(config)
        .env_remove("SWEEPER_LOG_FILE")
        .env_remove("SWEEPER_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute sweeper")
}

fn write_aged(path: &Path, days_old: u64) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"data").unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(days_old * DAY);
    filetime::set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

fn write_config(dir: &Path, locations: &str) -> std::path::PathBuf {
    let config = dir.join("config.json");
    let log_file = dir.join("sweeper.log");
    std::fs::write(
        &config,
        format!(
            r#"{{ "log_file": {:?}, "locations": [ {locations} ] }}"#,
            log_file.display().to_string()
        ),
    )
    .unwrap();
    config
}

fn location(path: &Path, days: u32, action: &str, target: Option<&Path>) -> String {
    match target {
        Some(target) => format!(
            r#"{{ "path": {:?}, "days": {days}, "action": "{action}", "target": {:?} }}"#,
            path.display().to_string(),
            target.display().to_string()
        ),
        None => format!(
            r#"{{ "path": {:?}, "days": {days}, "action": "{action}" }}"#,
            path.display().to_string()
        ),
    }
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_sweeper"))
        .arg("--version")
        .output()
        .expect("Failed to execute sweeper");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sweeper"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_sweeper"))
        .arg("--help")
        .output()
        .expect("Failed to execute sweeper");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Age-based file retention sweeper"));
    assert!(stdout.contains("--config"));
}

#[test]
fn test_missing_config_fails() {
    let temp = TempDir::new().unwrap();
    let output = sweeper(&temp.path().join("absent.json"));

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file not found"));
}

#[test]
fn test_invalid_action_fails_before_sweeping() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("data");
    write_aged(&source.join("old.txt"), 100);
    let config = write_config(temp.path(), &location(&source, 1, "shred", None));

    let output = sweeper(&config);

    assert_eq!(output.status.code(), Some(1));
    assert!(source.join("old.txt").exists());
}

#[test]
fn test_unwritable_log_file_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.json");
    let log_file = temp.path().join("no-such-dir").join("sweeper.log");
    std::fs::write(
        &config,
        format!(
            r#"{{ "log_file": {:?}, "locations": [] }}"#,
            log_file.display().to_string()
        ),
    )
    .unwrap();

    let output = sweeper(&config);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to open log file"));
}

#[test]
fn test_sweep_deletes_and_moves() {
    let temp = TempDir::new().unwrap();
    let logs = temp.path().join("logs");
    let inbox = temp.path().join("inbox");
    let archive = temp.path().join("archive");
    write_aged(&logs.join("old.log"), 40);
    write_aged(&logs.join("new.log"), 2);
    write_aged(&inbox.join("2024/report.csv"), 20);

    let config = write_config(
        temp.path(),
        &format!(
            "{}, {}",
            location(&logs, 30, "delete", None),
            location(&inbox, 7, "move", Some(&archive))
        ),
    );

    let output = sweeper(&config);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(!logs.join("old.log").exists());
    assert!(logs.join("new.log").exists());
    assert!(archive.join("2024/report.csv").exists());
    assert!(!inbox.join("2024/report.csv").exists());

    let log = std::fs::read_to_string(temp.path().join("sweeper.log")).unwrap();
    assert!(log.contains("File deleted"));
    assert!(log.contains("File moved"));
    assert!(log.contains("Location swept"));
    assert!(!log.contains("new.log"));
}

#[test]
fn test_log_file_is_appended() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("data");
    std::fs::create_dir_all(&source).unwrap();
    let config = write_config(temp.path(), &location(&source, 1, "delete", None));

    assert!(sweeper(&config).status.success());
    let first = std::fs::read_to_string(temp.path().join("sweeper.log")).unwrap();
    assert!(sweeper(&config).status.success());
    let second = std::fs::read_to_string(temp.path().join("sweeper.log")).unwrap();

    assert!(second.len() > first.len());
    assert!(second.starts_with(&first));
}

#[test]
fn test_missing_source_stops_the_run() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    let later = temp.path().join("later");
    write_aged(&later.join("old.txt"), 50);

    let config = write_config(
        temp.path(),
        &format!(
            "{}, {}",
            location(&missing, 1, "delete", None),
            location(&later, 1, "delete", None)
        ),
    );

    let output = sweeper(&config);

    assert_eq!(output.status.code(), Some(1));
    assert!(later.join("old.txt").exists());

    let log = std::fs::read_to_string(temp.path().join("sweeper.log")).unwrap();
    assert!(log.contains("Walk failed"));
    assert!(log.contains("Operation failed"));
}

#[test]
fn test_delete_target_is_logged_as_warning() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("data");
    std::fs::create_dir_all(&source).unwrap();
    let config = write_config(
        temp.path(),
        &location(&source, 1, "delete", Some(&temp.path().join("unused"))),
    );

    assert!(sweeper(&config).status.success());
    let log = std::fs::read_to_string(temp.path().join("sweeper.log")).unwrap();
    assert!(log.contains("WARN"));
    assert!(log.contains("ignored for delete locations"));
}
