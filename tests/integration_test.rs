//! Integration tests for the fint CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[allow(deprecated)]
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("fint").unwrap();
    cmd.env("TERM", "dumb")
        .env_remove("FINT_CONFIG")
        .env_remove("FINT_LOCALE")
        .env_remove("FINT_TARGET")
        .env_remove("RUST_LOG");
    cmd
}

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn config_dir() -> PathBuf {
    fixtures().join("config")
}

fn objc_src() -> PathBuf {
    fixtures().join("src").join("objc")
}

// ============================================================================
// Argument and configuration errors
// ============================================================================

#[test]
fn test_missing_source_directory() {
    get_cmd()
        .args(["-i", "objc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: source directory is required."))
        .stderr(predicate::str::contains("fint: error while executing lint"));
}

#[test]
fn test_missing_target_id() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: ID of the rule set is required."));
}

#[test]
fn test_no_matching_target() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: no matching target to [foo]"));
}

#[test]
fn test_missing_config_dir() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .current_dir(temp_dir.path())
        .args(["-s", ".", "-i", "objc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: config directory not found"));
}

// ============================================================================
// Checking
// ============================================================================

#[test]
fn test_empty_source_directory_succeeds() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .arg("-s")
        .arg(temp_dir.path())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_reports_violations() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "Dirty.m:7:1: warning: Use DLog instead of NSLog\n",
        ))
        .stdout(predicate::str::contains(
            "Dirty.m:8:1: warning: Put a space between '}' and 'else'\n",
        ))
        .stdout(predicate::str::contains("Dirty.m:6:1: warning: Use 4 spaces instead of tabs\n"))
        .stdout(predicate::str::contains("Clean.m").not())
        .stdout(predicate::str::contains("README.txt").not())
        .stdout(predicate::str::ends_with("\n7 warnings generated.\n"));
}

#[test]
fn test_single_long_line() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("long.m"), "x".repeat(85)).unwrap();

    get_cmd()
        .arg("-s")
        .arg(temp_dir.path())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "long.m:1:1: warning: Line length exceeds 80 characters\n",
        ))
        .stdout(predicate::str::ends_with("\n1 warning generated.\n"));
}

#[test]
fn test_localized_messages() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "-l", "ja"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("NSLogではなくDLogを使用してください"))
        .stdout(predicate::str::contains("'}'と'else'の間にスペースを入れてください"))
        // No Japanese message for the indent rule, English is used
        .stdout(predicate::str::contains("Use 4 spaces instead of tabs"));
}

#[test]
fn test_environment_defaults() {
    get_cmd()
        .env("FINT_CONFIG", config_dir())
        .env("FINT_TARGET", "objc")
        .arg("-s")
        .arg(objc_src())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("7 warnings generated."));
}

#[test]
fn test_quiet_prints_nothing() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "-q"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_json_output() {
    let output = get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "--format", "json"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["target"], "objc");
    assert_eq!(json["total_count"], 7);
    assert_eq!(json["files_checked"], 2);
    assert_eq!(json["violations"][0]["line"], 6);
    assert_eq!(json["violations"][0]["rule_id"], "tabs");
}

#[test]
fn test_parallel_output_matches() {
    let run = |jobs: &str| {
        get_cmd()
            .arg("-s")
            .arg(objc_src())
            .arg("-c")
            .arg(config_dir())
            .args(["-i", "objc", "-j", jobs])
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run("1"), run("4"));
}

#[test]
fn test_buffer_size_too_small() {
    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "--buffer-size", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: too long line:"));
}

// ============================================================================
// HTML report
// ============================================================================

#[test]
fn test_html_report() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report");

    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "-q", "-h"])
        .arg(&report)
        .assert()
        .code(1);

    assert!(report.join("index.html").is_file());
    assert!(report.join("src/Classes/Dirty.m.html").is_file());
    assert!(report.join("src/Classes/Clean.m.html").is_file());
    assert!(!report.join("src/README.txt.html").exists());

    let page = fs::read_to_string(report.join("src/Classes/Dirty.m.html")).unwrap();
    assert!(page.contains("Use DLog instead of NSLog"));
}

#[test]
fn test_html_report_dir_exists() {
    let temp_dir = TempDir::new().unwrap();
    let report = temp_dir.path().join("report");
    fs::create_dir(&report).unwrap();

    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "-h"])
        .arg(&report)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "fint: report directory already exists. use `-f` option to force reporting.",
        ));

    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "-q", "-f", "-h"])
        .arg(&report)
        .assert()
        .code(1);

    assert!(report.join("index.html").is_file());
}

#[test]
fn test_html_report_unknown_template() {
    let temp_dir = TempDir::new().unwrap();

    get_cmd()
        .arg("-s")
        .arg(objc_src())
        .arg("-c")
        .arg(config_dir())
        .args(["-i", "objc", "--template", "fancy", "-h"])
        .arg(temp_dir.path().join("report"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("fint: report template not found: fancy"));
}

#[test]
fn test_help_and_version() {
    get_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--fix"));

    get_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
