//! End-to-end tests running the `coverage-gate` binary.

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use std::process::Output;
use tempfile::TempDir;

const TWO_TARGET_REPORT: &str = indoc! {r#"
    {
      "coveredLines": 120,
      "executableLines": 140,
      "lineCoverage": 0.857,
      "targets": [
        {
          "buildProductPath": "/Build/Products/Debug-iphonesimulator/Cart.framework/Cart",
          "coveredLines": 29,
          "executableLines": 40,
          "lineCoverage": 0.725,
          "name": "Cart.framework",
          "files": [
            {
              "coveredLines": 29,
              "executableLines": 40,
              "functions": [
                {
                  "coveredLines": 29,
                  "executableLines": 40,
                  "executionCount": 2,
                  "lineCoverage": 0.725,
                  "lineNumber": 8,
                  "name": "Checkout.submit()"
                }
              ],
              "lineCoverage": 0.725,
              "name": "Checkout.swift",
              "path": "/repo/Cart/Sources/Checkout/Checkout.swift"
            }
          ]
        },
        {
          "buildProductPath": "/Build/Products/Debug-iphonesimulator/Home.framework/Home",
          "coveredLines": 91,
          "executableLines": 100,
          "lineCoverage": 0.91,
          "name": "Home.framework",
          "files": [
            {
              "coveredLines": 91,
              "executableLines": 100,
              "functions": [],
              "lineCoverage": 0.91,
              "name": "Foo.swift",
              "path": "/repo/Home/Sources/Feature/Foo.swift"
            }
          ]
        }
      ]
    }
"#};

fn workspace_with_report(report: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("report.json"), report).unwrap();
    dir
}

fn run_gate(dir: &TempDir, changes: &str, args: &[&str]) -> Output {
    let diff_command = format!("printf '%s\\n' {}", changes);
    Command::cargo_bin("coverage-gate")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("COVERAGE_GATE_DIFF_COMMAND")
        .env("NO_COLOR", "1")
        .args(["--plain", "--diff-command", &diff_command])
        .args(args)
        .output()
        .expect("Failed to execute coverage-gate")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_mixed_coverage_fails_with_both_lines() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    let output = run_gate(
        &dir,
        "Cart/Sources/Checkout/Checkout.swift Home/Sources/Feature/Foo.swift",
        &["report.json"],
    );

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "stdout: {}", text);
    assert!(text.contains("Code Coverage Report"));
    assert!(text.contains("[FAIL] [Cart.framework] Checkout.swift (72.50%)"));
    assert!(text.contains("[OK] [Home.framework] Foo.swift (91.00%)"));
    assert!(text.contains("Fail, please add code coverage in the files indicated above."));
}

#[test]
fn test_well_covered_changes_pass() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &["report.json"]);

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", text);
    assert!(text.trim_end().ends_with("Success"));
}

#[test]
fn test_no_changes_exits_before_reading_report() {
    let dir = TempDir::new().unwrap();
    let output = run_gate(&dir, "", &["does-not-exist.json"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("No changes found"));
}

#[test]
fn test_unmatched_change_does_not_fail() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    let output = run_gate(&dir, "X/Sources/Feature/Bar.swift", &["report.json"]);

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", text);
    assert!(text.contains("[MISSING] [X.framework] Bar.swift (no coverage data)"));
}

#[test]
fn test_leading_slash_change_goes_unmatched() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    let output = run_gate(&dir, "/Sources/Feature/Foo.swift", &["report.json"]);

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", text);
    assert!(text.contains("[MISSING] [.framework] Foo.swift (no coverage data)"));
}

#[test]
fn test_short_path_truncates_remaining_changes() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    // The failing Checkout.swift comes after the short path and is never seen
    let output = run_gate(
        &dir,
        "Home/Sources/Feature/Foo.swift Cart/Checkout.swift Cart/Sources/Checkout/Checkout.swift",
        &["report.json"],
    );

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", text);
    assert!(!text.contains("Checkout.swift"));
}

#[test]
fn test_non_source_change_is_fatal() {
    let dir = workspace_with_report(TWO_TARGET_REPORT);
    let output = run_gate(&dir, "Home/Resources/Assets/Logo.png", &["report.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("is not a valid swift source file"));
}

#[test]
fn test_missing_argument_prints_usage() {
    let dir = TempDir::new().unwrap();
    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &[]);

    assert_eq!(output.status.code(), Some(1));
    let text = stdout(&output);
    assert!(text.contains("Incorrect parameters."));
    assert!(text.contains("Usage: coverage-gate file.JSON"));
}

#[test]
fn test_two_arguments_print_usage() {
    let dir = TempDir::new().unwrap();
    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &["a.json", "b.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Incorrect parameters."));
}

#[test]
fn test_unreadable_report_fails() {
    let dir = TempDir::new().unwrap();
    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &["missing.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: Invalid JSON at path:"));
}

#[test]
fn test_schema_mismatch_fails() {
    let dir = workspace_with_report(r#"{"coveredLines": 1, "targets": []}"#);
    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &["report.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Error: Could not decode the report."));
}

#[test]
fn test_config_file_changes_target_suffix() {
    let report = TWO_TARGET_REPORT.replace("Home.framework\"", "Home.bundle\"");
    let dir = workspace_with_report(&report);
    fs::write(
        dir.path().join(".coverage-gate.toml"),
        "target_suffix = \".bundle\"\n",
    )
    .unwrap();

    let output = run_gate(&dir, "Home/Sources/Feature/Foo.swift", &["report.json"]);

    let text = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {}", text);
    assert!(text.contains("[OK] [Home.bundle] Foo.swift (91.00%)"));
}
