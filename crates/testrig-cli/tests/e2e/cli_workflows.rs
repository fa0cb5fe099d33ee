//! E2E tests for complete CLI workflows

use std::process::{Command, Output};

const CLI_BINARY: &str = env!("CARGO_BIN_EXE_testrig");

fn run_command(args: &[&str]) -> Output {
    Command::new(CLI_BINARY)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap_or_else(|_| panic!("Failed to execute {CLI_BINARY}"))
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_sample_unit_full_run() {
    let output = run_command(&["TestClass"]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    let expected_tests = [
        "Running my test priority 10",
        "Running param test with default priority 5. Parameters: 10 Java 20 true",
        "Running param test with priority 3. Parameters: 5 Java 15 false",
        "Running my test priority 3",
        "Running my test priority second 3",
        "Running my test priority 2",
        "Running my test priority 1",
    ];

    let mut expected = vec!["----Setting up test suite static".to_string()];
    for test in expected_tests {
        expected.push("--Before test".to_string());
        expected.push(test.to_string());
        expected.push("--After test".to_string());
    }
    expected.push("----Tearing down test suite static".to_string());

    assert_eq!(lines, expected);
}

#[test]
fn test_default_unit_is_test_class() {
    let output = run_command(&[]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output).first().map(String::as_str),
        Some("----Setting up test suite static")
    );
}

#[test]
fn test_list_prints_plan_without_running() {
    let output = run_command(&["TestClass", "--list"]);

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "10 myTestPriority10()");
    assert_eq!(
        lines[1],
        " 5 parameterizedTestWithoutPriority(10, Java, 20, true)"
    );
    assert_eq!(lines[6], " 1 myTestPriority1()");
    assert!(!lines.iter().any(|l| l.contains("Setting up")));
}

#[test]
fn test_units_listing() {
    let output = run_command(&["--units"]);

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["TestClass", "MisconfiguredClass", "FailingClass"]
    );
}

#[test]
fn test_configuration_error_runs_nothing() {
    let output = run_command(&["MisconfiguredClass"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Priority in method tooUrgent must be between 1 and 10: 11"));
}

#[test]
fn test_failure_skips_after_suite() {
    let output = run_command(&["FailingClass"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Running failing test"));
    assert!(!stdout.contains("Running skipped test"));
    assert!(!stdout.contains("Tearing down failing suite"));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("@Test method fails failed"));
    assert!(stderr.contains("expected 4 but was 5"));
}

#[test]
fn test_teardown_on_failure_flag() {
    let output = run_command(&["FailingClass", "--teardown-on-failure"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Running skipped test"));
    assert!(stdout.contains("Tearing down failing suite"));
}

#[test]
fn test_unknown_unit() {
    let output = run_command(&["NoSuchClass"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown test unit: NoSuchClass"));
    assert!(stderr.contains("TestClass"));
}

#[test]
fn test_verbose_logs_invocations() {
    let output = run_command(&["TestClass", "--verbose"]);

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invoking"));
    assert!(stderr.contains("myTestPriority10"));
}
