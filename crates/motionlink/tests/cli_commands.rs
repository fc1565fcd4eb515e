#![cfg(feature = "cli")]

use std::process::Command;

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_motionlink"));
    // Keep the environment from leaking serial settings into the tests.
    cmd.env_remove("MOTIONLINK_PORT").env_remove("MOTIONLINK_BAUD");
    cmd
}

#[test]
fn version_prints_package_version() {
    let output = bin().arg("version").output().expect("version should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn ports_json_output_is_machine_readable() {
    let output = bin()
        .args(["--format", "json", "ports"])
        .output()
        .expect("ports should run");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("ports output should be JSON");
    assert!(parsed.is_array());
}

#[test]
fn drive_reports_open_failure_once() {
    let output = bin()
        .args([
            "--log-level",
            "error",
            "drive",
            "--port",
            "ZZ99",
            "--duration",
            "1s",
        ])
        .output()
        .expect("drive should run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("open failed"));
}

#[test]
fn drive_rejects_wrong_axis_count_before_opening() {
    let output = bin()
        .args(["drive", "--port", "ZZ99", "--axes", "1,2,3"])
        .output()
        .expect("drive should run");

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exactly 6 values"));
}

#[test]
fn monitor_without_port_is_a_usage_error() {
    let output = bin().arg("monitor").output().expect("monitor should run");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn home_reports_open_failure() {
    let output = bin()
        .args(["--log-level", "error", "home", "--port", "ZZ99"])
        .output()
        .expect("home should run");

    assert_eq!(output.status.code(), Some(1));
}
