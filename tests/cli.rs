//! Exit-status behaviour of the `vmgate` binary

#![cfg(unix)]

mod common;

use common::{write_fake_launcher, OPEN_BANNER, ORACLE_BANNER};
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn vmgate(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vmgate"))
        .args(args)
        .current_dir(cwd)
        .env_remove("VMGATE_RELEASE_VERSION")
        .env_remove("VMGATE_GRAALVM_HOME")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_config(dir: &Path, release: &str, components: &str) {
    fs::write(
        dir.join("vmgate.toml"),
        format!(
            "release_version = \"{release}\"\ngraalvm_home = \"{}\"\ncomponents = [{components}]\n",
            dir.display()
        ),
    )
    .unwrap();
}

#[test]
#[serial]
fn test_gate_passes_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_launcher(temp_dir.path(), 0, OPEN_BANNER);
    write_config(temp_dir.path(), "22.3.0", "");

    let out = vmgate(temp_dir.path(), &["gate", "--strict-mode"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(String::from_utf8_lossy(&out.stdout).contains("Gate passed"));
}

#[test]
#[serial]
fn test_gate_fails_on_policy_violation() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_launcher(temp_dir.path(), 0, ORACLE_BANNER);
    write_config(temp_dir.path(), "22.3.0", "");

    let out = vmgate(temp_dir.path(), &["gate", "--strict-mode"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("strict mode"));

    let relaxed = vmgate(temp_dir.path(), &["gate"]);
    assert!(relaxed.status.success());
}

#[test]
#[serial]
fn test_release_flag_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    write_fake_launcher(temp_dir.path(), 0, OPEN_BANNER);
    write_config(temp_dir.path(), "22.3.0", "");

    let out = vmgate(temp_dir.path(), &["gate", "--release-version", "22.2.0"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("got '22.3.0', expected '22.2.0'"));
}

#[test]
#[serial]
fn test_missing_release_version_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = vmgate(temp_dir.path(), &["gate"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("release version"));
}

#[test]
#[serial]
fn test_tasks_lists_js_task() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "22.3.0", "\"js\"");

    let out = vmgate(temp_dir.path(), &["tasks", "--tags", "graal-js"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Vm: Basic GraalVM Tests"));
    assert!(stdout.contains("Vm: Graal.js tests"));
}

#[test]
#[serial]
fn test_js_only_gate_needs_no_image_location() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("vmgate.toml"),
        "release_version = \"22.3.0\"\ncomponents = [\"js\"]\n",
    )
    .unwrap();

    let out = vmgate(temp_dir.path(), &["gate", "--tags", "graal-js"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Gate passed (1 run, 1 skipped)"));
}
