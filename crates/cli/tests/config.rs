// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn init_then_show_masks_token() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("handoff").join("config.toml");

    handoff()
        .arg("--config")
        .arg(&path)
        .args(["config", "init", "--url", "https://ops.example.com/api"])
        .args(["--username", "ana", "--role", "coordinator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote config to"));

    handoff()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .env("HANDOFF_TOKEN", "s3cret")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://ops.example.com/api"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn init_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "https://a.example", "user");

    handoff_with(&path)
        .args(["config", "init", "--url", "https://b.example"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn init_rejects_unknown_role() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    handoff_with(&path)
        .args(["config", "init", "--url", "https://ops.example.com", "--role", "boss"])
        .assert()
        .code(1);
    assert!(!path.exists());
}

#[test]
fn missing_config_hints_init() {
    let temp = TempDir::new().unwrap();

    handoff_with(&temp.path().join("none.toml"))
        .args(["notes", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("handoff config init"));
}

#[test]
fn env_config_path_is_used() {
    let temp = TempDir::new().unwrap();
    write_config(&temp, "https://ops.example.com", "admin");

    handoff()
        .env("HANDOFF_CONFIG", temp.path().join("config.toml"))
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("role = \"admin\""));
}

#[test]
fn completion_generates_script() {
    handoff()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handoff"));
}
