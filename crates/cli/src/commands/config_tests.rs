// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use tempfile::TempDir;

#[test]
fn init_writes_loadable_config() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("config.toml");

    init(&path, " https://ops.example.com/api ", "ana", Role::Coordinator, false).unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.api.base_url, "https://ops.example.com/api");
    assert_eq!(config.session.username, "ana");
    assert_eq!(config.session.role, Role::Coordinator);
}

#[test]
fn init_refuses_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    init(&path, "https://a.example", "ana", Role::User, false).unwrap();

    let err = init(&path, "https://b.example", "ana", Role::User, false).unwrap_err();
    assert!(err.to_string().contains("--force"));
    assert_eq!(Config::load(&path).unwrap().api.base_url, "https://a.example");

    init(&path, "https://b.example", "ana", Role::User, true).unwrap();
    assert_eq!(Config::load(&path).unwrap().api.base_url, "https://b.example");
}

#[test]
fn init_rejects_invalid_url_without_writing() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");

    let err = init(&path, "ops.example.com", "ana", Role::User, false).unwrap_err();
    assert!(err.to_string().contains("http://"));
    assert!(!path.exists());
}

#[test]
fn show_masks_token() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    let mut config = Config::new("https://ops.example.com", "ana", Role::Admin);
    config.api.token = Some("s3cret".to_string());
    config.save(&path).unwrap();

    let (shown_path, rendered) = show(Some(&path)).unwrap();
    assert_eq!(shown_path, path);
    assert!(rendered.contains("********"));
    assert!(!rendered.contains("s3cret"));
}

#[test]
fn show_without_config_hints_init() {
    let temp = TempDir::new().unwrap();
    let err = show(Some(&temp.path().join("missing.toml"))).unwrap_err();
    assert!(err.to_string().contains("handoff config init"));
}
