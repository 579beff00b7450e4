// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use std::sync::Mutex;

// Serializes tests that modify process environment.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_vars_constants() {
    assert_eq!(vars::HANDOFF_CONFIG, "HANDOFF_CONFIG");
    assert_eq!(vars::HANDOFF_API_URL, "HANDOFF_API_URL");
    assert_eq!(vars::HANDOFF_TOKEN, "HANDOFF_TOKEN");
    assert_eq!(vars::HANDOFF_LOG, "HANDOFF_LOG");
}

#[test]
fn test_config_path_set() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::set_var(vars::HANDOFF_CONFIG, "/tmp/handoff.toml");
    assert_eq!(config_path(), Some(PathBuf::from("/tmp/handoff.toml")));
    std::env::remove_var(vars::HANDOFF_CONFIG);
    assert_eq!(config_path(), None);
}

#[test]
fn test_empty_value_is_unset() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::set_var(vars::HANDOFF_TOKEN, "  ");
    assert_eq!(token(), None);
    std::env::set_var(vars::HANDOFF_TOKEN, "abc");
    assert_eq!(token().as_deref(), Some("abc"));
    std::env::remove_var(vars::HANDOFF_TOKEN);
}

#[test]
fn test_api_url_unset() {
    let _guard = ENV_MUTEX.lock().unwrap();
    std::env::remove_var(vars::HANDOFF_API_URL);
    assert_eq!(api_url(), None);
}
