// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use serde_json::json;
pub use tempfile::TempDir;
pub use wiremock::matchers::{body_partial_json, method, path};
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `handoff` command isolated from the caller's environment.
pub fn handoff() -> Command {
    let mut cmd = cargo_bin_cmd!("handoff");
    cmd.env_remove("HANDOFF_CONFIG")
        .env_remove("HANDOFF_API_URL")
        .env_remove("HANDOFF_TOKEN")
        .env_remove("HANDOFF_LOG");
    cmd
}

/// Writes a config pointing at `base_url` and returns its path.
pub fn write_config(temp: &TempDir, base_url: &str, role: &str) -> PathBuf {
    let path = temp.path().join("config.toml");
    let content = format!(
        "[api]\nbase_url = \"{base_url}\"\n\n[session]\nusername = \"ana\"\nrole = \"{role}\"\n"
    );
    std::fs::write(&path, content).unwrap();
    path
}

/// `handoff --config <path>` for the given config.
pub fn handoff_with(config: &Path) -> Command {
    let mut cmd = handoff();
    cmd.arg("--config").arg(config);
    cmd
}

/// Mounts the note list and a two-reviewer roster.
pub async fn mount_notes(server: &MockServer, notes: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/shiftHandOff"))
        .respond_with(ResponseTemplate::new(200).set_body_json(notes))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/User/coordinators"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "r1", "name": "Ana"},
            {"id": "r2", "name": "Bruno"}
        ])))
        .mount(server)
        .await;
}
