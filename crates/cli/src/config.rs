// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration management.
//!
//! Configuration is stored in TOML and includes:
//! - `[api]`: backend base URL, optional bearer token and request timeout
//! - `[session]`: the acting user (username, role, display name)
//! - `[acknowledgment]`: how note completeness is measured
//!
//! The file is found at `--config`, then `$HANDOFF_CONFIG`, then
//! `<config dir>/handoff/config.toml`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use hf_core::{CompletenessPolicy, Identity, RecordId, Role, Session};

use crate::env;
use crate::error::{Error, Result};

const CONFIG_DIR_NAME: &str = "handoff";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub acknowledgment: AckConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST service (e.g., `https://ops.example.com/api`).
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Per-request timeout in seconds (default: 15).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    15
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// The acting user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub username: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Acknowledgment settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AckConfig {
    #[serde(default)]
    pub policy: CompletenessPolicy,
}

impl Config {
    /// Creates a config for `username` against `base_url` with default settings.
    pub fn new(base_url: impl Into<String>, username: impl Into<String>, role: Role) -> Self {
        Config {
            api: ApiConfig::new(base_url),
            session: SessionConfig {
                username: username.into(),
                role,
                name: None,
                id: None,
            },
            acknowledgment: AckConfig::default(),
        }
    }

    /// Loads configuration from the given file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Saves configuration to the given file, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Replaces the URL and token with explicit overrides when present.
    pub fn apply_overrides(&mut self, api_url: Option<String>, token: Option<String>) {
        if let Some(url) = api_url {
            self.api.base_url = url;
        }
        if let Some(token) = token {
            self.api.token = Some(token);
        }
    }

    /// Applies `HANDOFF_API_URL` and `HANDOFF_TOKEN`.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_overrides(env::api_url(), env::token());
        self
    }

    /// Checks that the config can be used to talk to a backend.
    pub fn validate(&self) -> Result<()> {
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "invalid api.base_url '{}': must start with http:// or https://",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            return Err(Error::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.session.username.trim().is_empty() {
            return Err(Error::Config("session.username is required".to_string()));
        }
        Ok(())
    }

    /// Builds the explicit session passed into store operations.
    pub fn session(&self) -> Session {
        Session::new(Identity {
            id: self.session.id.clone().map(RecordId::from),
            username: self.session.username.trim().to_string(),
            name: self.session.name.clone(),
            role: self.session.role,
            ..Identity::default()
        })
    }

    /// Returns a copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api.token.is_some() {
            copy.api.token = Some("********".to_string());
        }
        copy
    }
}

/// Resolves the config file location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = env::config_path() {
        return Ok(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| {
            Error::Config("cannot determine config directory; pass --config".to_string())
        })
}

/// Loads, overrides and validates the config in one step.
pub fn load_effective(explicit: Option<&Path>) -> Result<Config> {
    let path = config_path(explicit)?;
    if !path.exists() {
        return Err(Error::Config(format!(
            "no config at {}\n  hint: run 'handoff config init --url <base-url>' first",
            path.display()
        )));
    }
    let config = Config::load(&path)?.with_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Returns a default username for new configs.
///
/// Resolution order:
/// 1. Git config user.name
/// 2. Unix username from USER or LOGNAME env var (if not system account)
/// 3. Fallback to "operator"
pub fn default_username() -> String {
    if let Some(name) = get_git_user_name() {
        return name;
    }

    if let Some(name) = get_unix_username() {
        if !is_system_account(&name) {
            return name;
        }
    }

    "operator".to_string()
}

fn get_git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;

    if output.status.success() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}

fn get_unix_username() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn is_system_account(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "root" | "system" | "administrator" | "admin" | "daemon" | "nobody"
    )
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
