// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use hf_core::Role;

use crate::cli::ConfigCommand;
use crate::config::{config_path, default_username, load_effective, Config};
use crate::error::{Error, Result};

/// Execute a config subcommand. Neither needs a working backend.
pub fn run(explicit: Option<&Path>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Init {
            url,
            username,
            role,
            force,
        } => {
            let path = config_path(explicit)?;
            let role: Role = role.parse()?;
            let username = username.unwrap_or_else(default_username);
            init(&path, &url, &username, role, force)?;
            println!("Wrote config to {}", path.display());
            Ok(())
        }
        ConfigCommand::Show => {
            let (path, rendered) = show(explicit)?;
            println!("# {}", path.display());
            print!("{}", rendered);
            Ok(())
        }
    }
}

/// Writes a fresh config, refusing to clobber one unless `force` is set.
pub(crate) fn init(path: &Path, url: &str, username: &str, role: Role, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(Error::Config(format!(
            "config already exists at {}\n  hint: pass --force to overwrite it",
            path.display()
        )));
    }
    let config = Config::new(url.trim(), username.trim(), role);
    config.validate()?;
    config.save(path)
}

/// Renders the effective config with the token masked.
pub(crate) fn show(explicit: Option<&Path>) -> Result<(PathBuf, String)> {
    let path = config_path(explicit)?;
    let config = load_effective(Some(&path))?;
    let rendered = toml::to_string_pretty(&config.redacted())
        .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
    Ok((path, rendered))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
