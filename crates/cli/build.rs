// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::io::Write;

/// Runtime variables read by `src/env.rs`: (name, purpose).
const VARS: [(&str, &str); 4] = [
    ("HANDOFF_CONFIG", "Config file path, used when --config is not given."),
    ("HANDOFF_API_URL", "Backend base URL, overriding api.base_url."),
    ("HANDOFF_TOKEN", "Bearer token, overriding api.token."),
    ("HANDOFF_LOG", "tracing filter directive, overriding -v."),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir = std::env::var("OUT_DIR")?;
    let path = std::path::Path::new(&out_dir).join("env_vars.rs");
    let mut f = std::fs::File::create(path)?;

    for (name, doc) in VARS {
        writeln!(f, "/// {doc}")?;
        writeln!(f, "pub const {name}: &str = \"{name}\";")?;
    }

    Ok(())
}
