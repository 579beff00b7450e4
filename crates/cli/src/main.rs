// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use hfrs::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(hfrs::log_directive(cli.verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = hfrs::run(cli).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
