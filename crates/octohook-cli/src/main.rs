#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;

use std::process;

use anyhow::Context;

use crate::command::render;
use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "octohook_cli::startup";
pub const TRACING_TARGET_CONFIG: &str = "octohook_cli::config";
pub const TRACING_TARGET_COMMAND: &str = "octohook_cli::command";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_STARTUP,
            error = %error,
            "command failed"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    Cli::init_tracing();
    cli.log();
    cli.validate().context("invalid configuration")?;

    let hooks = cli.hooks()?;

    let command = cli.command;
    let name = command.name();
    let output = command
        .execute(&hooks)
        .await
        .with_context(|| format!("`{name}` failed"))?;

    if let Some(output) = output {
        println!("{}", render(&output)?);
    }

    Ok(())
}
