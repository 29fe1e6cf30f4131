//! Pagesync - deployment helper for hand-rolled static web apps.

mod cli;
mod config;
mod core;
mod git;
mod logger;
mod manifest;
mod sync;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ProjectConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = ProjectConfig::load(cli)?;

    match &cli.command {
        Commands::Deploy { args } => cli::deploy::run(&config, args),
        Commands::Serve { .. } => cli::serve::serve(&config),
    }
}
