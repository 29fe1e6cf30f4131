//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Pagesync deployment helper CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: pagesync.toml)
    #[arg(short = 'C', long, default_value = "pagesync.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Synchronize the site into the publishing repository
    #[command(visible_alias = "d")]
    Deploy {
        #[command(flatten)]
        args: DeployArgs,
    },

    /// Start a local development server with caching disabled
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Deploy command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct DeployArgs {
    /// Report every action without touching the destination
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Commit staged changes in the publishing repository
    #[arg(short, long)]
    pub commit: bool,

    /// Push to the remote after committing (implies --commit)
    #[arg(short, long)]
    pub push: bool,

    /// Commit message (overrides the configured default)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl DeployArgs {
    /// Pushing without a commit makes no sense, so --push implies --commit.
    pub const fn wants_commit(&self) -> bool {
        self.commit || self.push
    }
}

#[allow(unused)]
impl Cli {
    pub const fn is_deploy(&self) -> bool {
        matches!(self.command, Commands::Deploy { .. })
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
