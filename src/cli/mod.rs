//! Command-line interface and subcommand entry points.

mod args;
pub mod deploy;
pub mod serve;

pub use args::{Cli, Commands, DeployArgs};
