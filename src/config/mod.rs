//! Project configuration management for `pagesync.toml`.
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[paths]`    | Destination publishing repository              |
//! | `[manifest]` | Deployment file-set resolution inputs          |
//! | `[deploy]`   | Commit message default                         |
//! | `[serve]`    | Development server (interface, port)           |

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{DeploySection, ManifestSection, PathsSection, ServeSection};

use crate::{
    cli::{Cli, Commands},
    log,
};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use util::find_config_file;

/// Root configuration structure representing pagesync.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source / destination tree settings
    #[serde(default)]
    pub paths: PathsSection,

    /// Deployment file-set resolution settings
    #[serde(default)]
    pub manifest: ManifestSection,

    /// Deployment settings
    #[serde(default)]
    pub deploy: DeploySection,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeSection,
}

impl ProjectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file; the project root
    /// (the application source tree) is the config file's parent directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let Some(config_path) = find_config_file(&cli.config) else {
            log!(
                "error";
                "config file '{}' not found (searched upward from the current directory)",
                cli.config.display()
            );
            std::process::exit(1);
        };

        let mut config = Self::from_path(&config_path)?;

        config.config_path = crate::utils::path::normalize_path(&config_path);
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        config.normalize_paths();
        config.apply_command_options(cli);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Normalize the destination path: tilde expansion, then resolve
    /// relative paths against the project root.
    fn normalize_paths(&mut self) {
        let expanded =
            shellexpand::tilde(self.paths.dest.to_str().unwrap_or_default()).into_owned();
        let dest = PathBuf::from(expanded);
        let dest = if dest.is_relative() {
            self.root.join(dest)
        } else {
            dest
        };
        self.paths.dest = crate::utils::path::normalize_path(&dest);
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Deploy { args } => {
                crate::logger::set_verbose(args.verbose);
                if let Some(message) = &args.message {
                    self.deploy.message = message.clone();
                }
            }
            Commands::Serve { interface, port } => {
                Self::update_option(&mut self.serve.interface, interface.as_ref());
                Self::update_option(&mut self.serve.port, port.as_ref());
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Validate configuration after normalization.
    ///
    /// The destination must not coincide with the source tree: orphan
    /// cleanup would otherwise delete every source file not in the
    /// deployment set.
    fn validate(&self) -> Result<()> {
        if self.paths.dest == self.root {
            bail!(ConfigError::Validation(format!(
                "[paths] dest resolves to the project root itself: {}",
                self.root.display()
            )));
        }
        Ok(())
    }

    /// Get the source root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the source root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get the destination tree root
    pub fn dest_dir(&self) -> &Path {
        &self.paths.dest
    }

    /// Join a path with the destination tree root.
    pub fn dest_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.paths.dest.join(path)
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config from a TOML snippet.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> ProjectConfig {
    let (parsed, ignored) = ProjectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
