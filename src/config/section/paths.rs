//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! dest = "../myapp.github.io"   # Publishing repository checkout
//! ```
//!
//! `dest` is tilde-expanded and, when relative, resolved against the
//! project root (the directory holding `pagesync.toml`). The directory
//! must exist before a deploy run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source / destination tree settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsSection {
    /// Destination publishing repository.
    pub dest: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("../pages"),
        }
    }
}
