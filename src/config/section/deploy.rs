//! `[deploy]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [deploy]
//! message = "Deploy site updates"   # Default commit message
//! ```

use serde::{Deserialize, Serialize};

/// Deployment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploySection {
    /// Commit message used when `--message` is not given.
    pub message: String,
}

impl Default for DeploySection {
    fn default() -> Self {
        Self {
            message: "Deploy site updates".to_string(),
        }
    }
}
