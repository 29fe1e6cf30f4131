//! `[manifest]` section configuration.
//!
//! Inputs for deployment file-set resolution.
//!
//! # Example
//!
//! ```toml
//! [manifest]
//! service_worker = "sw.js"        # Precache script to parse
//! core_files_marker = "CORE_FILES"  # Array identifier inside it
//! entry = "index.html"            # HTML entry point to parse
//! data_dir = "data"               # Flat *.json scan
//! templates_dir = "html"          # Recursive *.html scan
//! include = ["index.html", "manifest.json", "sw.js"]
//! exclude = [".git", "tests", "tools"]
//! keep = ["README.md"]
//! ```

use serde::{Deserialize, Serialize};

/// Deployment file-set resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestSection {
    /// Service-worker script holding the precache array (soft input).
    pub service_worker: String,

    /// Identifier of the precache array inside the service worker.
    pub core_files_marker: String,

    /// HTML entry point scanned for href/src references (soft input).
    pub entry: String,

    /// Directory scanned flat for `*.json` data files.
    pub data_dir: String,

    /// Directory scanned recursively for `*.html` templates.
    pub templates_dir: String,

    /// Files always deployed, referenced or not.
    pub include: Vec<String>,

    /// Path components that disqualify a file from deployment.
    pub exclude: Vec<String>,

    /// Destination files that survive orphan cleanup (intrinsic to the
    /// publishing repository, never sourced from the app tree).
    pub keep: Vec<String>,
}

impl Default for ManifestSection {
    fn default() -> Self {
        Self {
            service_worker: "sw.js".to_string(),
            core_files_marker: "CORE_FILES".to_string(),
            entry: "index.html".to_string(),
            data_dir: "data".to_string(),
            templates_dir: "html".to_string(),
            include: vec![
                "index.html".to_string(),
                "manifest.json".to_string(),
                "sw.js".to_string(),
                "LICENSE".to_string(),
                "HELP.md".to_string(),
            ],
            exclude: vec![
                ".git".to_string(),
                ".github".to_string(),
                ".vscode".to_string(),
                "config".to_string(),
                "tests".to_string(),
                "tools".to_string(),
                "sources".to_string(),
                "node_modules".to_string(),
                ".gitignore".to_string(),
            ],
            keep: vec!["README.md".to_string(), "reset".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_manifest_section() {
        let config = test_parse_config(
            r#"[manifest]
service_worker = "worker.js"
core_files_marker = "PRECACHE"
entry = "app.html"
include = ["app.html"]
exclude = [".git", "scratch"]
keep = ["CNAME"]"#,
        );

        assert_eq!(config.manifest.service_worker, "worker.js");
        assert_eq!(config.manifest.core_files_marker, "PRECACHE");
        assert_eq!(config.manifest.entry, "app.html");
        assert_eq!(config.manifest.include, vec!["app.html"]);
        assert_eq!(config.manifest.exclude, vec![".git", "scratch"]);
        assert_eq!(config.manifest.keep, vec!["CNAME"]);
    }

    #[test]
    fn test_manifest_section_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.manifest.service_worker, "sw.js");
        assert_eq!(config.manifest.core_files_marker, "CORE_FILES");
        assert_eq!(config.manifest.entry, "index.html");
        assert_eq!(config.manifest.data_dir, "data");
        assert_eq!(config.manifest.templates_dir, "html");
        assert!(config.manifest.include.iter().any(|f| f == "index.html"));
        assert!(config.manifest.keep.iter().any(|f| f == "README.md"));
    }

    #[test]
    fn test_manifest_section_partial_override() {
        let config = test_parse_config("[manifest]\ndata_dir = \"json\"");

        assert_eq!(config.manifest.data_dir, "json");
        // Untouched fields keep their defaults
        assert_eq!(config.manifest.templates_dir, "html");
        assert!(config.manifest.exclude.iter().any(|e| e == ".git"));
    }
}
