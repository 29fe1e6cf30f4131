//! Deployment file-set resolution.
//!
//! Unions four best-effort sources into one deduplicated set of
//! repository-relative paths: the service-worker precache array, the HTML
//! entry point's href/src references, a flat data-file scan, a recursive
//! template scan - plus the configured allow-list. Extraction only reads;
//! it never writes.

mod html;
mod scan;
mod sw;

pub use html::html_refs;
pub use scan::{data_files, template_files};
pub use sw::service_worker_refs;

use crate::{config::ProjectConfig, debug, log};
use std::collections::BTreeSet;
use std::fs;

/// The resolved deployment file set: relative paths, forward slashes, no
/// leading slash. Sorted iteration gives the synchronizer its
/// deterministic order.
pub type FileSet = BTreeSet<String>;

/// Resolve the full deployment file set for a project.
///
/// Missing inputs (service worker, entry file, scan directories) are soft:
/// they contribute nothing and are only mentioned at debug level.
pub fn collect(config: &ProjectConfig) -> FileSet {
    let m = &config.manifest;
    let mut files = FileSet::new();

    let sw_path = config.root_join(&m.service_worker);
    match fs::read_to_string(&sw_path) {
        Ok(text) => {
            let refs = service_worker_refs(&text, &m.core_files_marker);
            log!("manifest"; "{} file(s) referenced by {}", refs.len(), m.service_worker);
            files.extend(refs);
        }
        Err(_) => debug!("manifest"; "no service worker at {}", sw_path.display()),
    }

    let entry_path = config.root_join(&m.entry);
    match fs::read_to_string(&entry_path) {
        Ok(text) => {
            let refs = html_refs(&text);
            log!("manifest"; "{} file(s) referenced by {}", refs.len(), m.entry);
            files.extend(refs);
        }
        Err(_) => debug!("manifest"; "no entry file at {}", entry_path.display()),
    }

    let data = data_files(&config.root_join(&m.data_dir), &m.data_dir);
    log!("manifest"; "{} data file(s) in {}/", data.len(), m.data_dir);
    files.extend(data);

    let templates = template_files(&config.root_join(&m.templates_dir), config.get_root());
    log!("manifest"; "{} template(s) in {}/", templates.len(), m.templates_dir);
    files.extend(templates);

    files.extend(m.include.iter().cloned());

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::path::Path;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_collect_unions_all_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        write(
            root,
            "sw.js",
            "const CORE_FILES = ['/', '/css/style.css', '/js/main.js'];",
        );
        write(
            root,
            "index.html",
            r#"<link href="css/style.css"><img src="assets/icon.png">"#,
        );
        write(root, "data/locale.json", "{}");
        write(root, "html/help/intro.html", "<p>help</p>");

        let mut config = test_parse_config("");
        config.root = root.to_path_buf();

        let files = collect(&config);

        assert!(files.contains("css/style.css"));
        assert!(files.contains("js/main.js"));
        assert!(files.contains("assets/icon.png"));
        assert!(files.contains("data/locale.json"));
        assert!(files.contains("html/help/intro.html"));
        // Allow-list entries are always present
        assert!(files.contains("index.html"));
        assert!(files.contains("manifest.json"));
    }

    #[test]
    fn test_collect_with_empty_source_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = test_parse_config("");
        config.root = tmp.path().to_path_buf();

        // Only the allow-list survives when every input is missing
        let files = collect(&config);
        let expected: FileSet = config.manifest.include.iter().cloned().collect();
        assert_eq!(files, expected);
    }
}
