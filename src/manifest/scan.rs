//! Fixed-pattern directory scans.

use jwalk::WalkDir;
use std::collections::BTreeSet;
use std::path::Path;

/// Flat scan for `*.json` data files, emitted as `<prefix>/<name>`.
///
/// Returns an empty set if the directory does not exist.
pub fn data_files(dir: &Path, prefix: &str) -> BTreeSet<String> {
    let mut files = BTreeSet::new();

    let Ok(entries) = std::fs::read_dir(dir) else {
        return files;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file()
            && path.extension().is_some_and(|e| e == "json")
            && let Some(name) = path.file_name().and_then(|n| n.to_str())
        {
            files.insert(format!("{prefix}/{name}"));
        }
    }

    files
}

/// Recursive scan for `*.html` templates, emitted relative to
/// `source_root` with forward slashes.
///
/// Returns an empty set if the directory does not exist.
pub fn template_files(dir: &Path, source_root: &Path) -> BTreeSet<String> {
    let mut files = BTreeSet::new();
    if !dir.is_dir() {
        return files;
    }

    for path in WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
    {
        if path.extension().is_some_and(|e| e == "html")
            && let Ok(rel) = path.strip_prefix(source_root)
        {
            files.insert(crate::utils::path::to_slash(rel));
        }
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_data_files_flat_scan() {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        fs::create_dir_all(data.join("nested")).unwrap();
        fs::write(data.join("locale.json"), "{}").unwrap();
        fs::write(data.join("lexicon.json"), "{}").unwrap();
        fs::write(data.join("notes.txt"), "").unwrap();
        // Nested files are outside the flat scan
        fs::write(data.join("nested/deep.json"), "{}").unwrap();

        let files = data_files(&data, "data");
        assert_eq!(files.len(), 2);
        assert!(files.contains("data/locale.json"));
        assert!(files.contains("data/lexicon.json"));
    }

    #[test]
    fn test_data_files_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(data_files(&tmp.path().join("data"), "data").is_empty());
    }

    #[test]
    fn test_template_files_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let html = root.join("html");
        fs::create_dir_all(html.join("help")).unwrap();
        fs::write(html.join("about.html"), "").unwrap();
        fs::write(html.join("help/intro.html"), "").unwrap();
        fs::write(html.join("help/notes.md"), "").unwrap();

        let files = template_files(&html, root);
        assert_eq!(files.len(), 2);
        assert!(files.contains("html/about.html"));
        assert!(files.contains("html/help/intro.html"));
    }

    #[test]
    fn test_template_files_missing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(template_files(&tmp.path().join("html"), tmp.path()).is_empty());
    }
}
