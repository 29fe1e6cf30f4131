//! Destination-tree synchronization: copy pass and orphan cleanup.
//!
//! After both passes the destination holds exactly
//! (file set − excluded) ∪ keep set, plus version-control metadata.
//! Running either pass twice against an unchanged source is a no-op the
//! second time.

use crate::{config::ProjectConfig, debug, log, manifest::FileSet};
use anyhow::{Context, Result};
use filetime::FileTime;
use jwalk::WalkDir;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Copy-pass counters.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub copied: usize,
    pub skipped: usize,
}

/// Copy every resolved file into the destination tree, in sorted order.
///
/// Missing sources and excluded paths are reported and counted as
/// skipped; everything else is copied byte-for-byte with the source mtime
/// carried over. The pass is additive - it never deletes or rewrites
/// files outside `files`. In dry-run mode would-be copies are reported
/// and counted without writing.
pub fn sync_files(config: &ProjectConfig, files: &FileSet, dry_run: bool) -> Result<SyncStats> {
    let mut stats = SyncStats::default();

    for rel in files {
        let src = config.root_join(rel);

        if !src.is_file() {
            log!("warning"; "source file not found: {rel}");
            stats.skipped += 1;
            continue;
        }

        if let Some(part) = excluded_component(rel, &config.manifest.exclude) {
            log!("sync"; "excluding {rel} (matches '{part}')");
            stats.skipped += 1;
            continue;
        }

        if dry_run {
            log!("sync"; "[dry-run] would copy: {rel}");
        } else {
            copy_with_mtime(&src, &config.dest_join(rel))
                .with_context(|| format!("failed to copy {rel}"))?;
            debug!("sync"; "copied: {rel}");
        }
        stats.copied += 1;
    }

    Ok(stats)
}

/// First path component of `rel` that appears in the exclusion set.
fn excluded_component<'a>(rel: &str, exclude: &'a [String]) -> Option<&'a str> {
    Path::new(rel).components().find_map(|c| match c {
        Component::Normal(part) => exclude
            .iter()
            .find(|e| part == OsStr::new(e.as_str()))
            .map(String::as_str),
        _ => None,
    })
}

/// Copy bytes, creating the destination parent, then carry the source
/// mtime over so the publishing repository reflects real edit times.
fn copy_with_mtime(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(src, dst)?;

    let meta = std::fs::metadata(src)?;
    filetime::set_file_mtime(dst, FileTime::from_last_modification_time(&meta))?;
    Ok(())
}

/// Delete destination files absent from both the file set and the keep
/// set, then prune directories the removals emptied.
///
/// Everything under the version-control metadata directory is skipped.
/// Directory pruning runs only after all file deletions and processes
/// deepest paths first, so removing a child's last file reveals its
/// parent as empty within the same pass. Directories that cannot be
/// removed are left alone.
pub fn clean_orphans(config: &ProjectConfig, files: &FileSet, dry_run: bool) -> Result<usize> {
    let dest = config.dest_dir();
    let mut removed = 0usize;
    let mut dirs: Vec<PathBuf> = Vec::new();

    for path in WalkDir::new(dest)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.path())
    {
        let Ok(rel) = path.strip_prefix(dest) else {
            continue;
        };
        if rel.as_os_str().is_empty() || under_git_dir(rel) {
            continue;
        }

        if path.is_dir() {
            dirs.push(path);
            continue;
        }

        let rel_str = crate::utils::path::to_slash(rel);
        if files.contains(&rel_str) || config.manifest.keep.iter().any(|k| *k == rel_str) {
            continue;
        }

        if dry_run {
            log!("clean"; "[dry-run] would remove orphaned file: {rel_str}");
        } else {
            std::fs::remove_file(&path)
                .with_context(|| format!("failed to remove {rel_str}"))?;
            log!("clean"; "removed orphaned file: {rel_str}");
        }
        removed += 1;
    }

    prune_empty_dirs(dest, &mut dirs, dry_run);

    Ok(removed)
}

/// Remove directories left empty by the file pass, deepest first.
fn prune_empty_dirs(dest: &Path, dirs: &mut [PathBuf], dry_run: bool) {
    dirs.sort();
    for dir in dirs.iter().rev() {
        let Ok(mut entries) = std::fs::read_dir(dir) else {
            continue;
        };
        if entries.next().is_some() {
            continue;
        }

        let rel = dir.strip_prefix(dest).unwrap_or(dir);
        if dry_run {
            log!("clean"; "[dry-run] would remove empty directory: {}", rel.display());
        } else if std::fs::remove_dir(dir).is_ok() {
            log!("clean"; "removed empty directory: {}", rel.display());
        }
        // Removal failures (racing writer, platform restriction) are
        // non-fatal; the directory simply stays.
    }
}

fn under_git_dir(rel: &Path) -> bool {
    rel.components().any(|c| c.as_os_str() == ".git")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    /// Config with a real source and destination tree under a tempdir.
    fn test_config(root: &Path) -> ProjectConfig {
        let mut config = test_parse_config("");
        config.root = root.join("app");
        config.paths.dest = root.join("pages");
        fs::create_dir_all(&config.root).unwrap();
        fs::create_dir_all(&config.paths.dest).unwrap();
        config
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn file_set(paths: &[&str]) -> FileSet {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_sync_copies_and_reports_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(&config.root, "index.html", "<html>");
        write(&config.root, "css/style.css", "body{}");

        let files = file_set(&["index.html", "css/style.css", "missing.js"]);
        let stats = sync_files(&config, &files, false).unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            fs::read_to_string(config.dest_join("css/style.css")).unwrap(),
            "body{}"
        );
        assert!(!config.dest_join("missing.js").exists());
    }

    #[test]
    fn test_sync_preserves_mtime() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(&config.root, "app.js", "x");

        let old = FileTime::from_unix_time(1_500_000_000, 0);
        filetime::set_file_mtime(config.root_join("app.js"), old).unwrap();

        sync_files(&config, &file_set(&["app.js"]), false).unwrap();

        let meta = fs::metadata(config.dest_join("app.js")).unwrap();
        assert_eq!(FileTime::from_last_modification_time(&meta), old);
    }

    #[test]
    fn test_excluded_component_never_copied() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        // Present in the source tree AND in the file set, but under an
        // excluded directory
        write(&config.root, "tests/fixture.json", "{}");
        write(&config.root, "app.js", "x");

        let files = file_set(&["tests/fixture.json", "app.js"]);
        let stats = sync_files(&config, &files, false).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.skipped, 1);
        assert!(!config.dest_join("tests/fixture.json").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(&config.root, "app.js", "x");

        let stats = sync_files(&config, &file_set(&["app.js"]), true).unwrap();

        // Counted as a would-be copy, but not written
        assert_eq!(stats.copied, 1);
        assert!(!config.dest_join("app.js").exists());
    }

    #[test]
    fn test_clean_removes_orphan_and_empty_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(config.dest_dir(), "old/data.json", "{}");
        write(config.dest_dir(), "index.html", "<html>");

        let removed = clean_orphans(&config, &file_set(&["index.html"]), false).unwrap();

        assert_eq!(removed, 1);
        assert!(!config.dest_join("old/data.json").exists());
        // The emptied directory goes in the same pass
        assert!(!config.dest_join("old").exists());
        assert!(config.dest_join("index.html").exists());
    }

    #[test]
    fn test_clean_spares_keep_set_and_git_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(config.dest_dir(), "README.md", "# pages repo");
        write(config.dest_dir(), ".git/HEAD", "ref: refs/heads/main");
        write(config.dest_dir(), "stale.js", "x");

        let removed = clean_orphans(&config, &FileSet::new(), false).unwrap();

        assert_eq!(removed, 1);
        assert!(config.dest_join("README.md").exists());
        assert!(config.dest_join(".git/HEAD").exists());
        assert!(!config.dest_join("stale.js").exists());
    }

    #[test]
    fn test_clean_dry_run_removes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(config.dest_dir(), "stale.js", "x");

        let removed = clean_orphans(&config, &FileSet::new(), true).unwrap();

        assert_eq!(removed, 1);
        assert!(config.dest_join("stale.js").exists());
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(tmp.path());
        write(&config.root, "index.html", "<html>");
        write(&config.root, "data/locale.json", "{}");
        write(config.dest_dir(), "stale.js", "x");

        let files = file_set(&["index.html", "data/locale.json"]);

        sync_files(&config, &files, false).unwrap();
        let first_removed = clean_orphans(&config, &files, false).unwrap();
        assert_eq!(first_removed, 1);

        let stats = sync_files(&config, &files, false).unwrap();
        let second_removed = clean_orphans(&config, &files, false).unwrap();

        assert_eq!(stats, SyncStats { copied: 2, skipped: 0 });
        assert_eq!(second_removed, 0);
        assert_eq!(
            fs::read_to_string(config.dest_join("index.html")).unwrap(),
            "<html>"
        );
    }

    #[test]
    fn test_excluded_component_matching() {
        let exclude = vec![".git".to_string(), "tests".to_string()];

        assert_eq!(excluded_component("tests/a.json", &exclude), Some("tests"));
        assert_eq!(excluded_component("a/tests/b.js", &exclude), Some("tests"));
        assert_eq!(excluded_component("contests/b.js", &exclude), None);
        assert_eq!(excluded_component("js/main.js", &exclude), None);
    }
}
