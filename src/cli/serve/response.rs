//! URL resolution and HTTP response handlers.

use crate::utils::mime;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tiny_http::{Header, Request, Response, StatusCode};

/// Headers attached to every response so the browser and any installed
/// service worker always refetch.
const NO_CACHE: &[(&str, &str)] = &[
    ("Cache-Control", "no-store, no-cache, must-revalidate, max-age=0"),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
];

/// Resolve URL to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.contains("..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: decode, strip query string, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;
    let decoded = percent_decode_str(url)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    let path = decoded.split('?').next().unwrap_or(&decoded);
    path.trim_matches('/').to_string()
}

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = mime::from_path(path);
    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a plain-text 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    send_body(request, 404, mime::types::PLAIN, b"404 Not Found".to_vec())
}

fn send_body(request: Request, status: u16, content_type: &str, body: Vec<u8>) -> Result<()> {
    let mut response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type));

    for (field, value) in NO_CACHE {
        response = response.with_header(make_header(field, value));
    }

    request.respond(response)?;
    Ok(())
}

fn make_header(field: &str, value: &str) -> Header {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("/"), "");
        assert_eq!(normalize_url("/css/style.css"), "css/style.css");
        assert_eq!(normalize_url("/index.html?v=2"), "index.html");
        assert_eq!(normalize_url("/a%20b.html"), "a b.html");
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("secret.txt"), "x").unwrap();
        let root = tmp.path().join("site");
        fs::create_dir(&root).unwrap();

        assert!(resolve_path("/../secret.txt", &root).is_none());
        assert!(resolve_path("/%2e%2e/secret.txt", &root).is_none());
    }

    #[test]
    fn test_resolve_directory_falls_back_to_index() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("index.html"), "<html>").unwrap();

        let resolved = resolve_path("/", root).unwrap();
        assert!(resolved.ends_with("index.html"));
    }

    #[test]
    fn test_resolve_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve_path("/nope.html", tmp.path()).is_none());
    }
}
