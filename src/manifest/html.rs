//! HTML entry-point reference extraction.
//!
//! Pattern-based, not a markup parser: it can under-match unusually
//! formatted attributes and over-match values inside comments. That
//! trade-off is deliberate - the entry point is hand-written and regular,
//! and a wrong guess costs one warning during sync, not a broken deploy.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Extract local file references from an HTML document.
///
/// Collects `href` values ending in style/data/image extensions and `src`
/// values ending in script/image extensions. Absolute URLs
/// (scheme-prefixed or protocol-relative) are skipped; a leading slash is
/// stripped from the rest.
pub fn html_refs(text: &str) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();

    for re in [href_attr(), src_attr()] {
        for cap in re.captures_iter(text) {
            let value = &cap[1];
            if is_absolute_url(value) {
                continue;
            }
            refs.insert(value.trim_start_matches('/').to_string());
        }
    }

    refs
}

fn href_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"href=["']([^"']+\.(?:css|json|png|jpg|svg|ico))["']"#).unwrap()
    })
}

fn src_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"src=["']([^"']+\.(?:js|png|jpg|svg|ico))["']"#).unwrap())
}

/// Scheme-prefixed or protocol-relative URLs point off-site.
fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://") || value.starts_with("//")
}
