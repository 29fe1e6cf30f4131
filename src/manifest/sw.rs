//! Service-worker reference extraction.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Extract asset paths from the precache array of a service-worker script.
///
/// Locates `const <marker> = [ ... ];` and collects every quoted string
/// inside the brackets. Leading slashes are stripped and the bare root
/// entry `/` is dropped. A missing marker yields an empty set - the
/// service worker is a soft input, not a hard dependency.
pub fn service_worker_refs(text: &str, marker: &str) -> BTreeSet<String> {
    let mut refs = BTreeSet::new();

    let pattern = format!(r"(?s)const {} = \[(.*?)\];", regex::escape(marker));
    let Ok(array) = Regex::new(&pattern) else {
        return refs;
    };
    let Some(captures) = array.captures(text) else {
        return refs;
    };

    for cap in quoted_string().captures_iter(&captures[1]) {
        let path = &cap[1];
        if !path.is_empty() && path != "/" {
            refs.insert(path.trim_start_matches('/').to_string());
        }
    }

    refs
}

/// Quoted string tokens (single or double quotes) inside the array body.
fn quoted_string() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"['"]([^'"]+)['"]"#).unwrap())
}
