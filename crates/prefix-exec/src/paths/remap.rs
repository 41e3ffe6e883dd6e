//! Legacy install-location rewriting

use prefix_exec_core::PathString;

/// Rewrite `path` from an obsolete install prefix onto `root`.
///
/// Returns `None` when `root` is unset or empty, when `path` is relative,
/// when no legacy prefix matches, or when the rewritten path would not fit
/// in a kernel path buffer. Matching is a literal, case-sensitive prefix test
/// and the first matching prefix wins.
pub fn remap_legacy(path: &str, root: Option<&str>, legacy_prefixes: &[String]) -> Option<PathString> {
    let root = root.filter(|r| !r.is_empty())?;
    if !path.starts_with('/') {
        return None;
    }

    let suffix = legacy_prefixes
        .iter()
        .find_map(|prefix| path.strip_prefix(prefix.as_str()))?;

    PathString::concat(&[root, suffix]).ok()
}
