//! Candidate generation for name-only exec requests

use log::debug;
use prefix_exec_core::PATH_MAX_LEN;
use std::ffi::CString;

/// Expand `name` against a `:`-separated search list.
///
/// An empty entry stands for the current directory. Candidates that would
/// not fit in a kernel path buffer are skipped.
pub fn candidates<'a>(search_list: &'a [u8], name: &'a [u8]) -> impl Iterator<Item = CString> + 'a {
    search_list.split(|&b| b == b':').filter_map(move |dir| {
        let dir: &[u8] = if dir.is_empty() { b"." } else { dir };
        let len = dir.len() + 1 + name.len();
        if len > PATH_MAX_LEN {
            debug!("skipping overlong search candidate ({} bytes)", len);
            return None;
        }
        let mut candidate = Vec::with_capacity(len + 1);
        candidate.extend_from_slice(dir);
        candidate.push(b'/');
        candidate.extend_from_slice(name);
        CString::new(candidate).ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(list: &str, name: &str) -> Vec<String> {
        candidates(list.as_bytes(), name.as_bytes())
            .map(|c| c.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_left_to_right() {
        assert_eq!(collect("/a:/b", "tool"), vec!["/a/tool", "/b/tool"]);
    }

    #[test]
    fn test_empty_entries_mean_cwd() {
        assert_eq!(
            collect(":/a::/b:", "tool"),
            vec!["./tool", "/a/tool", "./tool", "/b/tool", "./tool"]
        );
    }

    #[test]
    fn test_single_entry() {
        assert_eq!(collect("/system/bin", "sh"), vec!["/system/bin/sh"]);
    }

    #[test]
    fn test_overlong_candidates_skipped() {
        let long_dir = format!("/{}", "d".repeat(PATH_MAX_LEN));
        let list = format!("{}:/b", long_dir);
        assert_eq!(collect(&list, "tool"), vec!["/b/tool"]);
    }
}
