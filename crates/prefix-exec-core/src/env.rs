//! Per-call snapshot of the environment variables the pipeline consults

use crate::config::ShimConfig;
use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

/// Read-only view of the process environment, captured once per exec call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    /// Managed-environment root; `None` when unset or empty
    pub root: Option<String>,
    /// Alternate root; `None` when unset or empty
    pub alt_root: Option<String>,
    /// Raw `PATH` value; `None` when unset or empty
    pub search_path: Option<Vec<u8>>,
}

impl EnvSnapshot {
    /// Capture from the current process environment
    pub fn capture(config: &ShimConfig) -> Self {
        Self {
            root: non_empty(std::env::var_os(&config.root_var).and_then(|v| v.into_string().ok())),
            alt_root: non_empty(
                std::env::var_os(&config.alt_root_var).and_then(|v| v.into_string().ok()),
            ),
            search_path: std::env::var_os("PATH")
                .map(OsString::into_vec)
                .filter(|v| !v.is_empty()),
        }
    }

    /// Capture through an arbitrary key lookup
    pub fn from_lookup<F>(config: &ShimConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            root: non_empty(lookup(&config.root_var)),
            alt_root: non_empty(lookup(&config.alt_root_var)),
            search_path: lookup("PATH")
                .map(String::into_bytes)
                .filter(|v| !v.is_empty()),
        }
    }

    /// The search list to use, falling back to the configured default
    pub fn search_list<'a>(&'a self, config: &'a ShimConfig) -> &'a [u8] {
        self.search_path
            .as_deref()
            .unwrap_or(config.default_search_path.as_bytes())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
