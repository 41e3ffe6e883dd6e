//! Shim configuration
//!
//! Every path constant the exec pipeline consults lives here. The defaults
//! describe an Android userland relocated under `$PREFIX`.

use serde::{Deserialize, Serialize};

/// Configuration for exec interposition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShimConfig {
    /// Variable naming the managed-environment root
    pub root_var: String,
    /// Variable naming the broader alternate root
    pub alt_root_var: String,
    /// Install locations the managed environment used to live under
    pub legacy_prefixes: Vec<String>,
    /// Substring identifying the alternate layout convention
    pub layout_marker: String,
    /// Roots owned by the OS; binaries below them are never wrapped
    pub reserved_roots: Vec<String>,
    /// 64-bit system dynamic linker
    pub linker64: String,
    /// 32-bit system dynamic linker, used when the 64-bit one is absent
    pub linker32: String,
    /// Search list used when `PATH` is unset or empty
    pub default_search_path: String,
}

impl Default for ShimConfig {
    fn default() -> Self {
        Self {
            root_var: "PREFIX".to_string(),
            alt_root_var: "TERMUX__ROOTFS".to_string(),
            legacy_prefixes: vec![
                "/data/data/com.termux/files/usr".to_string(),
                "/data/user/0/com.termux/files/usr".to_string(),
            ],
            layout_marker: "/files/prefix/".to_string(),
            reserved_roots: vec!["/system/".to_string(), "/apex/".to_string()],
            linker64: "/system/bin/linker64".to_string(),
            linker32: "/system/bin/linker".to_string(),
            default_search_path: "/system/bin".to_string(),
        }
    }
}

impl ShimConfig {
    /// True if `path` names one of the system dynamic linkers
    pub fn is_linker(&self, path: &str) -> bool {
        path == self.linker64 || path == self.linker32
    }

    /// True if `path` lies below an OS-reserved root
    pub fn is_reserved(&self, path: &str) -> bool {
        self.reserved_roots.iter().any(|root| path.starts_with(root.as_str()))
    }
}
