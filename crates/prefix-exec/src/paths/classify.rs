//! Managed-environment membership test

use log::trace;
use prefix_exec_core::{EnvSnapshot, PathString, ShimConfig};

use super::remap::remap_legacy;

/// Decides whether a path belongs to the managed environment
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a ShimConfig,
    env: &'a EnvSnapshot,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a ShimConfig, env: &'a EnvSnapshot) -> Self {
        Self { config, env }
    }

    /// Legacy remap against the current managed root
    pub fn remap(&self, path: &str) -> Option<PathString> {
        remap_legacy(path, self.env.root.as_deref(), &self.config.legacy_prefixes)
    }

    /// True if `path` (after legacy remap) lies in the managed environment.
    ///
    /// Checks, in order: alternate root prefix, managed root prefix, then the
    /// layout marker anywhere in the path. The marker test is position
    /// independent and can match unrelated paths that happen to contain it.
    pub fn is_managed(&self, path: &str) -> bool {
        if !path.starts_with('/') {
            return false;
        }

        let remapped = self.remap(path);
        let checked = remapped.as_deref().unwrap_or(path);

        let managed = self
            .env
            .alt_root
            .as_deref()
            .is_some_and(|root| checked.starts_with(root))
            || self
                .env
                .root
                .as_deref()
                .is_some_and(|root| checked.starts_with(root))
            || (!self.config.layout_marker.is_empty()
                && checked.contains(self.config.layout_marker.as_str()));

        trace!("classify {} -> {}", checked, managed);
        managed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(root: Option<&str>, alt_root: Option<&str>) -> EnvSnapshot {
        EnvSnapshot {
            root: root.map(str::to_string),
            alt_root: alt_root.map(str::to_string),
            search_path: None,
        }
    }

    #[test]
    fn test_path_under_root() {
        let config = ShimConfig::default();
        let env = env(Some("/managed/root"), None);
        let classifier = Classifier::new(&config, &env);
        assert!(classifier.is_managed("/managed/root/bin/bash"));
        assert!(!classifier.is_managed("/system/bin/sh"));
    }

    #[test]
    fn test_path_under_alt_root() {
        let config = ShimConfig::default();
        let env = env(Some("/managed/root"), Some("/managed"));
        let classifier = Classifier::new(&config, &env);
        assert!(classifier.is_managed("/managed/home/script.sh"));
    }

    #[test]
    fn test_legacy_path_is_managed_after_remap() {
        let config = ShimConfig::default();
        let env = env(Some("/managed/root"), None);
        let classifier = Classifier::new(&config, &env);
        assert!(classifier.is_managed("/data/data/com.termux/files/usr/bin/python3"));
    }

    #[test]
    fn test_layout_marker_matches_anywhere() {
        let config = ShimConfig::default();
        let env = env(None, None);
        let classifier = Classifier::new(&config, &env);
        assert!(classifier.is_managed("/data/data/org.example/files/prefix/bin/tool"));
        assert!(classifier.is_managed("/tmp/unrelated/files/prefix/x"));
    }

    #[test]
    fn test_nothing_configured_is_unmanaged() {
        let config = ShimConfig::default();
        let env = env(None, None);
        let classifier = Classifier::new(&config, &env);
        assert!(!classifier.is_managed("/managed/root/bin/bash"));
        assert!(!classifier.is_managed("/data/data/com.termux/files/usr/bin/bash"));
    }

    #[test]
    fn test_relative_paths_never_match() {
        let config = ShimConfig::default();
        let env = env(Some("bin"), Some("bin"));
        let classifier = Classifier::new(&config, &env);
        assert!(!classifier.is_managed("bin/bash"));
        assert!(!classifier.is_managed("files/prefix/bin/bash"));
    }

    #[test]
    fn test_classification_is_stable_without_legacy_match() {
        let config = ShimConfig::default();
        let env = env(Some("/managed/root"), None);
        let classifier = Classifier::new(&config, &env);
        let path = "/managed/root/bin/ls";
        assert!(classifier.remap(path).is_none());
        assert_eq!(classifier.is_managed(path), classifier.is_managed(path));
        assert!(classifier.is_managed(path));
    }
}
