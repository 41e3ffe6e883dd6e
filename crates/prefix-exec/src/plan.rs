//! Exec disposition planning
//!
//! Decision table, evaluated in this order:
//! 1. absolute, not a linker, not under a reserved root, managed, ELF → wrap binary
//! 2. managed and carries a shebang → wrap script if the (remapped) interpreter
//!    is managed, otherwise pass through
//! 3. anything else → direct

use log::{debug, trace};
use prefix_exec_core::{EnvSnapshot, ShimConfig};
use serde::Serialize;

use crate::detect::{is_native_executable, parse_shebang};
use crate::paths::Classifier;

/// How an exec request must be transformed before the real exec call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecDisposition {
    /// Run the request unchanged
    Direct,
    /// Run the system linker with `target` as its program
    WrapBinary { target: String },
    /// Run the system linker on `interpreter [arg] script`
    WrapScript {
        interpreter: String,
        arg: Option<String>,
        script: String,
    },
    /// Script whose interpreter lives outside the managed environment; the OS
    /// runs it through its declared interpreter
    Passthrough,
}

impl ExecDisposition {
    /// True if the request is redirected through the system linker
    pub fn is_wrapped(&self) -> bool {
        matches!(
            self,
            ExecDisposition::WrapBinary { .. } | ExecDisposition::WrapScript { .. }
        )
    }
}

/// Planner output for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecPlan {
    /// Path after legacy remapping
    pub path: String,
    /// Whether `path` differs from the requested path
    pub remapped: bool,
    pub disposition: ExecDisposition,
}

/// Combines remapping, classification and content detection
pub struct Planner<'a> {
    config: &'a ShimConfig,
    classifier: Classifier<'a>,
}

impl<'a> Planner<'a> {
    pub fn new(config: &'a ShimConfig, env: &'a EnvSnapshot) -> Self {
        Self {
            config,
            classifier: Classifier::new(config, env),
        }
    }

    /// Remap the requested path, then decide its disposition
    pub fn plan(&self, requested: &str) -> ExecPlan {
        let (path, remapped) = match self.classifier.remap(requested) {
            Some(path) => {
                trace!("remapped {} -> {}", requested, path);
                (path.into_string(), true)
            }
            None => (requested.to_string(), false),
        };
        let disposition = self.dispose(&path);
        debug!("exec {}: {:?}", path, disposition);
        ExecPlan {
            path,
            remapped,
            disposition,
        }
    }

    /// Decide the disposition of an already remapped path
    pub fn dispose(&self, path: &str) -> ExecDisposition {
        if self.should_wrap_binary(path) {
            return ExecDisposition::WrapBinary {
                target: path.to_string(),
            };
        }

        if !self.classifier.is_managed(path) {
            return ExecDisposition::Direct;
        }

        let shebang = match parse_shebang(path) {
            Ok(shebang) => shebang,
            Err(e) => {
                trace!("{} is not a script: {}", path, e);
                return ExecDisposition::Direct;
            }
        };

        let interpreter = match self.classifier.remap(&shebang.interpreter) {
            Some(remapped) => remapped.into_string(),
            None => shebang.interpreter.into_string(),
        };

        if self.classifier.is_managed(&interpreter) {
            ExecDisposition::WrapScript {
                interpreter,
                arg: shebang.arg.map(|a| a.into_string()),
                script: path.to_string(),
            }
        } else {
            ExecDisposition::Passthrough
        }
    }

    fn should_wrap_binary(&self, path: &str) -> bool {
        path.starts_with('/')
            && !self.config.is_linker(path)
            && !self.config.is_reserved(path)
            && self.classifier.is_managed(path)
            && is_native_executable(path)
    }
}
