//! Opt-in diagnostics for the preloaded library
//!
//! Host processes must not see output by default, so a logger is installed
//! only when `PREFIX_EXEC_LOG` is set (same filter syntax as `RUST_LOG`).

use env_logger::{Builder, Env, Target};
use std::sync::Once;

pub const LOG_ENV: &str = "PREFIX_EXEC_LOG";

static INIT: Once = Once::new();

pub fn init() {
    INIT.call_once(|| {
        if std::env::var_os(LOG_ENV).is_none() {
            return;
        }
        let _ = Builder::from_env(Env::new().filter(LOG_ENV))
            .target(Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .try_init();
    });
}
