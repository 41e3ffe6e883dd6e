//! System dynamic linker selection

use nix::unistd::{AccessFlags, access};
use prefix_exec_core::ShimConfig;

/// Pick the 64-bit linker if it is executable, otherwise the 32-bit one.
///
/// Probed on every call; nothing is cached.
pub fn select_linker(config: &ShimConfig) -> &str {
    if access(config.linker64.as_str(), AccessFlags::X_OK).is_ok() {
        &config.linker64
    } else {
        &config.linker32
    }
}
