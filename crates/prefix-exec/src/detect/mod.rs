//! On-disk content detection
//!
//! Both detectors open the target read-only and read a small bounded prefix.
//! Failures to open or read are reported as a negative detection, never as
//! an error to the exec caller.

pub mod elf;
pub mod shebang;

pub use elf::is_native_executable;
pub use shebang::{ShebangError, ShebangInfo, parse_shebang};
