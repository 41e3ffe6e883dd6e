//! prefix-exec: exec interposition for relocated userland prefixes
//!
//! Binaries and scripts installed under a managed prefix (for example an
//! Android userland living at `$PREFIX` rather than the system root) often
//! cannot be executed directly: the kernel rejects or mis-loads them, or their
//! recorded install location has moved. This crate decides, per exec request,
//! how to rewrite it:
//!
//! - **Direct**: run unchanged (after legacy path remapping)
//! - **WrapBinary**: run the system dynamic linker with the binary as argument
//! - **WrapScript**: run the system dynamic linker on the script's interpreter
//! - **Passthrough**: a managed script with a system interpreter runs normally
//!
//! # Example
//!
//! ```ignore
//! use prefix_exec::{Interposer, RealExecve, ShimConfig, argv::ArgvBuf};
//!
//! let interposer = Interposer::new(ShimConfig::default(), RealExecve::resolve()?);
//! let argv = ArgvBuf::from_args(&["python3", "-c", "print(1)"])?;
//! let err = interposer.exec_search(c"python3", argv.as_raw()).unwrap_err();
//! eprintln!("exec failed: {}", err);
//! ```

pub mod argv;
pub mod detect;
pub mod exec;
pub mod interposer;
pub mod linker;
pub mod paths;
pub mod plan;
pub mod search;

pub use prefix_exec_core::{
    self as core, EnvSnapshot, PathString, Result, ShimConfig, ShimError,
};

pub use argv::{ArgvBuf, RawArgv};
pub use detect::{ShebangError, ShebangInfo, is_native_executable, parse_shebang};
pub use exec::{Envp, Execve, RealExecve};
pub use interposer::Interposer;
pub use linker::select_linker;
pub use paths::{Classifier, remap_legacy};
pub use plan::{ExecDisposition, ExecPlan, Planner};
