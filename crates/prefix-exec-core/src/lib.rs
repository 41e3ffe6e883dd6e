//! prefix-exec-core: shared types, errors, and configuration for prefix-exec
//!
//! This crate provides the foundational types used by the exec engine,
//! the preload library and the diagnostic CLI:
//! - Error types and Result alias, with errno mapping for the C entry points
//! - Shim configuration (variable names, legacy prefixes, linker locations)
//! - Per-call environment snapshot
//! - Bounded owned strings that reject rather than truncate

pub mod bounded;
pub mod config;
pub mod env;
pub mod error;

pub use bounded::{BoundedString, PATH_MAX_LEN, PathString};
pub use config::ShimConfig;
pub use env::EnvSnapshot;
pub use error::{Result, ShimError};
