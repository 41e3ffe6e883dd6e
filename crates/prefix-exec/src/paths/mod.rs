//! Path rewriting and managed-environment membership

pub mod classify;
pub mod remap;

pub use classify::Classifier;
pub use remap::remap_legacy;
