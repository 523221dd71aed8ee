//! CLI command handling

pub mod handle;

pub use handle::*;
