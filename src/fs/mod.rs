//! File System Module
//!
//! Provides the virtual file system abstraction for the shell emulator.
//! InMemoryFs is the only backend; descriptor loading lives in `crate::vfs`.

pub mod types;
pub mod in_memory_fs;

pub use types::*;
pub use in_memory_fs::InMemoryFs;
