//! Interpreter Module
//!
//! Dispatches tokenized command lines against shell state, the virtual
//! filesystem, and the command registry.

pub mod builtins;
pub mod dispatch;
pub mod types;

pub use dispatch::dispatch;
pub use types::{ExecResult, ExecutionLimits, ShellState};
