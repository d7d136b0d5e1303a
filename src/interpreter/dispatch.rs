//! Command Dispatch
//!
//! Routes a tokenized command line to a builtin or a registry command.
//! Builtins run against mutable shell state; registry commands get a
//! read-only context snapshot.

use std::sync::Arc;

use crate::commands::{CommandContext, CommandRegistry};
use crate::fs::FileSystem;

use super::builtins;
use super::types::{ExecResult, ShellState};

pub async fn dispatch(
    state: &mut ShellState,
    fs: &Arc<dyn FileSystem>,
    registry: &CommandRegistry,
    argv: &[String],
) -> ExecResult {
    let (cmd, args) = match argv.split_first() {
        Some(parts) => parts,
        None => return ExecResult::ok(),
    };

    match cmd.as_str() {
        "cd" => builtins::handle_cd(state, fs, args).await,
        "exit" => builtins::handle_exit(state, args),
        "help" => builtins::handle_help(),
        "history" => builtins::handle_history(state, args),
        _ => match registry.get(cmd) {
            Some(command) => {
                let ctx = CommandContext {
                    args: args.to_vec(),
                    cwd: state.cwd.clone(),
                    env: state.env.clone(),
                    fs: fs.clone(),
                };
                command.execute(ctx).await.into()
            }
            None => {
                ExecResult::failure_with_code(format!("{}: command not found\n", cmd), 127)
            }
        },
    }
}
