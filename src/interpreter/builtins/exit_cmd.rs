//! exit - Terminate the session
//!
//! `exit [n]` requests shell termination; with no argument the status of the
//! last command is used.

use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_exit(state: &mut ShellState, args: &[String]) -> ExecResult {
    let code = match args.first() {
        None => state.last_exit,
        Some(arg) => match arg.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                state.exit_request = Some(2);
                return ExecResult::failure_with_code(
                    format!("exit: {}: numeric argument required\n", arg),
                    2,
                );
            }
        },
    };
    state.exit_request = Some(code);
    ExecResult::new(String::new(), String::new(), code)
}
