//! history - Display command history
//!
//! `history [n]` shows the last n entries (all by default).

use crate::interpreter::types::{ExecResult, ShellState};

pub fn handle_history(state: &ShellState, args: &[String]) -> ExecResult {
    let total = state.history.len();
    let count = match args.first() {
        Some(arg) => arg.parse::<usize>().unwrap_or(total).min(total),
        None => total,
    };

    let start = total - count;
    let mut stdout = String::new();
    for (i, line) in state.history.iter().enumerate().skip(start) {
        stdout.push_str(&format!("{:5}  {}\n", i + 1, line));
    }
    ExecResult::new(stdout, String::new(), 0)
}
