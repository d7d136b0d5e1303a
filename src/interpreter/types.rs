//! Interpreter Types
//!
//! Type definitions for the shell interpreter state and results.

use serde::Serialize;
use std::collections::HashMap;

use crate::commands::CommandResult;

/// Result of executing one command line or a whole script.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ExecResult {
    pub fn new(stdout: String, stderr: String, exit_code: i32) -> Self {
        Self { stdout, stderr, exit_code }
    }

    /// Success result with no output
    pub fn ok() -> Self {
        Self::new(String::new(), String::new(), 0)
    }

    /// Failure result with stderr message
    pub fn failure(stderr: impl Into<String>) -> Self {
        Self::new(String::new(), stderr.into(), 1)
    }

    /// Failure result with stderr message and custom exit code
    pub fn failure_with_code(stderr: impl Into<String>, exit_code: i32) -> Self {
        Self::new(String::new(), stderr.into(), exit_code)
    }
}

impl From<CommandResult> for ExecResult {
    fn from(result: CommandResult) -> Self {
        Self::new(result.stdout, result.stderr, result.exit_code)
    }
}

/// Shell interpreter state.
#[derive(Debug, Clone)]
pub struct ShellState {
    /// Current working directory, always normalized and absolute
    pub cwd: String,
    /// Environment variables
    pub env: HashMap<String, String>,
    /// Interactive command history
    pub history: Vec<String>,
    /// Exit status of the last executed command
    pub last_exit: i32,
    /// Set by the exit builtin; the front end stops the session
    pub exit_request: Option<i32>,
    /// Commands executed so far (runaway-input guard)
    pub command_count: u64,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            cwd: "/".to_string(),
            env: HashMap::new(),
            history: Vec::new(),
            last_exit: 0,
            exit_request: None,
            command_count: 0,
        }
    }
}

impl ShellState {
    pub fn username(&self) -> String {
        self.env
            .get("USER")
            .cloned()
            .unwrap_or_else(|| "user".to_string())
    }

    pub fn hostname(&self) -> String {
        self.env
            .get("HOSTNAME")
            .cloned()
            .unwrap_or_else(|| "localhost".to_string())
    }
}

/// Execution limits to prevent runaway scripted input.
#[derive(Debug, Clone)]
pub struct ExecutionLimits {
    /// Maximum number of commands to execute per session
    pub max_command_count: u64,
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            max_command_count: 100_000,
        }
    }
}
