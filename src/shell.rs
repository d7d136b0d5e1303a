//! Shell Environment
//!
//! Main entry point for the shell emulator. Ties together the command-line
//! lexer, the interpreter, and the virtual filesystem.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::commands::{create_core_registry, CommandRegistry};
use crate::fs::{FileSystem, FsError, InMemoryFs, MkdirOptions};
use crate::interpreter::{dispatch, ExecResult, ExecutionLimits, ShellState};
use crate::parser;
use crate::vfs;

/// Options for creating a Shell environment.
#[derive(Default)]
pub struct ShellOptions {
    /// VFS descriptor: an XML file or a host directory to import
    pub vfs: Option<PathBuf>,
    /// Environment variable overrides (USER and HOSTNAME drive the prompt)
    pub env: Option<HashMap<String, String>>,
    /// Working directory within the VFS
    pub cwd: Option<String>,
    /// File system instance (skips descriptor loading)
    pub fs: Option<Arc<dyn FileSystem>>,
    /// Execution limits
    pub limits: Option<ExecutionLimits>,
}

/// The shell emulator environment.
pub struct Shell {
    pub fs: Arc<dyn FileSystem>,
    registry: CommandRegistry,
    limits: ExecutionLimits,
    state: ShellState,
}

impl Shell {
    /// Create a new shell environment. A descriptor that fails to load is
    /// reported and replaced by the default layout; construction never fails.
    pub async fn new(options: ShellOptions) -> Self {
        let mut env = HashMap::new();
        env.insert("USER".to_string(), "user".to_string());
        env.insert("HOSTNAME".to_string(), "localhost".to_string());
        if let Some(overrides) = options.env {
            env.extend(overrides);
        }
        let username = env
            .get("USER")
            .cloned()
            .unwrap_or_else(|| "user".to_string());
        env.entry("HOME".to_string())
            .or_insert_with(|| format!("/home/{}", username));

        let fs: Arc<dyn FileSystem> = match options.fs {
            Some(fs) => fs,
            None => {
                let entries = match &options.vfs {
                    Some(path) => match vfs::load(path) {
                        Ok(entries) => entries,
                        Err(e) => {
                            warn!(error = %e, "failed to load VFS, continuing with the default layout");
                            vfs::default_layout(&username)
                        }
                    },
                    None => vfs::default_layout(&username),
                };
                Arc::new(InMemoryFs::from_entries(entries))
            }
        };

        let cwd = match options.cwd {
            Some(dir) => fs.resolve_path("/", &dir),
            None => "/".to_string(),
        };
        // Ensure the working directory exists
        let _ = fs.mkdir(&cwd, &MkdirOptions { recursive: true }).await;
        env.insert("PWD".to_string(), cwd.clone());

        let state = ShellState {
            cwd,
            env,
            ..Default::default()
        };

        Self {
            fs,
            registry: create_core_registry(),
            limits: options.limits.unwrap_or_default(),
            state,
        }
    }

    /// The interactive prompt, `[user@hostname]$ `.
    pub fn prompt(&self) -> String {
        format!("[{}@{}]$ ", self.state.username(), self.state.hostname())
    }

    /// Exit code requested by the exit builtin, if any.
    pub fn exit_requested(&self) -> Option<i32> {
        self.state.exit_request
    }

    /// Exit status of the last executed command.
    pub fn last_exit(&self) -> i32 {
        self.state.last_exit
    }

    /// Get current working directory.
    pub fn get_cwd(&self) -> &str {
        &self.state.cwd
    }

    /// Get environment variables.
    pub fn get_env(&self) -> &HashMap<String, String> {
        &self.state.env
    }

    /// Interactive command history.
    pub fn history(&self) -> &[String] {
        &self.state.history
    }

    /// Execute a single command line, recording it in the history.
    pub async fn exec_line(&mut self, line: &str) -> ExecResult {
        self.exec_inner(line, true).await
    }

    async fn exec_inner(&mut self, line: &str, record_history: bool) -> ExecResult {
        self.state.command_count += 1;
        if self.state.command_count > self.limits.max_command_count {
            return ExecResult::failure(format!(
                "maximum command count ({}) exceeded\n",
                self.limits.max_command_count
            ));
        }

        let argv = match parser::split_line(line) {
            Ok(argv) => argv,
            Err(e) => {
                self.state.last_exit = 2;
                return ExecResult::failure_with_code(format!("parse error: {}\n", e), 2);
            }
        };
        if argv.is_empty() {
            return ExecResult::ok();
        }
        if record_history {
            self.state.history.push(line.trim().to_string());
        }

        let result = dispatch(&mut self.state, &self.fs, &self.registry, &argv).await;
        self.state.last_exit = result.exit_code;
        result
    }

    /// Run a script: blank and comment lines are skipped, every command is
    /// echoed with the prompt, and the first failing command stops the run
    /// with its status.
    pub async fn run_script(&mut self, text: &str) -> ExecResult {
        let mut stdout = String::new();
        let mut stderr = String::new();

        for (idx, raw) in text.lines().enumerate() {
            let lineno = idx + 1;
            let stripped = raw.trim();
            if stripped.is_empty() || stripped.starts_with('#') {
                continue;
            }

            stdout.push_str(&self.prompt());
            stdout.push_str(raw);
            stdout.push('\n');

            let result = self.exec_inner(raw, false).await;
            stdout.push_str(&result.stdout);
            stderr.push_str(&result.stderr);

            if self.state.exit_request.is_some() {
                debug!(line = lineno, "script terminated by exit");
                return ExecResult::new(stdout, stderr, result.exit_code);
            }
            if result.exit_code != 0 {
                warn!(line = lineno, status = result.exit_code, "script stopped");
                stderr.push_str(&format!("script stopped at line {}\n", lineno));
                return ExecResult::new(stdout, stderr, result.exit_code);
            }
        }

        ExecResult::new(stdout, stderr, 0)
    }

    /// Read a file relative to cwd.
    pub async fn read_file(&self, path: &str) -> Result<String, FsError> {
        let resolved = self.fs.resolve_path(&self.state.cwd, path);
        self.fs.read_file(&resolved).await
    }

    /// Write a file relative to cwd.
    pub async fn write_file(&self, path: &str, content: &str) -> Result<(), FsError> {
        let resolved = self.fs.resolve_path(&self.state.cwd, path);
        self.fs.write_file(&resolved, content.as_bytes()).await
    }
}

// ============================================================================
// Tests
// ============================================================================
