//! cd - Change directory builtin
//!
//! `cd [path]` with no argument returns to the root directory.

use std::sync::Arc;

use crate::fs::FileSystem;
use crate::interpreter::types::{ExecResult, ShellState};

pub async fn handle_cd(
    state: &mut ShellState,
    fs: &Arc<dyn FileSystem>,
    args: &[String],
) -> ExecResult {
    let target = args.first().map(|s| s.as_str()).unwrap_or("/");
    let resolved = fs.resolve_path(&state.cwd, target);
    match fs.stat(&resolved).await {
        Ok(stat) if stat.is_directory => {
            state.cwd = resolved.clone();
            state.env.insert("PWD".to_string(), resolved);
            ExecResult::ok()
        }
        Ok(_) => ExecResult::failure(format!("cd: not a directory: {}\n", target)),
        Err(_) => ExecResult::failure(format!("cd: no such file or directory: {}\n", target)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{InMemoryFs, MkdirOptions};

    async fn make_fs() -> Arc<dyn FileSystem> {
        let fs = InMemoryFs::new();
        fs.mkdir("/home/user", &MkdirOptions { recursive: true }).await.unwrap();
        fs.write_file("/plain.txt", b"x").await.unwrap();
        Arc::new(fs)
    }

    #[tokio::test]
    async fn test_cd_changes_cwd() {
        let fs = make_fs().await;
        let mut state = ShellState::default();
        let result = handle_cd(&mut state, &fs, &["/home/user".to_string()]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(state.cwd, "/home/user");
        assert_eq!(state.env.get("PWD").map(String::as_str), Some("/home/user"));
    }

    #[tokio::test]
    async fn test_cd_no_args_goes_to_root() {
        let fs = make_fs().await;
        let mut state = ShellState { cwd: "/home".to_string(), ..Default::default() };
        let result = handle_cd(&mut state, &fs, &[]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(state.cwd, "/");
    }

    #[tokio::test]
    async fn test_cd_relative_and_dotdot() {
        let fs = make_fs().await;
        let mut state = ShellState { cwd: "/home".to_string(), ..Default::default() };
        let result = handle_cd(&mut state, &fs, &["user".to_string()]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(state.cwd, "/home/user");

        let result = handle_cd(&mut state, &fs, &["..".to_string()]).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(state.cwd, "/home");
    }

    #[tokio::test]
    async fn test_cd_to_file_fails() {
        let fs = make_fs().await;
        let mut state = ShellState::default();
        let result = handle_cd(&mut state, &fs, &["/plain.txt".to_string()]).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("not a directory"));
        assert_eq!(state.cwd, "/");
    }

    #[tokio::test]
    async fn test_cd_missing_fails() {
        let fs = make_fs().await;
        let mut state = ShellState::default();
        let result = handle_cd(&mut state, &fs, &["/nope".to_string()]).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("no such file or directory"));
    }
}
