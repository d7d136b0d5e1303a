// src/commands/touch/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::FsError;
use async_trait::async_trait;

pub struct TouchCommand;

#[async_trait]
impl Command for TouchCommand {
    fn name(&self) -> &'static str {
        "touch"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        if ctx.args.is_empty() {
            return CommandResult::error("usage: touch FILE...\n".to_string());
        }

        let mut stderr = String::new();
        let mut exit_code = 0;

        for file in &ctx.args {
            let path = ctx.fs.resolve_path(&ctx.cwd, file);
            match ctx.fs.stat(&path).await {
                Ok(stat) => {
                    if stat.is_directory {
                        stderr.push_str(&format!("touch: cannot touch '{}': Is a directory\n", file));
                        exit_code = 1;
                    }
                    // an existing file is left as it is
                }
                Err(_) => {
                    if let Err(e) = ctx.fs.write_file(&path, &[]).await {
                        let reason = match e {
                            FsError::NotFound { .. } => "No such file or directory".to_string(),
                            FsError::NotDirectory { .. } => "Not a directory".to_string(),
                            other => other.to_string(),
                        };
                        stderr.push_str(&format!("touch: cannot touch '{}': {}\n", file, reason));
                        exit_code = 1;
                    }
                }
            }
        }

        CommandResult::with_exit_code(String::new(), stderr, exit_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystem, InMemoryFs, MkdirOptions};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn make_ctx(fs: Arc<InMemoryFs>, args: Vec<&str>) -> CommandContext {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            cwd: "/".to_string(),
            env: HashMap::new(),
            fs,
        }
    }

    #[tokio::test]
    async fn test_touch_create_file() {
        let fs = Arc::new(InMemoryFs::new());
        let result = TouchCommand.execute(make_ctx(fs.clone(), vec!["/newfile.txt"])).await;
        assert_eq!(result.exit_code, 0);
        assert!(fs.exists("/newfile.txt").await);
        assert_eq!(fs.read_file("/newfile.txt").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_touch_existing_file_untouched() {
        let fs = Arc::new(InMemoryFs::new());
        fs.write_file("/f.txt", b"keep me").await.unwrap();
        let result = TouchCommand.execute(make_ctx(fs.clone(), vec!["/f.txt"])).await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(fs.read_file("/f.txt").await.unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_touch_directory_fails() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/d", &MkdirOptions::default()).await.unwrap();
        let result = TouchCommand.execute(make_ctx(fs, vec!["/d"])).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("Is a directory"));
    }

    #[tokio::test]
    async fn test_touch_missing_parent_fails() {
        let fs = Arc::new(InMemoryFs::new());
        let result = TouchCommand.execute(make_ctx(fs.clone(), vec!["/no/such/file"])).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("No such file or directory"));
        assert!(!fs.exists("/no/such/file").await);
    }

    #[tokio::test]
    async fn test_touch_missing_operand() {
        let fs = Arc::new(InMemoryFs::new());
        let result = TouchCommand.execute(make_ctx(fs, vec![])).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("usage: touch"));
    }

    #[tokio::test]
    async fn test_touch_continues_after_error() {
        let fs = Arc::new(InMemoryFs::new());
        let result = TouchCommand
            .execute(make_ctx(fs.clone(), vec!["/no/such/file", "/ok.txt"]))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(fs.exists("/ok.txt").await);
    }
}
