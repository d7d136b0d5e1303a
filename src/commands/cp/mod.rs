// src/commands/cp/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use crate::fs::{CpOptions, FsError};
use async_trait::async_trait;

pub struct CpCommand;

#[async_trait]
impl Command for CpCommand {
    fn name(&self) -> &'static str {
        "cp"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let mut recursive = false;
        let mut paths: Vec<String> = Vec::new();

        for arg in &ctx.args {
            match arg.as_str() {
                "-r" | "-R" | "--recursive" => recursive = true,
                _ if arg.starts_with('-') => {
                    return CommandResult::error(format!("cp: invalid option '{}'\n", arg));
                }
                _ => paths.push(arg.clone()),
            }
        }

        if paths.len() != 2 {
            return CommandResult::error("usage: cp [-r] SRC DST\n".to_string());
        }
        let src = &paths[0];
        let dst = &paths[1];

        let src_path = ctx.fs.resolve_path(&ctx.cwd, src);
        if src_path == "/" {
            return CommandResult::error("cp: cannot copy '/'\n".to_string());
        }

        let src_stat = match ctx.fs.stat(&src_path).await {
            Ok(s) => s,
            Err(_) => {
                return CommandResult::error(format!(
                    "cp: cannot stat '{}': No such file or directory\n",
                    src
                ));
            }
        };

        if src_stat.is_directory && !recursive {
            return CommandResult::error(format!(
                "cp: -r not specified; omitting directory '{}'\n",
                src
            ));
        }

        let dst_path = ctx.fs.resolve_path(&ctx.cwd, dst);
        let target_path = match ctx.fs.stat(&dst_path).await {
            Ok(dst_stat) if dst_stat.is_directory => {
                // Copy into the directory under the source's name
                let name = src_path.rsplit('/').next().unwrap_or(&src_path);
                let target = ctx.fs.resolve_path(&dst_path, name);
                if src_stat.is_directory && ctx.fs.exists(&target).await {
                    return CommandResult::error(format!(
                        "cp: target '{}' already exists\n",
                        target
                    ));
                }
                target
            }
            Ok(_) => {
                if src_stat.is_directory {
                    return CommandResult::error(format!(
                        "cp: cannot overwrite non-directory '{}' with directory '{}'\n",
                        dst, src
                    ));
                }
                dst_path
            }
            Err(_) => dst_path,
        };

        match ctx.fs.cp(&src_path, &target_path, &CpOptions { recursive }).await {
            Ok(()) => CommandResult::success(String::new()),
            Err(FsError::NotFound { .. }) => CommandResult::error(format!(
                "cp: cannot create '{}': No such file or directory\n",
                dst
            )),
            Err(FsError::AlreadyExists { path, .. }) => {
                CommandResult::error(format!("cp: target '{}' already exists\n", path))
            }
            Err(e) => CommandResult::error(format!("cp: {}\n", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{FileSystem, InMemoryFs, MkdirOptions};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn make_ctx(fs: Arc<InMemoryFs>, args: Vec<&str>, cwd: &str) -> CommandContext {
        CommandContext {
            args: args.into_iter().map(String::from).collect(),
            cwd: cwd.to_string(),
            env: HashMap::new(),
            fs,
        }
    }

    #[tokio::test]
    async fn test_cp_file_to_new_path() {
        let fs = Arc::new(InMemoryFs::new());
        fs.write_file("/src.txt", b"content").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs.clone(), vec!["/src.txt", "/dest.txt"], "/"))
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(fs.read_file("/dest.txt").await.unwrap(), "content");
    }

    #[tokio::test]
    async fn test_cp_file_overwrites_file() {
        let fs = Arc::new(InMemoryFs::new());
        fs.write_file("/src.txt", b"new").await.unwrap();
        fs.write_file("/dest.txt", b"old").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs.clone(), vec!["/src.txt", "/dest.txt"], "/"))
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(fs.read_file("/dest.txt").await.unwrap(), "new");
    }

    #[tokio::test]
    async fn test_cp_into_directory_under_source_name() {
        let fs = Arc::new(InMemoryFs::new());
        fs.write_file("/src.txt", b"content").await.unwrap();
        fs.mkdir("/destdir", &MkdirOptions::default()).await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs.clone(), vec!["/src.txt", "/destdir"], "/"))
            .await;
        assert_eq!(result.exit_code, 0);
        assert!(fs.exists("/destdir/src.txt").await);
    }

    #[tokio::test]
    async fn test_cp_directory_without_r() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/srcdir", &MkdirOptions::default()).await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs, vec!["/srcdir", "/destdir"], "/"))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("omitting directory"));
    }

    #[tokio::test]
    async fn test_cp_directory_recursive() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/srcdir/sub", &MkdirOptions { recursive: true }).await.unwrap();
        fs.write_file("/srcdir/a.txt", b"a").await.unwrap();
        fs.write_file("/srcdir/sub/b.txt", b"b").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs.clone(), vec!["-r", "/srcdir", "/copy"], "/"))
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(fs.read_file("/copy/a.txt").await.unwrap(), "a");
        assert_eq!(fs.read_file("/copy/sub/b.txt").await.unwrap(), "b");
    }

    #[tokio::test]
    async fn test_cp_directory_into_directory_no_merge() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/srcdir", &MkdirOptions::default()).await.unwrap();
        fs.mkdir("/destdir/srcdir", &MkdirOptions { recursive: true }).await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs, vec!["-r", "/srcdir", "/destdir"], "/"))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("already exists"));
    }

    #[tokio::test]
    async fn test_cp_directory_onto_file() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/srcdir", &MkdirOptions::default()).await.unwrap();
        fs.write_file("/plain", b"x").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs, vec!["-r", "/srcdir", "/plain"], "/"))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("cannot overwrite non-directory"));
    }

    #[tokio::test]
    async fn test_cp_missing_source() {
        let fs = Arc::new(InMemoryFs::new());
        let result = CpCommand
            .execute(make_ctx(fs, vec!["/nope", "/dest"], "/"))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("cannot stat '/nope'"));
    }

    #[tokio::test]
    async fn test_cp_missing_destination_parent() {
        let fs = Arc::new(InMemoryFs::new());
        fs.write_file("/src.txt", b"x").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs, vec!["/src.txt", "/no/such/dest"], "/"))
            .await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("cannot create"));
    }

    #[tokio::test]
    async fn test_cp_usage() {
        let fs = Arc::new(InMemoryFs::new());
        let result = CpCommand.execute(make_ctx(fs, vec!["/only-one"], "/")).await;
        assert_eq!(result.exit_code, 1);
        assert!(result.stderr.contains("usage: cp"));
    }

    #[tokio::test]
    async fn test_cp_relative_paths() {
        let fs = Arc::new(InMemoryFs::new());
        fs.mkdir("/work", &MkdirOptions::default()).await.unwrap();
        fs.write_file("/work/in.txt", b"data").await.unwrap();
        let result = CpCommand
            .execute(make_ctx(fs.clone(), vec!["in.txt", "out.txt"], "/work"))
            .await;
        assert_eq!(result.exit_code, 0);
        assert_eq!(fs.read_file("/work/out.txt").await.unwrap(), "data");
    }
}
