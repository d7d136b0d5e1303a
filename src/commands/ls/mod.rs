// src/commands/ls/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

pub struct LsCommand;

#[async_trait]
impl Command for LsCommand {
    fn name(&self) -> &'static str {
        "ls"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let path = ctx.args.first().map(|s| s.as_str()).unwrap_or(".");
        let full_path = ctx.fs.resolve_path(&ctx.cwd, path);

        let stat = match ctx.fs.stat(&full_path).await {
            Ok(s) => s,
            Err(_) => {
                return CommandResult::with_exit_code(
                    String::new(),
                    format!("ls: cannot access '{}': No such file or directory\n", path),
                    2,
                );
            }
        };

        if stat.is_file {
            let name = full_path.rsplit('/').next().unwrap_or(&full_path);
            return CommandResult::success(format!("{}\n", name));
        }

        let entries = match ctx.fs.readdir_with_file_types(&full_path).await {
            Ok(entries) => entries,
            Err(e) => return CommandResult::error(format!("ls: {}\n", e)),
        };

        // Directories carry a trailing slash; entries come sorted
        // case-insensitively and are joined by two spaces.
        let mut names: Vec<String> = entries
            .into_iter()
            .map(|e| {
                if e.is_directory {
                    format!("{}/", e.name)
                } else {
                    e.name
                }
            })
            .collect();
        names.sort_by_key(|n| n.to_lowercase());

        CommandResult::success(format!("{}\n", names.join("  ")))
    }
}
