// src/commands/find/mod.rs
pub mod matcher;
pub mod parser;
pub mod types;

use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

use matcher::Matcher;

pub struct FindCommand;

#[async_trait]
impl Command for FindCommand {
    fn name(&self) -> &'static str {
        "find"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let spec = match parser::parse_args(&ctx.args) {
            Ok(spec) => spec,
            Err(msg) => return CommandResult::error(format!("{}\n", msg)),
        };
        let matcher = match Matcher::new(&spec) {
            Ok(m) => m,
            Err(msg) => return CommandResult::error(format!("{}\n", msg)),
        };

        let start = ctx.fs.resolve_path(&ctx.cwd, &spec.path);
        let start_stat = match ctx.fs.stat(&start).await {
            Ok(s) => s,
            Err(_) => {
                return CommandResult::error(format!(
                    "find: '{}': No such file or directory\n",
                    spec.path
                ));
            }
        };

        // Preorder DFS; the start node itself is at depth 0 and -maxdepth
        // bounds descent inclusively.
        let mut stdout = String::new();
        let mut stack: Vec<(String, usize, bool)> = vec![(start, 0, start_stat.is_directory)];
        while let Some((path, depth, is_directory)) = stack.pop() {
            let name = if path == "/" {
                "/"
            } else {
                path.rsplit('/').next().unwrap_or("")
            };
            if matcher.matches(name, is_directory) {
                stdout.push_str(&path);
                stdout.push('\n');
            }
            if is_directory && spec.max_depth.map_or(true, |max| depth < max) {
                if let Ok(entries) = ctx.fs.readdir_with_file_types(&path).await {
                    // entries come sorted; push reversed so the stack pops
                    // them in order
                    for entry in entries.into_iter().rev() {
                        let child = if path == "/" {
                            format!("/{}", entry.name)
                        } else {
                            format!("{}/{}", path, entry.name)
                        };
                        stack.push((child, depth + 1, entry.is_directory));
                    }
                }
            }
        }

        CommandResult::success(stdout)
    }
}
