// src/commands/pwd/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

pub struct PwdCommand;

#[async_trait]
impl Command for PwdCommand {
    fn name(&self) -> &'static str {
        "pwd"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        // cwd is kept normalized and absolute by the interpreter
        CommandResult::success(format!("{}\n", ctx.cwd))
    }
}
