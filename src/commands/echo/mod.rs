// src/commands/echo/mod.rs
use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

pub struct EchoCommand;

#[async_trait]
impl Command for EchoCommand {
    fn name(&self) -> &'static str {
        "echo"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let mut output = ctx.args.join(" ");
        output.push('\n');
        CommandResult::success(output)
    }
}
