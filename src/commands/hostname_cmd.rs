use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

pub struct HostnameCommand;

#[async_trait]
impl Command for HostnameCommand {
    fn name(&self) -> &'static str {
        "hostname"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let hostname = ctx
            .env
            .get("HOSTNAME")
            .cloned()
            .unwrap_or_else(|| "localhost".to_string());
        CommandResult::success(format!("{}\n", hostname))
    }
}
