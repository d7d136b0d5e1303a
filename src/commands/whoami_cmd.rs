use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

pub struct WhoamiCommand;

#[async_trait]
impl Command for WhoamiCommand {
    fn name(&self) -> &'static str {
        "whoami"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let user = ctx
            .env
            .get("USER")
            .cloned()
            .unwrap_or_else(|| "user".to_string());
        CommandResult::success(format!("{}\n", user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::InMemoryFs;
    use std::collections::HashMap;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_whoami() {
        let mut env = HashMap::new();
        env.insert("USER".to_string(), "alice".to_string());
        let ctx = CommandContext {
            args: vec![],
            cwd: "/".to_string(),
            env,
            fs: Arc::new(InMemoryFs::new()),
        };
        let result = WhoamiCommand.execute(ctx).await;
        assert_eq!(result.stdout, "alice\n");
    }

    #[tokio::test]
    async fn test_whoami_default() {
        let ctx = CommandContext {
            args: vec![],
            cwd: "/".to_string(),
            env: HashMap::new(),
            fs: Arc::new(InMemoryFs::new()),
        };
        let result = WhoamiCommand.execute(ctx).await;
        assert_eq!(result.stdout, "user\n");
    }
}
