use crate::commands::{Command, CommandContext, CommandResult};
use async_trait::async_trait;

const SYSNAME: &str = "VFS-Emu";
const RELEASE: &str = "0.1";
const MACHINE: &str = "x86_64";
const OS: &str = "GNU/Linux";

pub struct UnameCommand;

#[async_trait]
impl Command for UnameCommand {
    fn name(&self) -> &'static str {
        "uname"
    }

    async fn execute(&self, ctx: CommandContext) -> CommandResult {
        let hostname = ctx
            .env
            .get("HOSTNAME")
            .cloned()
            .unwrap_or_else(|| "localhost".to_string());

        let flags: Vec<&String> = ctx.args.iter().filter(|a| a.starts_with('-')).collect();
        if flags.is_empty() {
            return CommandResult::success(format!("{}\n", SYSNAME));
        }
        if flags.iter().any(|f| f.as_str() == "-a") {
            return CommandResult::success(format!(
                "{} {} {} {} {}\n",
                SYSNAME, hostname, RELEASE, MACHINE, OS
            ));
        }

        let mut out: Vec<&str> = Vec::new();
        for flag in &flags {
            match flag.as_str() {
                "-s" => out.push(SYSNAME),
                "-n" => out.push(&hostname),
                "-r" => out.push(RELEASE),
                "-m" | "-p" => out.push(MACHINE),
                "-o" => out.push(OS),
                other => {
                    return CommandResult::error(format!("uname: unknown option {}\n", other));
                }
            }
        }
        CommandResult::success(format!("{}\n", out.join(" ")))
    }
}
