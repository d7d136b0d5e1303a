// src/commands/registry.rs
use super::types::Command;
use std::collections::HashMap;

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    pub fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name().to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(|s| s.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use super::cp::CpCommand;
use super::echo::EchoCommand;
use super::find::FindCommand;
use super::hostname_cmd::HostnameCommand;
use super::ls::LsCommand;
use super::pwd::PwdCommand;
use super::touch::TouchCommand;
use super::uname_cmd::UnameCommand;
use super::whoami_cmd::WhoamiCommand;

/// Register the emulator's command set
pub fn register_core(registry: &mut CommandRegistry) {
    registry.register(Box::new(EchoCommand));
    registry.register(Box::new(PwdCommand));
    registry.register(Box::new(UnameCommand));
    registry.register(Box::new(LsCommand));
    registry.register(Box::new(FindCommand));
    registry.register(Box::new(TouchCommand));
    registry.register(Box::new(CpCommand));
    registry.register(Box::new(WhoamiCommand));
    registry.register(Box::new(HostnameCommand));
}

/// Create a registry with the full command set
pub fn create_core_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    register_core(&mut registry);
    registry
}
