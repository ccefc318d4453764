use std::collections::HashMap;

use crate::cli::core::CommandResult;
use crate::cli::shell_context::ShellContext;

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Headings used to group commands in `help`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Form,
    Answers,
    System,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 3] = [
        CommandGroup::Form,
        CommandGroup::Answers,
        CommandGroup::System,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Form => "Form",
            CommandGroup::Answers => "Answers",
            CommandGroup::System => "System",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub group: CommandGroup,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        group: CommandGroup,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            group,
            description,
            usage,
            handler,
        }
    }
}

/// Command lookup by lowercase name, remembering registration order.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, CommandEntry>,
    order: Vec<&'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing any earlier command of the same name in place.
    pub fn register(&mut self, entry: CommandEntry) {
        let name = entry.name;
        if self.commands.insert(name, entry).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.commands.get(name)
    }

    pub fn in_group(&self, group: CommandGroup) -> Vec<&CommandEntry> {
        self.order
            .iter()
            .filter_map(|name| self.commands.get(name))
            .filter(|entry| entry.group == group)
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.commands.get(name).map(|entry| entry.handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
        Ok(())
    }

    #[test]
    fn re_registering_keeps_the_original_position() {
        let mut registry = CommandRegistry::new();
        registry.register(CommandEntry::new("save", CommandGroup::Form, "first", "save", noop));
        registry.register(CommandEntry::new("set", CommandGroup::Answers, "", "set", noop));
        registry.register(CommandEntry::new("save", CommandGroup::Form, "second", "save", noop));

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["save", "set"]);
        assert_eq!(registry.get("save").map(|entry| entry.description), Some("second"));
        assert_eq!(registry.in_group(CommandGroup::Answers).len(), 1);
        assert!(registry.in_group(CommandGroup::System).is_empty());
        assert!(registry.handler("exit").is_none());
    }
}
