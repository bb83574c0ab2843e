//! Prefix commands: registry, cooldowns, dispatch, and handlers.

mod cooldown;
mod dispatcher;
mod hello;
mod scale;

use std::collections::HashMap;
use std::time::Duration;

use strum::{Display, EnumIter, IntoEnumIterator};

use crate::error::{BotError, Result};

pub use cooldown::{Cooldown, CooldownScope, Cooldowns};
pub use dispatcher::{COMMAND_PREFIX, Dispatcher};
pub use scale::{ComparisonRequest, MAX_RESULT_CHARS};

const SCALE_COOLDOWN: Duration = Duration::from_secs(10);

/// Handler a command is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum CommandKind {
    Hello,
    Scale,
}

impl CommandKind {
    fn default_cooldown(self) -> Option<Cooldown> {
        match self {
            CommandKind::Hello => None,
            CommandKind::Scale => Some(Cooldown::per_user(SCALE_COOLDOWN)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Command {
    pub name: String,
    pub kind: CommandKind,
    pub cooldown: Option<Cooldown>,
}

impl Command {
    /// A built-in command, named after its kind.
    #[must_use]
    pub fn builtin(kind: CommandKind) -> Self {
        Self {
            name: kind.to_string(),
            kind,
            cooldown: kind.default_cooldown(),
        }
    }
}

/// Commands known to the dispatcher, keyed by exact name.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    /// Registry holding every built-in command.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for kind in CommandKind::iter() {
            registry.register(Command::builtin(kind))?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.commands.contains_key(&command.name) {
            return Err(BotError::DuplicateCommand(command.name));
        }
        self.commands.insert(command.name.clone(), command);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}
