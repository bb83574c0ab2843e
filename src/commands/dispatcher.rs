//! Prefix parsing, cooldown gating, and handler invocation.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::{debug, error, info};
use tokio::time::Instant;

use crate::error::BotError;
use crate::gateway::ReplySink;
use crate::openai::CompletionClient;
use crate::types::{ColorTag, Reply, UserRef};

use super::{Command, CommandKind, CommandRegistry, Cooldowns, hello, scale};

pub const COMMAND_PREFIX: char = '!';

/// Process-wide command state: the registry, cooldowns, and completion client.
pub struct Dispatcher<C> {
    registry: CommandRegistry,
    cooldowns: Cooldowns,
    completion: C,
}

impl<C: CompletionClient> Dispatcher<C> {
    pub fn new(registry: CommandRegistry, completion: C) -> Self {
        Self {
            registry,
            cooldowns: Cooldowns::default(),
            completion,
        }
    }

    /// Run the command in `content`, if any.
    ///
    /// Returns `None` for non-commands and unknown commands. Cooldown
    /// rejections and handler panics come back as replies.
    pub async fn dispatch<S: ReplySink>(
        &self,
        content: &str,
        author: &UserRef,
        sink: &S,
    ) -> Option<Reply> {
        let invocation = content.strip_prefix(COMMAND_PREFIX)?;
        let (name, args) = invocation
            .split_once(char::is_whitespace)
            .map_or((invocation, ""), |(name, args)| (name, args.trim_start()));

        let Some(command) = self.registry.get(name) else {
            debug!("Ignoring unknown command {name:?} from {author}");
            return None;
        };

        if let Some(cooldown) = command.cooldown
            && let Err(remaining) =
                self.cooldowns
                    .try_acquire(&command.name, cooldown, author.id, Instant::now())
        {
            info!("{author} hit the cooldown for !{name} ({remaining:?} left)");
            let err = BotError::Cooldown {
                command: command.name.clone(),
                remaining,
            };
            return Some(Reply::new(err.to_string(), ColorTag::Orange).with_title("Slow down"));
        }

        info!("{author} invoked !{name}");
        match AssertUnwindSafe(self.invoke(command, args, author, sink))
            .catch_unwind()
            .await
        {
            Ok(reply) => Some(reply),
            Err(panic) => {
                let cause = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("unknown panic");
                error!("Command !{name} from {author} panicked: {cause}");
                Some(Reply::new(
                    format!("Something went wrong while running `!{name}`."),
                    ColorTag::Red,
                ))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn completion(&self) -> &C {
        &self.completion
    }

    async fn invoke<S: ReplySink>(
        &self,
        command: &Command,
        args: &str,
        author: &UserRef,
        sink: &S,
    ) -> Reply {
        match command.kind {
            CommandKind::Hello => hello::reply(author),
            CommandKind::Scale => scale::run(args, &self.completion, sink).await,
        }
    }
}
