//! Inbound platform events and the rules the bot reacts with.

use std::time::Duration;

use log::{debug, info, warn};
use poise::serenity_prelude::{ChannelId, MessageId, UserId};

use crate::commands::Dispatcher;
use crate::gateway::{ChannelSink, Gateway};
use crate::openai::CompletionClient;
use crate::types::{ColorTag, Reply, UserRef};

/// Delay before a new member is greeted.
pub const WELCOME_DELAY: Duration = Duration::from_secs(1);

/// Messages containing this (any case) are deleted.
pub const FORBIDDEN_WORD: &str = "elijah";

#[derive(Debug, Clone)]
pub enum InboundEvent {
    MemberJoined {
        member: UserRef,
    },
    MessageReceived {
        message: MessageId,
        channel: ChannelId,
        author: UserRef,
        content: String,
    },
}

/// A side effect on the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SendMessage { channel: ChannelId, reply: Reply },
    DeleteMessage { channel: ChannelId, message: MessageId },
    SendDirectMessage { user: UserId, reply: Reply },
}

fn contains_forbidden_word(content: &str) -> bool {
    content.to_lowercase().contains(FORBIDDEN_WORD)
}

/// Applies the reaction rules and forwards messages to the dispatcher.
pub struct EventRouter<C> {
    dispatcher: Dispatcher<C>,
}

impl<C: CompletionClient> EventRouter<C> {
    pub fn new(dispatcher: Dispatcher<C>) -> Self {
        Self { dispatcher }
    }

    /// Reaction rule actions for `event`, not including command replies.
    pub fn plan(&self, event: &InboundEvent, bot_id: UserId) -> Vec<Action> {
        match event {
            InboundEvent::MemberJoined { member } => vec![Action::SendDirectMessage {
                user: member.id,
                reply: Reply::new(
                    format!("Welcome to the server, {}!", member.name),
                    ColorTag::Green,
                )
                .with_title("Welcome!"),
            }],
            InboundEvent::MessageReceived { author, .. } if author.id == bot_id => Vec::new(),
            InboundEvent::MessageReceived {
                message,
                channel,
                author,
                content,
            } => {
                if !contains_forbidden_word(content) {
                    return Vec::new();
                }
                vec![
                    Action::DeleteMessage {
                        channel: *channel,
                        message: *message,
                    },
                    Action::SendMessage {
                        channel: *channel,
                        reply: Reply::new(
                            format!("{}, you shouldn't say that name!", author.mention()),
                            ColorTag::Red,
                        ),
                    },
                ]
            }
        }
    }

    /// Handle `event` end to end, returning the actions attempted in order.
    pub async fn handle<G: Gateway>(
        &self,
        gateway: &G,
        event: InboundEvent,
        bot_id: UserId,
    ) -> Vec<Action> {
        let mut actions = self.plan(&event, bot_id);

        match event {
            InboundEvent::MemberJoined { member } => {
                info!("New member joined: {member}");
                tokio::time::sleep(WELCOME_DELAY).await;
                for action in &actions {
                    self.perform(gateway, action.clone()).await;
                }
            }
            InboundEvent::MessageReceived { author, .. } if author.id == bot_id => {}
            InboundEvent::MessageReceived {
                channel,
                author,
                content,
                ..
            } => {
                for action in &actions {
                    self.perform(gateway, action.clone()).await;
                }
                if !actions.is_empty() {
                    info!("Removed forbidden word from {author} in channel {channel}");
                }

                // Other bots may trip the word filter but never run commands.
                if author.is_bot {
                    debug!("Not dispatching message from bot {author}");
                    return actions;
                }

                let sink = ChannelSink::new(gateway, channel);
                if let Some(reply) = self.dispatcher.dispatch(&content, &author, &sink).await {
                    let action = Action::SendMessage { channel, reply };
                    self.perform(gateway, action.clone()).await;
                    actions.push(action);
                }
            }
        }

        actions
    }

    async fn perform<G: Gateway>(&self, gateway: &G, action: Action) {
        match action {
            Action::SendMessage { channel, reply } => {
                if let Err(e) = gateway.send_message(channel, reply).await {
                    warn!("Failed to send message to channel {channel}: {e}");
                }
            }
            Action::DeleteMessage { channel, message } => {
                if let Err(e) = gateway.delete_message(channel, message).await {
                    warn!("Failed to delete message {message} in channel {channel}: {e}");
                }
            }
            Action::SendDirectMessage { user, reply } => {
                // Members with DMs closed are expected; nothing to report.
                if let Err(e) = gateway.send_direct_message(user, reply).await {
                    debug!("Could not direct message {user}: {e}");
                }
            }
        }
    }
}
