//! Recording fakes for the gateway, reply sink, and completion client.

use std::sync::Mutex;

use poise::serenity_prelude::{ChannelId, Error as SerenityError, MessageId, UserId};

use crate::error::{BotError, Result};
use crate::events::Action;
use crate::gateway::{Gateway, ReplySink};
use crate::openai::CompletionClient;
use crate::types::Reply;

enum Behavior {
    Reply(String),
    Fail(String),
    Panic,
}

pub struct FakeCompletion {
    behavior: Behavior,
    requests: Mutex<Vec<(String, f32)>>,
}

impl FakeCompletion {
    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::with(Behavior::Reply(text.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with(Behavior::Fail(message.to_string()))
    }

    pub fn panicking() -> Self {
        Self::with(Behavior::Panic)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(p, _)| p.clone())
    }

    pub fn last_temperature(&self) -> Option<f32> {
        self.requests.lock().unwrap().last().map(|(_, t)| *t)
    }
}

impl CompletionClient for FakeCompletion {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((prompt.to_string(), temperature));
        tokio::task::yield_now().await;
        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail(message) => Err(BotError::CompletionResponse(message.clone())),
            Behavior::Panic => panic!("completion exploded"),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    fail: bool,
    replies: Mutex<Vec<Reply>>,
}

impl RecordingSink {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn replies(&self) -> Vec<Reply> {
        self.replies.lock().unwrap().clone()
    }
}

impl ReplySink for RecordingSink {
    async fn emit(&self, reply: Reply) -> Result<()> {
        if self.fail {
            return Err(SerenityError::Other("Missing Permissions").into());
        }
        self.replies.lock().unwrap().push(reply);
        Ok(())
    }
}

/// Records every successful platform call as an [`Action`].
#[derive(Default)]
pub struct RecordingGateway {
    reject_direct_messages: bool,
    actions: Mutex<Vec<Action>>,
}

impl RecordingGateway {
    pub fn rejecting_direct_messages() -> Self {
        Self {
            reject_direct_messages: true,
            ..Self::default()
        }
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }
}

impl Gateway for RecordingGateway {
    async fn send_message(&self, channel: ChannelId, reply: Reply) -> Result<()> {
        self.actions
            .lock()
            .unwrap()
            .push(Action::SendMessage { channel, reply });
        Ok(())
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        self.actions
            .lock()
            .unwrap()
            .push(Action::DeleteMessage { channel, message });
        Ok(())
    }

    async fn send_direct_message(&self, user: UserId, reply: Reply) -> Result<()> {
        if self.reject_direct_messages {
            return Err(SerenityError::Other("Cannot send messages to this user").into());
        }
        self.actions
            .lock()
            .unwrap()
            .push(Action::SendDirectMessage { user, reply });
        Ok(())
    }
}
