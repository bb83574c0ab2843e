//! Platform side effects the core logic depends on.

use std::future::Future;

use poise::serenity_prelude::{ChannelId, MessageId, UserId};

use crate::error::Result;
use crate::types::Reply;

/// Outbound operations against the chat platform.
pub trait Gateway: Send + Sync {
    fn send_message(
        &self,
        channel: ChannelId,
        reply: Reply,
    ) -> impl Future<Output = Result<()>> + Send;

    fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Fails when the user does not accept direct messages.
    fn send_direct_message(
        &self,
        user: UserId,
        reply: Reply,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Where a command handler emits replies before its final one.
pub trait ReplySink: Send + Sync {
    fn emit(&self, reply: Reply) -> impl Future<Output = Result<()>> + Send;
}

/// Sends every emitted reply to one channel.
pub struct ChannelSink<'a, G> {
    gateway: &'a G,
    channel: ChannelId,
}

impl<'a, G: Gateway> ChannelSink<'a, G> {
    pub fn new(gateway: &'a G, channel: ChannelId) -> Self {
        Self { gateway, channel }
    }
}

impl<G: Gateway> ReplySink for ChannelSink<'_, G> {
    fn emit(&self, reply: Reply) -> impl Future<Output = Result<()>> + Send {
        self.gateway.send_message(self.channel, reply)
    }
}
