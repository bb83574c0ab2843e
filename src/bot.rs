//! Discord client setup and the serenity side of the gateway.

use log::{debug, info};
use poise::{
    Framework, FrameworkOptions,
    serenity_prelude::{
        ChannelId, ClientBuilder, Colour, Context, CreateEmbed, CreateMessage, FullEvent,
        GatewayIntents, MessageId, UserId,
    },
};

use crate::commands::{CommandRegistry, Dispatcher};
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::events::{EventRouter, InboundEvent};
use crate::gateway::Gateway;
use crate::openai::OpenAiClient;
use crate::types::{Reply, UserRef};

struct Data {
    router: EventRouter<OpenAiClient>,
}

/// Run the Discord bot.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing OpenAI client");
    let completion = OpenAiClient::new(
        config.openai_api_key,
        config.openai_model,
        &config.openai_base_url,
    );
    let router = EventRouter::new(Dispatcher::new(CommandRegistry::builtin()?, completion));

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |_ctx, ready, _framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.tag());
                Ok(Data { router })
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn event_handler(ctx: &Context, event: &FullEvent, data: &Data) -> Result<()> {
    let inbound = match event {
        FullEvent::GuildMemberAddition { new_member } => InboundEvent::MemberJoined {
            member: UserRef::from(&new_member.user),
        },
        FullEvent::Message { new_message } => InboundEvent::MessageReceived {
            message: new_message.id,
            channel: new_message.channel_id,
            author: UserRef::from(&new_message.author),
            content: new_message.content.clone(),
        },
        _ => return Ok(()),
    };

    let bot_id = ctx.cache.current_user().id;
    let actions = data
        .router
        .handle(&SerenityGateway { ctx }, inbound, bot_id)
        .await;
    debug!("Event handled with {} actions", actions.len());
    Ok(())
}

fn embed(reply: Reply) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .description(reply.body)
        .colour(Colour::new(reply.color.rgb()));
    match reply.title {
        Some(title) => embed.title(title),
        None => embed,
    }
}

/// [`Gateway`] backed by a live serenity context.
struct SerenityGateway<'a> {
    ctx: &'a Context,
}

impl Gateway for SerenityGateway<'_> {
    async fn send_message(&self, channel: ChannelId, reply: Reply) -> Result<()> {
        channel
            .send_message(&self.ctx.http, CreateMessage::new().embed(embed(reply)))
            .await?;
        Ok(())
    }

    async fn delete_message(&self, channel: ChannelId, message: MessageId) -> Result<()> {
        channel
            .delete_message(&self.ctx.http, message)
            .await
            .map_err(BotError::from)
    }

    async fn send_direct_message(&self, user: UserId, reply: Reply) -> Result<()> {
        user.direct_message(&self.ctx.http, CreateMessage::new().embed(embed(reply)))
            .await?;
        Ok(())
    }
}
