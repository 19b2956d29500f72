use std::{future::Future, pin::Pin};

use poise::{
    serenity_prelude::{self as serenity, ComponentInteraction, FullEvent, Interaction, Message},
    FrameworkContext,
};
use thiserror::Error;
use thisslime::TracingError;
use tracing::{debug, instrument, warn};

use crate::{
    discord,
    errors::{CommandError, SendMessageError},
    hat::{ButtonAction, Event, Hat},
    utils::{
        poise::display_name,
        serenity::{channel::MessageExt, component_interaction::ComponentInteractionExt},
    },
};

use super::data::PoiseData;

#[derive(Debug, Error, TracingError)]
#[span(level = WARN)]
pub enum HandlerError {
    #[error(transparent)]
    SendMessage(#[from] SendMessageError),

    #[error("failed to answer interaction: {0}")]
    #[event(level = ERROR)]
    Interaction(#[from] serenity::Error),
}

/// Plain text sent straight to the bot, which is how words go into the hat.
fn is_word_submission(msg: &Message, bot_id: serenity::UserId, prefix: &str) -> bool {
    msg.guild_id.is_none()
        && msg.author.id != bot_id
        && !msg.author.bot
        && !msg.content.starts_with(prefix)
}

#[instrument(skip_all, fields(author = %msg.author.id))]
async fn submit_word(
    serenity_ctx: &serenity::Context,
    msg: &Message,
    data: &PoiseData,
) -> Result<(), HandlerError> {
    let origin = discord::origin(
        msg.author.id,
        display_name(&msg.author),
        msg.channel_id,
        msg.guild_id,
        data.config().game.channel(),
    );

    if let Err(err) = data
        .hat()
        .dispatch(Event::SubmitWord(origin, msg.content.clone()))
        .await
    {
        err.trace();
        msg.reply_ext(serenity_ctx, err.to_string()).await?;
    }

    Ok(())
}

/// The two ways a game button press gets answered on the chat platform.
pub(crate) trait PressReply {
    type Error;

    /// Tells the platform the press arrived, before any game work happens.
    async fn defer(&self) -> Result<(), Self::Error>;

    async fn reject(&self, text: String) -> Result<(), Self::Error>;
}

struct ButtonPress<'a> {
    serenity_ctx: &'a serenity::Context,
    interaction: &'a ComponentInteraction,
}

impl PressReply for ButtonPress<'_> {
    type Error = serenity::Error;

    async fn defer(&self) -> serenity::Result<()> {
        self.interaction.acknowledge(self.serenity_ctx).await
    }

    async fn reject(&self, text: String) -> serenity::Result<()> {
        self.interaction
            .follow_up_ephemeral(self.serenity_ctx, text)
            .await
    }
}

/// Answers the press, then hands it to the game.
///
/// Discord gives up on a press left unanswered for three seconds, and the
/// game may post several messages while handling one.
async fn answer_press<R: PressReply>(
    reply: &R,
    hat: &Hat,
    event: Event,
) -> Result<(), R::Error> {
    reply.defer().await?;

    if let Err(err) = hat.dispatch(event).await {
        err.trace();
        reply.reject(err.to_string()).await?;
    }

    Ok(())
}

#[instrument(skip_all, fields(custom_id = interaction.custom_id()))]
async fn press_button(
    serenity_ctx: &serenity::Context,
    interaction: &ComponentInteraction,
    data: &PoiseData,
) -> Result<(), HandlerError> {
    let action: ButtonAction = match interaction.custom_id().parse() {
        Ok(action) => action,
        Err(err) => {
            warn!(%err, "ignoring malformed game button");
            interaction.acknowledge(serenity_ctx).await?;
            return Ok(());
        }
    };

    let origin = discord::origin(
        interaction.user.id,
        display_name(&interaction.user),
        interaction.channel_id,
        interaction.guild_id,
        data.config().game.channel(),
    );

    let press = ButtonPress {
        serenity_ctx,
        interaction,
    };
    answer_press(&press, data.hat(), Event::from_button(origin, action)).await?;

    Ok(())
}

async fn event_handler(
    serenity_ctx: &serenity::Context,
    event: &FullEvent,
    framework_ctx: FrameworkContext<'_, PoiseData, CommandError>,
    data: &PoiseData,
) -> Result<(), HandlerError> {
    match event {
        FullEvent::Message { new_message: msg }
            if is_word_submission(msg, framework_ctx.bot_id, data.config().bot.prefix()) =>
        {
            submit_word(serenity_ctx, msg, data).await?;
        }
        FullEvent::InteractionCreate {
            interaction: Interaction::Component(interaction),
        } if ButtonAction::is_ours(interaction.custom_id()) => {
            press_button(serenity_ctx, interaction, data).await?;
        }
        FullEvent::Resume { .. } => debug!("gateway session resumed"),
        _ => (),
    }

    Ok(())
}

pub fn poise<'a>(
    serenity_ctx: &'a serenity::Context,
    event: &'a FullEvent,
    framework_ctx: FrameworkContext<'a, PoiseData, CommandError>,
    data: &'a PoiseData,
) -> Pin<Box<dyn Future<Output = Result<(), CommandError>> + Send + 'a>> {
    Box::pin(async move {
        event_handler(serenity_ctx, event, framework_ctx, data)
            .await
            .map_err(CommandError::from)
    })
}
