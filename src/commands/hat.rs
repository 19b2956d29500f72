use poise::builtins::HelpConfiguration;
use tracing::{error, info, instrument};

use crate::{
    commands::LogCommands,
    discord,
    errors::SendMessageError,
    hat::{Event, Origin, Rejection},
    utils::{
        poise::{display_name, CommandResult, ContextExt},
        Context,
    },
};

/// Play the Hat, a team word-guessing game
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL",
    subcommands("start", "join", "next", "reset", "echo")
)]
pub async fn hat(ctx: Context<'_>) -> CommandResult {
    ctx.log_command().await;

    let config = HelpConfiguration {
        ephemeral: true,
        show_subcommands: true,
        ..Default::default()
    };
    poise::builtins::help(ctx, Some("hat"), config)
        .await
        .map_err(SendMessageError::from)?;

    Ok(())
}

fn origin(ctx: Context<'_>) -> Origin {
    discord::origin(
        ctx.author().id,
        display_name(ctx.author()),
        ctx.channel_id(),
        ctx.guild_id(),
        ctx.data().config().game.channel(),
    )
}

async fn dispatch(ctx: Context<'_>, event: impl FnOnce(Origin) -> Event) -> CommandResult {
    ctx.log_command().await;

    if ctx.defer_ephemeral().await.is_err() {
        error!("failed to defer - lag will cause errors!");
    }

    ctx.data().hat().dispatch(event(origin(ctx))).await?;
    ctx.acknowledge().await?;

    Ok(())
}

/// Open a new game in this channel
#[instrument(skip_all)]
#[poise::command(slash_command, prefix_command)]
pub async fn start(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Event::Start).await
}

/// Join the game that is being prepared
#[instrument(skip_all)]
#[poise::command(slash_command, prefix_command)]
pub async fn join(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Event::Join).await
}

/// Form teams or move on to the next round once everyone is ready
#[instrument(skip_all)]
#[poise::command(slash_command, prefix_command)]
pub async fn next(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Event::Advance).await
}

/// Throw the current game away
#[instrument(skip_all)]
#[poise::command(slash_command, prefix_command)]
pub async fn reset(ctx: Context<'_>) -> CommandResult {
    dispatch(ctx, Event::Reset).await
}

/// Show the ids of this chat and of you
#[instrument(skip_all)]
#[poise::command(slash_command, prefix_command)]
pub async fn echo(ctx: Context<'_>) -> CommandResult {
    ctx.log_command().await;

    if ctx.data().config().game.admin() != Some(ctx.author().id) {
        return Err(Rejection::NotAdmin.into());
    }

    let (chat, user) = (ctx.channel_id(), ctx.author().id);
    info!(%chat, %user, "echo");

    ctx.reply_ephemeral(format!("chat id: {chat}\nuser id: {user}"))
        .await?;

    Ok(())
}
