use poise::builtins::HelpConfiguration;
use tracing::instrument;

use crate::{
    errors::SendMessageError,
    utils::{poise::CommandResult, Context},
};

const ABOUT: &str = "\
Join a game of the Hat: drop a few names into the hat in a DM to me, \
then take turns explaining them to your team against the clock.";

/// Shows what the bot can do
#[instrument(skip_all)]
#[poise::command(
    slash_command,
    prefix_command,
    discard_spare_arguments,
    required_bot_permissions = "SEND_MESSAGES | VIEW_CHANNEL"
)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "specific command to display help for"] command: Option<String>,
) -> CommandResult {
    let config = HelpConfiguration {
        extra_text_at_bottom: ABOUT,
        ephemeral: true,
        show_subcommands: true,
        ..Default::default()
    };

    poise::builtins::help(ctx, command.as_deref(), config)
        .await
        .map_err(SendMessageError::from)?;

    Ok(())
}
