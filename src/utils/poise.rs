use poise::{
    serenity_prelude::{self as serenity, ReactionType},
    CreateReply,
};

use crate::{errors::SendMessageError, framework::data::PoiseData};

pub type Context<'a> = poise::Context<'a, PoiseData, crate::errors::CommandError>;

pub type Error = crate::errors::CommandError;
pub type Command = poise::Command<PoiseData, Error>;
pub type CommandResult = Result<(), Error>;

pub trait ContextExt {
    async fn reply_ephemeral(
        &self,
        text: impl Into<String>,
    ) -> Result<poise::ReplyHandle<'_>, SendMessageError>;

    /// Confirms a command that has nothing else to say.
    ///
    /// Prefix invocations get a reaction, slash commands a hidden reply.
    async fn acknowledge(&self) -> Result<(), SendMessageError>;
}

impl ContextExt for Context<'_> {
    async fn reply_ephemeral(
        &self,
        text: impl Into<String>,
    ) -> Result<poise::ReplyHandle<'_>, SendMessageError> {
        let builder = CreateReply::default()
            .reply(true)
            .ephemeral(true)
            .content(text);
        self.send(builder).await.map_err(SendMessageError::from)
    }

    async fn acknowledge(&self) -> Result<(), SendMessageError> {
        match self {
            poise::Context::Prefix(prefix) => {
                prefix
                    .msg
                    .react(self, ReactionType::Unicode("✅".to_owned()))
                    .await?;
            }
            poise::Context::Application(_) => {
                self.reply_ephemeral("✅").await?;
            }
        }

        Ok(())
    }
}

/// The name a user goes by outside of any one server.
pub fn display_name(user: &serenity::User) -> &str {
    user.global_name.as_deref().unwrap_or(&user.name)
}
