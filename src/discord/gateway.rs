use std::{
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use poise::serenity_prelude::{
    ChannelId, CreateButton, CreateMessage, EditMessage, Http, MessageId, UserId,
};
use tracing::trace;

use crate::{
    errors::SendMessageError,
    hat::{Button, ChatId, Gateway, MessageHandle, PlayerId, Target},
    utils::serenity::buttons::AddButton,
};

/// Private channels already opened, by player.
#[derive(Debug, Clone, Default)]
struct DmChannels(Arc<Mutex<HashMap<PlayerId, ChannelId>>>);

impl DmChannels {
    async fn get_or_open<F, E>(&self, player: PlayerId, open: F) -> Result<ChannelId, E>
    where
        F: Future<Output = Result<ChannelId, E>>,
    {
        let cached = self.lock().get(&player).copied();
        if let Some(channel) = cached {
            return Ok(channel);
        }

        let channel = open.await?;
        trace!(?player, %channel, "opened private channel");
        self.lock().insert(player, channel);

        Ok(channel)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PlayerId, ChannelId>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Delivers game messages through the Discord REST api.
#[derive(Clone)]
pub struct DiscordGateway {
    http: Arc<Http>,
    game_channel: ChannelId,
    dm_channels: DmChannels,
}

impl DiscordGateway {
    pub fn new(http: Arc<Http>, game_channel: ChannelId) -> Self {
        Self {
            http,
            game_channel,
            dm_channels: DmChannels::default(),
        }
    }

    async fn channel(&self, target: Target) -> Result<ChannelId, SendMessageError> {
        match target {
            Target::Game => Ok(self.game_channel),
            Target::Player(player) => {
                let open = async {
                    let dm = UserId::new(player.0)
                        .create_dm_channel(&self.http)
                        .await?;
                    Ok::<_, SendMessageError>(dm.id)
                };

                self.dm_channels.get_or_open(player, open).await
            }
        }
    }
}

impl Gateway for DiscordGateway {
    type Error = SendMessageError;

    fn send_message(
        &self,
        target: Target,
        text: String,
        buttons: Vec<Button>,
    ) -> impl Future<Output = Result<MessageHandle, Self::Error>> + Send {
        async move {
            let channel = self.channel(target).await?;
            let message = CreateMessage::new()
                .content(text)
                .add_buttons(buttons.iter().map(CreateButton::from));

            let sent = channel.send_message(&self.http, message).await?;
            trace!(?target, message = %sent.id, "sent");

            Ok(MessageHandle {
                chat: ChatId(sent.channel_id.get()),
                message: sent.id.get(),
            })
        }
    }

    fn retract_actions(
        &self,
        handle: MessageHandle,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        async move {
            ChannelId::new(handle.chat.0)
                .edit_message(
                    &self.http,
                    MessageId::new(handle.message),
                    EditMessage::new().components(Vec::new()),
                )
                .await?;

            Ok(())
        }
    }

    fn schedule_once<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::DmChannels;
    use crate::hat::PlayerId;
    use poise::serenity_prelude::ChannelId;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn private_channels_are_opened_once_per_player() {
        let channels = DmChannels::default();
        let opened = AtomicUsize::new(0);
        let open = |id: u64| {
            let opened = &opened;
            async move {
                opened.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Infallible>(ChannelId::new(id))
            }
        };

        for _ in 0..3 {
            let channel = channels
                .get_or_open(PlayerId(1), open(10))
                .await
                .expect("infallible");
            assert_eq!(channel, ChannelId::new(10));
        }
        let other = channels
            .get_or_open(PlayerId(2), open(20))
            .await
            .expect("infallible");

        assert_eq!(other, ChannelId::new(20));
        assert_eq!(opened.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_opens_are_retried() {
        let channels = DmChannels::default();

        let failed = channels
            .get_or_open(PlayerId(1), async { Err::<ChannelId, _>("offline") })
            .await;
        assert_eq!(failed, Err("offline"));

        let channel = channels
            .get_or_open(PlayerId(1), async { Ok::<_, &str>(ChannelId::new(10)) })
            .await;
        assert_eq!(channel, Ok(ChannelId::new(10)));
    }
}
