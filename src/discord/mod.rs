//! Glue between Discord and the game.

mod gateway;
pub use gateway::DiscordGateway;

use poise::serenity_prelude::{ChannelId, GuildId, UserId};

use crate::hat::{Chat, ChatId, Origin, PlayerId};

/// Works out where an event came from, as far as the game cares.
///
/// Anything outside a guild is a direct message.
pub fn origin(
    user: UserId,
    name: &str,
    channel: ChannelId,
    guild: Option<GuildId>,
    game_channel: ChannelId,
) -> Origin {
    let chat = if channel == game_channel {
        Chat::Game
    } else if guild.is_none() {
        Chat::Private
    } else {
        Chat::Other(ChatId(channel.get()))
    };

    Origin::new(PlayerId(user.get()), name, chat)
}

#[cfg(test)]
mod tests {
    use super::origin;
    use crate::hat::{Chat, ChatId, PlayerId};
    use poise::serenity_prelude::{ChannelId, GuildId, UserId};
    use pretty_assertions::assert_eq;

    const GAME: ChannelId = ChannelId::new(100);

    #[test]
    fn classifies_chats() {
        let user = UserId::new(7);
        let guild = Some(GuildId::new(1));

        let game = origin(user, "ann", GAME, guild, GAME);
        assert_eq!(game.chat, Chat::Game);
        assert_eq!(game.user, PlayerId(7));
        assert_eq!(game.name, "ann");

        let dm = origin(user, "ann", ChannelId::new(55), None, GAME);
        assert_eq!(dm.chat, Chat::Private);

        let other = origin(user, "ann", ChannelId::new(56), guild, GAME);
        assert_eq!(other.chat, Chat::Other(ChatId(56)));
    }
}
