use std::time::Duration;

use poise::serenity_prelude::{ActivityData, ChannelId, GuildId, UserId};
use serde::Deserialize;
use thisslime::TracingError;
use tracing::{debug, error, info, warn};

use crate::hat::{PlayerId, Settings};

const DEFAULT_PATH: &str = "./hatbot.toml";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub bot: BotConfig,
    pub game: GameConfig,
}

impl Config {
    /// Reads the file named by `HATBOT_TOML`, or `./hatbot.toml`.
    #[tracing::instrument(skip_all, name = "config")]
    pub fn load() -> Result<Self, Error> {
        let path = if let Ok(path) = std::env::var("HATBOT_TOML") {
            info!(path, "looking for config file with HATBOT_TOML...");
            path
        } else {
            warn!(path = DEFAULT_PATH, "HATBOT_TOML env unset, using default path");
            DEFAULT_PATH.to_owned()
        };

        Self::from_source(::config::File::new(&path, ::config::FileFormat::Toml))
    }

    fn from_source<S>(source: S) -> Result<Self, Error>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let config = ::config::Config::builder()
            .add_source(source)
            .build()
            .map_err(Error::Read)?
            .try_deserialize()
            .map_err(Error::Parse)?;

        info!("config loaded");
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error, TracingError)]
#[span(level = ERROR)]
pub enum Error {
    #[error("config file could not be loaded: {0}")]
    #[event(level = ERROR)]
    Read(::config::ConfigError),

    #[error("configuration could not be parsed: {0}")]
    #[event(level = ERROR)]
    Parse(::config::ConfigError),
}

#[derive(Deserialize, Debug, Clone)]
pub struct BotConfig {
    testing_server: Option<GuildId>,
    activity: Option<String>,
    prefix: String,
    status_channel: Option<ChannelId>,
}

impl BotConfig {
    pub fn testing_server(&self) -> Option<&GuildId> {
        if self.testing_server.is_none() {
            warn!("no testing server set in config, slash commands will only be registered globally");
        }

        self.testing_server.as_ref()
    }

    pub fn activity(&self) -> Option<ActivityData> {
        let Some(activity) = &self.activity else {
            warn!("no bot.activity provided in config, defaulting to none");
            return None;
        };

        if activity.is_empty() {
            warn!("bot.activity provided in config as empty string, defaulting to none");
            return None;
        }

        let parsed_activity = if let Some(name) = activity.strip_prefix("playing ") {
            ActivityData::playing(name)
        } else if let Some(name) = activity.strip_prefix("listening to ") {
            ActivityData::listening(name)
        } else if let Some(name) = activity.strip_prefix("watching ") {
            ActivityData::watching(name)
        } else if let Some(name) = activity.strip_prefix("competing in ") {
            ActivityData::competing(name)
        } else {
            error!("bot.activity in config could not be parsed - must start with `playing`, `listening to`, `watching` or `competing in`");
            warn!("disabling bot activity");
            return None;
        };

        debug!(
            "bot.activity parsed as {:?}: {}",
            parsed_activity.kind, parsed_activity.name
        );

        Some(parsed_activity)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub const fn status_channel(&self) -> Option<ChannelId> {
        self.status_channel
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct GameConfig {
    channel: ChannelId,
    admin: Option<UserId>,
    words_per_player: Option<usize>,
    turn_seconds: Option<u64>,
    teams: Option<TeamNames>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TeamNames {
    first: String,
    second: String,
}

impl GameConfig {
    pub const fn channel(&self) -> ChannelId {
        self.channel
    }

    pub const fn admin(&self) -> Option<UserId> {
        self.admin
    }

    pub fn settings(&self) -> Settings {
        let defaults = Settings::default();

        if self.admin.is_none() {
            warn!("no game.admin set in config, nobody will be able to reset the game");
        }

        let words_per_player = match self.words_per_player {
            Some(0) => {
                warn!("game.words_per_player must be at least 1, using the default");
                defaults.words_per_player
            }
            Some(words) => words,
            None => defaults.words_per_player,
        };

        Settings {
            words_per_player,
            turn_duration: self
                .turn_seconds
                .map_or(defaults.turn_duration, Duration::from_secs),
            team_names: self
                .teams
                .clone()
                .map_or(defaults.team_names, |teams| [teams.first, teams.second]),
            admin: self.admin.map(|admin| PlayerId(admin.get())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Config;
    use crate::hat::{PlayerId, Settings};
    use poise::serenity_prelude::{ActivityType, ChannelId};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn parse(toml: &str) -> Result<Config, super::Error> {
        Config::from_source(::config::File::from_str(toml, ::config::FileFormat::Toml))
    }

    #[test]
    #[traced_test]
    fn minimal_config_uses_game_defaults() {
        let config = parse(
            r#"
            [bot]
            prefix = "!"

            [game]
            channel = 1234
            "#,
        )
        .expect("valid config");

        assert_eq!(config.bot.prefix(), "!");
        assert_eq!(config.game.channel(), ChannelId::new(1234));
        assert!(config.bot.activity().is_none());
        assert_eq!(config.game.settings(), Settings::default());
        assert!(logs_contain("nobody will be able to reset the game"));
    }

    #[test]
    #[traced_test]
    fn game_section_overrides() {
        let config = parse(
            r#"
            [bot]
            prefix = "hat!"
            activity = "watching the hat"

            [game]
            channel = 1234
            admin = 42
            words_per_player = 4
            turn_seconds = 45

            [game.teams]
            first = "Reds"
            second = "Blues"
            "#,
        )
        .expect("valid config");

        let settings = config.game.settings();
        assert_eq!(settings.words_per_player, 4);
        assert_eq!(settings.turn_duration, Duration::from_secs(45));
        assert_eq!(settings.team_names, ["Reds".to_owned(), "Blues".to_owned()]);
        assert_eq!(settings.admin, Some(PlayerId(42)));

        let activity = config.bot.activity().expect("activity parsed");
        assert_eq!(activity.kind, ActivityType::Watching);
        assert_eq!(activity.name, "the hat");
    }

    #[test]
    #[traced_test]
    fn missing_game_channel_is_an_error() {
        let result = parse(
            r#"
            [bot]
            prefix = "!"
            "#,
        );

        assert!(matches!(result, Err(super::Error::Parse(_))));
    }

    #[test]
    #[traced_test]
    fn zero_words_falls_back() {
        let config = parse(
            r#"
            [bot]
            prefix = "!"

            [game]
            channel = 1
            words_per_player = 0
            "#,
        )
        .expect("valid config");

        assert_eq!(config.game.settings().words_per_player, 6);
        assert!(logs_contain("must be at least 1"));
    }
}
