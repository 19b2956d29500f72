use std::time::Duration;

use super::{roster::PlayerId, teams::Side};

pub const WORDS_PER_PLAYER: usize = 6;
pub const TURN_DURATION: Duration = Duration::from_secs(60);

/// Rules of the game that stay fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub words_per_player: usize,
    pub turn_duration: Duration,
    pub team_names: [String; 2],
    /// The only user allowed to reset the game.
    pub admin: Option<PlayerId>,
}

impl Settings {
    pub fn team_name(&self, side: Side) -> &str {
        &self.team_names[side.index()]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words_per_player: WORDS_PER_PLAYER,
            turn_duration: TURN_DURATION,
            team_names: ["Team Manhattan".to_owned(), "Team Brooklyn".to_owned()],
            admin: None,
        }
    }
}
