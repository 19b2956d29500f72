use std::fmt;

/// One of the three fixed phases of a game, each playing through the whole pool once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Round {
    Alias,
    Charades,
    OneWord,
}

impl Round {
    /// Rounds in the order they are played.
    pub const ALL: [Self; 3] = [Self::Alias, Self::Charades, Self::OneWord];

    pub const fn first() -> Self {
        Self::ALL[0]
    }

    pub fn next(self) -> Option<Self> {
        let position = Self::ALL.iter().position(|round| *round == self)?;
        Self::ALL.get(position + 1).copied()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Alias => "Alias",
            Self::Charades => "Charades",
            Self::OneWord => "Explain by a single word",
        }
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Idle,
    Preparing,
    Round(Round),
}

impl GameState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_preparing(self) -> bool {
        matches!(self, Self::Preparing)
    }

    pub const fn round(self) -> Option<Round> {
        match self {
            Self::Round(round) => Some(round),
            _ => None,
        }
    }
}
