use std::{fmt, str::FromStr};

use super::turn::TurnId;

const PREFIX: &str = "hat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Discard,
}

impl Verdict {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Discard => "discard",
        }
    }
}

/// A verdict on one specific word shown during one specific turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordAction {
    pub turn: TurnId,
    pub word: usize,
    pub verdict: Verdict,
}

/// What a game button does, encoded into its custom id as
/// `hat:start:<turn>` or `hat:<verdict>:<turn>:<word>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Start(TurnId),
    Word(WordAction),
}

impl fmt::Display for ButtonAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(turn) => write!(f, "{PREFIX}:start:{turn}"),
            Self::Word(action) => write!(
                f,
                "{PREFIX}:{verdict}:{turn}:{word}",
                verdict = action.verdict.as_str(),
                turn = action.turn,
                word = action.word
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("'{0}' is not a game button")]
    Foreign(String),

    #[error("malformed game button '{0}'")]
    Malformed(String),
}

impl ButtonAction {
    /// Whether a custom id belongs to this game at all.
    pub fn is_ours(custom_id: &str) -> bool {
        custom_id
            .split_once(':')
            .is_some_and(|(prefix, _)| prefix == PREFIX)
    }
}

impl FromStr for ButtonAction {
    type Err = ParseActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_ours(s) {
            return Err(ParseActionError::Foreign(s.to_owned()));
        }

        let malformed = || ParseActionError::Malformed(s.to_owned());
        let parts: Vec<&str> = s.split(':').skip(1).collect();

        match parts.as_slice() {
            ["start", turn] => Ok(Self::Start(turn.parse().map_err(|_| malformed())?)),
            [verdict, turn, word] => {
                let verdict = match *verdict {
                    "correct" => Verdict::Correct,
                    "discard" => Verdict::Discard,
                    _ => return Err(malformed()),
                };

                Ok(Self::Word(WordAction {
                    turn: turn.parse().map_err(|_| malformed())?,
                    word: word.parse().map_err(|_| malformed())?,
                    verdict,
                }))
            }
            _ => Err(malformed()),
        }
    }
}
