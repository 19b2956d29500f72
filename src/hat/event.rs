use super::{
    action::{ButtonAction, WordAction},
    gateway::ChatId,
    roster::PlayerId,
    turn::TurnId,
};

/// Kind of chat an event came from, as seen by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chat {
    Game,
    Private,
    Other(ChatId),
}

/// Who sent an event, and from where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub user: PlayerId,
    pub name: String,
    pub chat: Chat,
}

impl Origin {
    pub fn new(user: PlayerId, name: impl Into<String>, chat: Chat) -> Self {
        Self {
            user,
            name: name.into(),
            chat,
        }
    }
}

/// Everything the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(Origin),
    Join(Origin),
    SubmitWord(Origin, String),
    Advance(Origin),
    Reset(Origin),
    StartPressed(Origin, TurnId),
    WordAction(Origin, WordAction),
    /// The turn's clock ran out.
    TimeUp(TurnId),
}

impl Event {
    pub fn from_button(origin: Origin, action: ButtonAction) -> Self {
        match action {
            ButtonAction::Start(turn) => Self::StartPressed(origin, turn),
            ButtonAction::Word(action) => Self::WordAction(origin, action),
        }
    }

    pub const fn origin(&self) -> Option<&Origin> {
        match self {
            Self::Start(origin)
            | Self::Join(origin)
            | Self::SubmitWord(origin, _)
            | Self::Advance(origin)
            | Self::Reset(origin)
            | Self::StartPressed(origin, _)
            | Self::WordAction(origin, _) => Some(origin),
            Self::TimeUp(..) => None,
        }
    }
}
