use thisslime::TracingError;
use tokio::sync::oneshot;

/// A request the game refused in its current state.
///
/// The message is shown to whoever sent the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("The game can be started in the game channel. To join a game that has already started, use the join command.")]
    StartOutsideGameChat,

    #[error("The game has already started.")]
    AlreadyStarted,

    #[error("You were late, wait till the next game.")]
    LateToJoin,

    #[error("You are already in the game.")]
    AlreadyJoined,

    #[error("You cannot add words now.")]
    CannotAddWords,

    #[error("Please, add words in a private chat.")]
    NotPrivate,

    #[error("Please, join the game first.")]
    NotJoined,

    #[error("Enough!")]
    Enough,

    #[error("Please, send a word with some text in it.")]
    EmptyWord,

    #[error("This has to be done in the game channel.")]
    OutsideGameChat,

    #[error("No game is running. Start one with the start command.")]
    NotRunning,

    #[error("Not everyone is ready yet.")]
    PlayersNotReady,

    #[error("The current round is not over yet.")]
    RoundNotOver,

    #[error("At least two players are needed to make teams.")]
    NotEnoughPlayers,

    #[error("Only the game admin can do that.")]
    NotAdmin,

    #[error("It is not your turn.")]
    NotYourTurn,
}

#[derive(Debug, thiserror::Error, TracingError)]
#[span(level = WARN)]
pub enum Error {
    #[error("{0}")]
    #[event(level = DEBUG)]
    Rejected(#[from] Rejection),

    #[error("the game session has stopped: {0}")]
    #[event(level = ERROR)]
    Closed(#[from] oneshot::error::RecvError),
}

impl Error {
    #[cfg(test)]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected(rejection) => Some(*rejection),
            Self::Closed(..) => None,
        }
    }
}
