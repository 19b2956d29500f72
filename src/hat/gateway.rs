use std::{fmt, future::Future, time::Duration};

use super::{action::ButtonAction, roster::PlayerId};

/// Opaque identity of a chat on the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChatId(pub u64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where a message should be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The shared chat the game is played in.
    Game,
    /// A player's private chat with the bot.
    Player(PlayerId),
}

/// Handle to a delivered message, used to take its buttons away later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHandle {
    pub chat: ChatId,
    pub message: u64,
}

/// A labeled one-shot action attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: &'static str,
    pub action: ButtonAction,
}

impl Button {
    pub const fn new(label: &'static str, action: ButtonAction) -> Self {
        Self { label, action }
    }

    pub fn custom_id(&self) -> String {
        self.action.to_string()
    }
}

/// Everything the game needs from the chat platform.
pub trait Gateway: Send + Sync + 'static {
    type Error: fmt::Display + Send;

    fn send_message(
        &self,
        target: Target,
        text: String,
        buttons: Vec<Button>,
    ) -> impl Future<Output = Result<MessageHandle, Self::Error>> + Send;

    /// Removes the buttons from a message. Retracting twice is harmless.
    fn retract_actions(
        &self,
        handle: MessageHandle,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Runs `callback` once after `delay`, independently of the event stream.
    fn schedule_once<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static;
}
