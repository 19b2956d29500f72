//! The Hat: a team word-guessing party game.
//!
//! Players join, secretly drop words into a shared hat, get split into two
//! teams and then, over three rounds, take timed turns explaining as many
//! words from the hat as they can.

mod action;
mod error;
mod event;
mod gateway;
mod roster;
mod scheduler;
mod score;
mod session;
mod settings;
mod state;
mod teams;
mod turn;
mod words;

#[cfg(test)]
pub mod testing;

pub use action::{ButtonAction, Verdict, WordAction};
pub use error::{Error, Rejection};
pub use event::{Chat, Event, Origin};
pub use gateway::{Button, ChatId, Gateway, MessageHandle, Target};
pub use roster::PlayerId;
pub use settings::Settings;

use session::Session;
use tokio::sync::{mpsc, oneshot};
use tracing::{error, instrument};
use turn::TurnId;

/// An event on its way to the session, with somewhere to put the outcome.
#[derive(Debug)]
pub struct Envelope {
    event: Event,
    reply: Option<oneshot::Sender<Result<(), Rejection>>>,
}

impl Envelope {
    fn time_up(turn: TurnId) -> Self {
        Self {
            event: Event::TimeUp(turn),
            reply: None,
        }
    }
}

/// Handle to the running game.
///
/// Cheap to clone; every clone talks to the same session task.
#[derive(Debug, Clone)]
pub struct Hat {
    mailbox: mpsc::UnboundedSender<Envelope>,
}

impl Hat {
    /// Starts the session task. Must be called from within a tokio runtime.
    pub fn spawn<G: Gateway>(gateway: G, settings: Settings) -> Self {
        let (mailbox, inbox) = mpsc::unbounded_channel();
        let session = Session::new(gateway, settings, mailbox.clone());

        tokio::spawn(session.run(inbox));

        Self { mailbox }
    }

    /// Hands `event` to the session and waits until it has been handled.
    #[instrument(skip_all)]
    pub async fn dispatch(&self, event: Event) -> Result<(), Error> {
        let (reply, outcome) = oneshot::channel();
        let envelope = Envelope {
            event,
            reply: Some(reply),
        };

        if self.mailbox.send(envelope).is_err() {
            error!("game session is gone");
        }

        Ok(outcome.await??)
    }
}
