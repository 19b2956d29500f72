use std::{
    future::{self, Future},
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::mpsc;

use super::{
    action::{Verdict, WordAction},
    event::{Chat, Event, Origin},
    gateway::{Button, ChatId, Gateway, MessageHandle, Target},
    roster::{Player, PlayerId, Roster},
    score::Score,
    session::Session,
    settings::Settings,
    state::GameState,
    teams::Teams,
    turn::Turn,
    words::WordPool,
    Envelope, Rejection,
};

pub const ADMIN: PlayerId = PlayerId(999);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sent {
    pub target: Target,
    pub text: String,
    pub buttons: Vec<Button>,
    pub handle: MessageHandle,
}

type Timer = Box<dyn FnOnce() + Send>;

#[derive(Default)]
struct Log {
    sent: Vec<Sent>,
    retracted: Vec<MessageHandle>,
    timers: Vec<(Duration, Timer)>,
    offline: bool,
    next_message: u64,
}

#[derive(Debug, thiserror::Error)]
#[error("chat platform is unreachable")]
pub struct Offline;

/// Gateway that writes everything down instead of talking to a chat platform.
///
/// Timers never fire on their own; see [`Harness::fire_timers`].
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Log>>);

impl Recorder {
    fn log(&self) -> MutexGuard<'_, Log> {
        self.0.lock().expect("recorder lock poisoned")
    }

    pub fn set_offline(&self, offline: bool) {
        self.log().offline = offline;
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.log().sent.clone()
    }

    pub fn texts_to(&self, target: Target) -> Vec<String> {
        self.log()
            .sent
            .iter()
            .filter(|sent| sent.target == target)
            .map(|sent| sent.text.clone())
            .collect()
    }

    pub fn retracted(&self) -> Vec<MessageHandle> {
        self.log().retracted.clone()
    }

    pub fn pending_timers(&self) -> usize {
        self.log().timers.len()
    }

    pub fn timer_delays(&self) -> Vec<Duration> {
        self.log().timers.iter().map(|(delay, _)| *delay).collect()
    }

    fn take_timers(&self) -> Vec<Timer> {
        self.log()
            .timers
            .drain(..)
            .map(|(_, timer)| timer)
            .collect()
    }

    fn record(
        &self,
        target: Target,
        text: String,
        buttons: Vec<Button>,
    ) -> Result<MessageHandle, Offline> {
        let mut log = self.log();
        if log.offline {
            return Err(Offline);
        }

        log.next_message += 1;
        let chat = match target {
            Target::Game => ChatId(0),
            Target::Player(player) => ChatId(player.0),
        };
        let handle = MessageHandle {
            chat,
            message: log.next_message,
        };

        log.sent.push(Sent {
            target,
            text,
            buttons,
            handle,
        });

        Ok(handle)
    }
}

impl Gateway for Recorder {
    type Error = Offline;

    fn send_message(
        &self,
        target: Target,
        text: String,
        buttons: Vec<Button>,
    ) -> impl Future<Output = Result<MessageHandle, Offline>> + Send {
        future::ready(self.record(target, text, buttons))
    }

    fn retract_actions(&self, handle: MessageHandle) -> impl Future<Output = Result<(), Offline>> + Send {
        let mut log = self.log();
        let result = if log.offline {
            Err(Offline)
        } else {
            log.retracted.push(handle);
            Ok(())
        };

        future::ready(result)
    }

    fn schedule_once<F>(&self, delay: Duration, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.log().timers.push((delay, Box::new(callback)));
    }
}

impl<G> Session<G> {
    pub const fn state(&self) -> GameState {
        self.state
    }

    pub const fn is_ready(&self) -> bool {
        self.ready
    }

    pub const fn scores(&self) -> Score {
        self.scores
    }

    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    pub const fn words(&self) -> &WordPool {
        &self.words
    }

    pub const fn teams(&self) -> Option<&Teams> {
        self.teams.as_ref()
    }

    pub const fn turn(&self) -> Option<&Turn> {
        self.turn.as_ref()
    }
}

/// A session driven directly, one event at a time, with a seeded rng.
pub struct Harness {
    pub session: Session<Recorder>,
    pub gateway: Recorder,
    inbox: mpsc::UnboundedReceiver<Envelope>,
}

impl Harness {
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let (mailbox, inbox) = mpsc::unbounded_channel();
        let gateway = Recorder::default();
        let settings = Settings {
            admin: Some(ADMIN),
            ..settings
        };
        let session = Session::with_rng(
            gateway.clone(),
            settings,
            mailbox,
            StdRng::seed_from_u64(seed),
        );

        Self {
            session,
            gateway,
            inbox,
        }
    }

    fn origin(user: PlayerId, chat: Chat) -> Origin {
        Origin::new(user, format!("player{}", user.0), chat)
    }

    pub fn game(&self, user: PlayerId) -> Origin {
        Self::origin(user, Chat::Game)
    }

    pub fn private(&self, user: PlayerId) -> Origin {
        Self::origin(user, Chat::Private)
    }

    pub async fn send(&mut self, event: Event) -> Result<(), Rejection> {
        let result = self.session.handle(event).await;
        self.drain().await;
        result
    }

    /// Handles whatever the session posted to itself.
    async fn drain(&mut self) {
        while let Ok(envelope) = self.inbox.try_recv() {
            let _ = self.session.handle(envelope.event).await;
        }
    }

    /// Runs every scheduled timer as if its delay had passed.
    pub async fn fire_timers(&mut self) {
        for timer in self.gateway.take_timers() {
            timer();
        }

        self.drain().await;
    }

    /// Starts a game in which players `1..=count` join and fill the hat.
    pub async fn prepare(&mut self, count: u64) {
        self.send(Event::Start(self.game(PlayerId(1))))
            .await
            .expect("game starts");

        for id in 1..=count {
            let player = PlayerId(id);
            self.send(Event::Join(self.game(player)))
                .await
                .expect("player joins");
            self.fill_words(player).await;
        }
    }

    pub async fn fill_words(&mut self, player: PlayerId) {
        let submitted = self
            .session
            .roster()
            .get(player)
            .map_or(0, Player::submitted);

        for n in submitted..self.session.settings.words_per_player {
            let word = format!("word {n} of {player}");
            self.send(Event::SubmitWord(self.private(player), word))
                .await
                .expect("word accepted");
        }
    }

    pub async fn press_start(&mut self) {
        let turn = self.session.turn().expect("turn in progress");
        let (id, player) = (turn.id, turn.player.id);

        self.send(Event::StartPressed(self.private(player), id))
            .await
            .expect("start accepted");
    }

    pub async fn answer(&mut self, verdict: Verdict) {
        let turn = self.session.turn().expect("turn in progress");
        let action = WordAction {
            turn: turn.id,
            word: turn.shown().expect("word on screen"),
            verdict,
        };
        let player = turn.player.id;

        self.send(Event::WordAction(self.private(player), action))
            .await
            .expect("verdict accepted");
    }

    /// Plays the current round to its end, guessing every word.
    pub async fn play_round(&mut self) {
        while !self.session.is_ready() {
            let started = self
                .session
                .turn()
                .expect("turn in progress")
                .is_started();

            if started {
                self.answer(Verdict::Correct).await;
            } else {
                self.press_start().await;
            }
        }
    }
}
