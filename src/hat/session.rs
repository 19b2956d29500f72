use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{
    event::{Chat, Event, Origin},
    gateway::{Button, Gateway, MessageHandle, Target},
    roster::{Roster, Submission},
    score::Score,
    settings::Settings,
    state::{GameState, Round},
    teams::{Side, Teams},
    turn::{Turn, TurnId},
    words::WordPool,
    Envelope, Rejection,
};

pub type Mailbox = mpsc::UnboundedSender<Envelope>;

/// The one game played through the bot.
///
/// Owned by a single task; every event, including the turn timer, reaches it
/// through its mailbox and is handled to completion before the next one.
pub struct Session<G> {
    pub(super) gateway: G,
    pub(super) settings: Settings,
    pub(super) mailbox: Mailbox,
    pub(super) rng: StdRng,

    pub(super) state: GameState,
    pub(super) ready: bool,
    pub(super) roster: Roster,
    pub(super) words: WordPool,
    pub(super) teams: Option<Teams>,
    pub(super) turn: Option<Turn>,
    pub(super) scores: Score,

    turns: u64,
}

impl<G: Gateway> Session<G> {
    pub fn new(gateway: G, settings: Settings, mailbox: Mailbox) -> Self {
        Self::with_rng(gateway, settings, mailbox, StdRng::from_entropy())
    }

    pub fn with_rng(gateway: G, settings: Settings, mailbox: Mailbox, rng: StdRng) -> Self {
        Self {
            gateway,
            settings,
            mailbox,
            rng,
            state: GameState::Idle,
            ready: false,
            roster: Roster::new(),
            words: WordPool::new(),
            teams: None,
            turn: None,
            scores: Score::default(),
            turns: 0,
        }
    }

    pub(super) async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Envelope>) {
        info!("game session is running");

        while let Some(Envelope { event, reply }) = inbox.recv().await {
            let result = self.handle(event).await;

            match reply {
                Some(reply) => {
                    if reply.send(result).is_err() {
                        debug!("requester stopped waiting for the outcome");
                    }
                }
                None => {
                    if let Err(rejection) = result {
                        debug!(%rejection, "internal event was refused");
                    }
                }
            }
        }

        warn!("game session mailbox closed");
    }

    #[instrument(skip_all, fields(user = ?event.origin().map(|origin| origin.user)))]
    pub async fn handle(&mut self, event: Event) -> Result<(), Rejection> {
        debug!(?event, state = ?self.state, "handling event");

        match event {
            Event::Start(origin) => self.start(origin).await,
            Event::Join(origin) => self.join(origin).await,
            Event::SubmitWord(origin, text) => self.submit_word(origin, &text).await,
            Event::Advance(origin) => self.advance(origin).await,
            Event::Reset(origin) => self.reset(origin).await,
            Event::StartPressed(origin, turn) => self.on_start_pressed(origin, turn).await,
            Event::WordAction(origin, action) => self.on_word_action(origin, action).await,
            Event::TimeUp(turn) => {
                self.end_turn(turn, true).await;
                Ok(())
            }
        }
    }

    async fn start(&mut self, origin: Origin) -> Result<(), Rejection> {
        if origin.chat != Chat::Game {
            return Err(Rejection::StartOutsideGameChat);
        }

        if !self.state.is_idle() {
            return Err(Rejection::AlreadyStarted);
        }

        self.clear();
        self.state = GameState::Preparing;
        info!(by = origin.name, "game is starting");

        self.announce("GAME IS STARTING! Players, please, join the game!")
            .await;

        Ok(())
    }

    async fn join(&mut self, origin: Origin) -> Result<(), Rejection> {
        if !self.state.is_preparing() {
            return Err(Rejection::LateToJoin);
        }

        self.roster.join(origin.user, origin.name.clone())?;
        self.ready = false;
        info!(player = origin.name, players = self.roster.len(), "player joined");

        self.announce(format!("{} joined the game. Welcome!", origin.name))
            .await;
        self.tell(
            Target::Player(origin.user),
            format!(
                "Enter {} characters (real, fictional, historical, etc.), one per message.",
                self.settings.words_per_player
            ),
        )
        .await;

        Ok(())
    }

    async fn submit_word(&mut self, origin: Origin, text: &str) -> Result<(), Rejection> {
        if !self.state.is_preparing() {
            return Err(Rejection::CannotAddWords);
        }

        if origin.chat != Chat::Private {
            return Err(Rejection::NotPrivate);
        }

        let word = text.trim();
        if word.is_empty() {
            return Err(Rejection::EmptyWord);
        }

        let submission = self
            .roster
            .submit(origin.user, self.settings.words_per_player)?;
        self.words.push(word);

        match submission {
            Submission::Added { remaining } => {
                debug!(player = origin.name, remaining, "word added");
            }
            Submission::Ready => {
                info!(player = origin.name, "player is ready");
                self.tell(Target::Player(origin.user), "Got it!").await;
                self.announce(format!("{} is ready", origin.name)).await;

                if self.roster.all_ready() {
                    self.ready = true;
                    let text = format!(
                        "Everyone is ready. Welcome {}. Number of players: {}",
                        self.roster.names().join(", "),
                        self.roster.len()
                    );
                    self.announce(text).await;
                }
            }
        }

        Ok(())
    }

    async fn advance(&mut self, origin: Origin) -> Result<(), Rejection> {
        if origin.chat != Chat::Game {
            return Err(Rejection::OutsideGameChat);
        }

        match self.state {
            GameState::Idle => Err(Rejection::NotRunning),
            GameState::Preparing => {
                if !self.ready {
                    return Err(Rejection::PlayersNotReady);
                }

                let teams = Teams::form(self.roster.players(), &mut self.rng)?;
                let text = Side::BOTH
                    .iter()
                    .map(|side| {
                        let names: Vec<&str> = teams
                            .members(*side)
                            .iter()
                            .map(|player| player.name.as_str())
                            .collect();
                        format!(
                            "Welcome {}: {}.",
                            self.settings.team_name(*side),
                            names.join(", ")
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");

                self.teams = Some(teams);
                self.announce(text).await;
                self.begin_round(Round::first()).await;

                Ok(())
            }
            GameState::Round(round) => {
                if !self.ready {
                    return Err(Rejection::RoundNotOver);
                }

                let next = round.next().ok_or(Rejection::NotRunning)?;
                self.announce(self.scores.line(&self.settings.team_names))
                    .await;
                self.begin_round(next).await;

                Ok(())
            }
        }
    }

    async fn reset(&mut self, origin: Origin) -> Result<(), Rejection> {
        if self.settings.admin != Some(origin.user) {
            return Err(Rejection::NotAdmin);
        }

        self.clear();
        self.state = GameState::Idle;
        warn!(by = origin.name, "game was reset");

        self.announce("The game has been reset.").await;

        Ok(())
    }

    /// Forgets everything about the current game, silencing any running turn.
    fn clear(&mut self) {
        if let Some(turn) = self.turn.take() {
            turn.guard().try_stop();
        }

        self.ready = false;
        self.roster.clear();
        self.words.clear();
        self.teams = None;
        self.scores = Score::default();
    }

    #[instrument(skip(self))]
    async fn begin_round(&mut self, round: Round) {
        self.state = GameState::Round(round);
        self.ready = false;
        info!(words = self.words.len(), "round is starting");

        self.announce(format!("Starting round \"{round}\".")).await;
        self.words.shuffle_all(&mut self.rng);
        self.begin_turn().await;
    }

    /// Called once the hat is empty.
    pub(super) async fn finish_round(&mut self) {
        self.ready = true;
        self.announce("Round ended").await;

        if self.state.round().is_some_and(Round::is_last) {
            let score = self.scores.line(&self.settings.team_names);
            info!(score, "game over");

            self.announce(format!("GAME OVER!\n{score}")).await;
            self.state = GameState::Idle;
        }
    }

    pub(super) fn next_turn_id(&mut self) -> TurnId {
        self.turns += 1;
        TurnId(self.turns)
    }

    /// Delivers a message, logging and swallowing transport failures.
    pub(super) async fn send(
        &self,
        target: Target,
        text: impl Into<String>,
        buttons: Vec<Button>,
    ) -> Option<MessageHandle> {
        match self
            .gateway
            .send_message(target, text.into(), buttons)
            .await
        {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(%err, ?target, "failed to deliver message");
                None
            }
        }
    }

    pub(super) async fn tell(&self, target: Target, text: impl Into<String>) {
        self.send(target, text, Vec::new()).await;
    }

    pub(super) async fn announce(&self, text: impl Into<String>) {
        self.tell(Target::Game, text).await;
    }

    pub(super) async fn retract(&self, handle: MessageHandle) {
        if let Err(err) = self.gateway.retract_actions(handle).await {
            warn!(%err, ?handle, "failed to retract buttons");
        }
    }
}
