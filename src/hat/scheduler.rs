use tracing::{debug, info, instrument, warn};

use super::{
    action::{ButtonAction, Verdict, WordAction},
    event::Origin,
    gateway::{Button, Gateway, Target},
    score,
    session::Session,
    turn::{Turn, TurnId},
    Envelope, Rejection,
};

impl<G: Gateway> Session<G> {
    /// Announces whose turn it is and hands them the START button.
    #[instrument(skip_all)]
    pub(super) async fn begin_turn(&mut self) {
        let Some(teams) = self.teams.as_ref() else {
            warn!("tried to begin a turn without teams");
            return;
        };

        let (side, player) = teams.current();
        let player = player.clone();
        let id = self.next_turn_id();

        let text = format!(
            "It is {}'s and {}'s turn now.",
            player.name,
            self.settings.team_name(side)
        );
        self.announce(text).await;

        self.words.shuffle_pending(&mut self.rng);
        debug!(turn = %id, player = player.name, pending = self.words.pending().len(), "turn announced");

        let target = Target::Player(player.id);
        self.turn = Some(Turn::new(id, side, player));

        let start = Button::new("START!", ButtonAction::Start(id));
        let prompt = self
            .send(target, "Press START when you are ready.", vec![start])
            .await;

        if let Some(turn) = self.turn.as_mut() {
            turn.set_prompt(prompt);
        }
    }

    #[instrument(skip_all, fields(turn = %id))]
    pub(super) async fn on_start_pressed(
        &mut self,
        origin: Origin,
        id: TurnId,
    ) -> Result<(), Rejection> {
        let Some(turn) = self.turn.as_mut().filter(|turn| turn.id == id) else {
            debug!("start pressed for a turn that is over");
            return Ok(());
        };

        if turn.player.id != origin.user {
            return Err(Rejection::NotYourTurn);
        }

        if turn.is_stopped() || !turn.start() {
            debug!("turn is already running");
            return Ok(());
        }

        let guard = turn.guard();
        let prompt = turn.take_prompt();
        let name = turn.player.name.clone();

        if let Some(prompt) = prompt {
            self.retract(prompt).await;
        }
        self.announce(format!("{name} started their turn.")).await;

        let mailbox = self.mailbox.clone();
        self.gateway
            .schedule_once(self.settings.turn_duration, move || {
                if guard.is_stopped() {
                    return;
                }

                if mailbox.send(Envelope::time_up(id)).is_err() {
                    warn!(turn = %id, "turn timer fired after the session stopped");
                }
            });

        info!(player = name, "turn started");
        self.present_next_word().await;

        Ok(())
    }

    /// Shows the next word from the hat, or ends the turn once it is empty.
    async fn present_next_word(&mut self) {
        let Some((id, player)) = self.turn.as_ref().map(|turn| (turn.id, turn.player.id)) else {
            return;
        };

        let Some((index, word)) = self.words.draw().map(|(index, word)| (index, word.to_owned()))
        else {
            self.end_turn(id, false).await;
            return;
        };

        let action = |verdict| {
            ButtonAction::Word(WordAction {
                turn: id,
                word: index,
                verdict,
            })
        };
        let buttons = vec![
            Button::new("✔️", action(Verdict::Correct)),
            Button::new("❌", action(Verdict::Discard)),
        ];

        let prompt = self.send(Target::Player(player), word, buttons).await;
        if let Some(turn) = self.turn.as_mut() {
            turn.show(index, prompt);
        }
    }

    #[instrument(skip_all, fields(turn = %action.turn, word = action.word))]
    pub(super) async fn on_word_action(
        &mut self,
        origin: Origin,
        action: WordAction,
    ) -> Result<(), Rejection> {
        let Some(turn) = self.turn.as_mut().filter(|turn| turn.id == action.turn) else {
            debug!("verdict for a turn that is over");
            return Ok(());
        };

        if turn.player.id != origin.user {
            return Err(Rejection::NotYourTurn);
        }

        if turn.is_stopped() || turn.shown() != Some(action.word) {
            debug!("verdict for a word that is no longer shown");
            return Ok(());
        }

        let prompt = turn.answer();
        match action.verdict {
            Verdict::Correct => {
                turn.guessed += 1;
                self.scores.add(turn.side);
            }
            Verdict::Discard => turn.discarded += 1,
        }

        if let Some(prompt) = prompt {
            self.retract(prompt).await;
        }
        self.present_next_word().await;

        Ok(())
    }

    /// Finalizes the turn `id`, if it is still the running one.
    ///
    /// Reached from the timer and from an empty hat; only the first of the two
    /// does anything.
    #[instrument(skip(self))]
    pub(super) async fn end_turn(&mut self, id: TurnId, timed_out: bool) {
        let mut turn = match self.turn.take() {
            Some(turn) if turn.id == id => turn,
            other => {
                self.turn = other;
                debug!("turn is already over");
                return;
            }
        };

        if !turn.guard().try_stop() {
            debug!("turn was already finalized");
            self.turn = Some(turn);
            return;
        }

        let player = Target::Player(turn.player.id);
        if timed_out {
            if let Some(prompt) = turn.take_prompt() {
                self.retract(prompt).await;
            }
            self.tell(player, "Your time is up.").await;
        } else {
            self.tell(player, "No words left.").await;
        }

        info!(
            player = turn.player.name,
            guessed = turn.guessed,
            discarded = turn.discarded,
            "turn finished"
        );
        self.announce(format!(
            "{} finished their turn.\n{} guessed, {} discarded.",
            turn.player.name,
            score::words(turn.guessed),
            score::words(turn.discarded)
        ))
        .await;

        if let Some(teams) = self.teams.as_mut() {
            teams.rotate();
        }

        if self.words.is_exhausted() {
            self.finish_round().await;
        } else {
            self.begin_turn().await;
        }
    }
}
