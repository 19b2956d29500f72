use std::{
    fmt,
    num::ParseIntError,
    str::FromStr,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use super::{gateway::MessageHandle, roster::Player, teams::Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TurnId(pub u64);

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TurnId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Once-only latch deciding who gets to finish a turn.
///
/// Shared between the turn and its timer; whichever side flips it first
/// performs the finalization, everyone after that backs off.
#[derive(Debug, Default)]
pub struct StopGuard {
    stopped: AtomicBool,
}

impl StopGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once, for the first caller.
    pub fn try_stop(&self) -> bool {
        self.stopped
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }
}

/// One player's timed stint of explaining words.
#[derive(Debug)]
pub struct Turn {
    pub id: TurnId,
    pub side: Side,
    pub player: Player,
    pub guessed: u32,
    pub discarded: u32,
    guard: Arc<StopGuard>,
    started: bool,
    shown: Option<usize>,
    last_prompt: Option<MessageHandle>,
}

impl Turn {
    pub fn new(id: TurnId, side: Side, player: Player) -> Self {
        Self {
            id,
            side,
            player,
            guessed: 0,
            discarded: 0,
            guard: Arc::new(StopGuard::new()),
            started: false,
            shown: None,
            last_prompt: None,
        }
    }

    pub fn guard(&self) -> Arc<StopGuard> {
        Arc::clone(&self.guard)
    }

    pub fn is_stopped(&self) -> bool {
        self.guard.is_stopped()
    }

    #[cfg(test)]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Marks the clock as running. False if it already was.
    pub fn start(&mut self) -> bool {
        !std::mem::replace(&mut self.started, true)
    }

    /// Index of the word currently on the player's screen.
    pub const fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn show(&mut self, word: usize, prompt: Option<MessageHandle>) {
        self.shown = Some(word);
        self.last_prompt = prompt;
    }

    pub fn set_prompt(&mut self, prompt: Option<MessageHandle>) {
        self.last_prompt = prompt;
    }

    /// Clears the shown word, returning the prompt whose buttons should go.
    pub fn answer(&mut self) -> Option<MessageHandle> {
        self.shown = None;
        self.last_prompt.take()
    }

    pub fn take_prompt(&mut self) -> Option<MessageHandle> {
        self.last_prompt.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::{StopGuard, Turn, TurnId};
    use crate::hat::{
        roster::{Player, PlayerId},
        teams::Side,
    };
    use pretty_assertions::assert_eq;

    #[test]
    fn guard_stops_once() {
        let guard = StopGuard::new();
        assert!(!guard.is_stopped());
        assert!(guard.try_stop());
        assert!(!guard.try_stop());
        assert!(guard.is_stopped());
    }

    #[test]
    fn guard_has_one_winner_across_threads() {
        for _ in 0..50 {
            let guard = Arc::new(StopGuard::new());
            let winners = Arc::new(AtomicUsize::new(0));

            let handles: Vec<_> = (0..8)
                .map(|_| {
                    let guard = Arc::clone(&guard);
                    let winners = Arc::clone(&winners);
                    std::thread::spawn(move || {
                        if guard.try_stop() {
                            winners.fetch_add(1, Ordering::SeqCst);
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().expect("thread should not panic");
            }

            assert_eq!(winners.load(Ordering::SeqCst), 1);
        }
    }

    #[test]
    fn start_is_one_shot() {
        let mut turn = Turn::new(TurnId(1), Side::First, Player::new(PlayerId(1), "alice"));
        assert!(turn.start());
        assert!(!turn.start());
        assert!(turn.is_started());
    }

    #[test]
    fn turn_ids_parse() {
        assert_eq!("17".parse::<TurnId>(), Ok(TurnId(17)));
        assert!("seventeen".parse::<TurnId>().is_err());
    }
}
