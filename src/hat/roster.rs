use std::fmt;

use super::Rejection;

/// Opaque platform identity of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerStatus {
    #[default]
    Adding,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    submitted: usize,
    status: PlayerStatus,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            submitted: 0,
            status: PlayerStatus::Adding,
        }
    }

    #[cfg(test)]
    pub const fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn is_ready(&self) -> bool {
        self.status == PlayerStatus::Ready
    }
}

/// Outcome of a word submission that was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Added { remaining: usize },
    Ready,
}

/// Players of the game being prepared, in join order.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.players.clear();
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, id: PlayerId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    fn get_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|player| player.id == id)
    }

    pub fn join(&mut self, id: PlayerId, name: impl Into<String>) -> Result<(), Rejection> {
        if self.contains(id) {
            return Err(Rejection::AlreadyJoined);
        }

        self.players.push(Player::new(id, name));
        Ok(())
    }

    /// Counts one submitted word against `quota`.
    pub fn submit(&mut self, id: PlayerId, quota: usize) -> Result<Submission, Rejection> {
        let player = self.get_mut(id).ok_or(Rejection::NotJoined)?;

        if player.is_ready() {
            return Err(Rejection::Enough);
        }

        player.submitted += 1;

        if player.submitted >= quota {
            player.status = PlayerStatus::Ready;
            Ok(Submission::Ready)
        } else {
            Ok(Submission::Added {
                remaining: quota - player.submitted,
            })
        }
    }

    /// True iff there is at least one player and every player is ready.
    pub fn all_ready(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(Player::is_ready)
    }

    pub fn names(&self) -> Vec<&str> {
        self.players.iter().map(|player| player.name.as_str()).collect()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerId, Rejection, Roster, Submission};
    use pretty_assertions::assert_eq;

    const ALICE: PlayerId = PlayerId(1);
    const BOB: PlayerId = PlayerId(2);

    #[test]
    fn duplicate_join_is_rejected() {
        let mut roster = Roster::new();
        roster.join(ALICE, "alice").expect("first join");

        assert_eq!(roster.join(ALICE, "alice"), Err(Rejection::AlreadyJoined));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn player_becomes_ready_at_quota() {
        let mut roster = Roster::new();
        roster.join(ALICE, "alice").expect("first join");

        for remaining in (1..6).rev() {
            assert_eq!(roster.submit(ALICE, 6), Ok(Submission::Added { remaining }));
        }
        assert_eq!(roster.submit(ALICE, 6), Ok(Submission::Ready));
        assert_eq!(roster.submit(ALICE, 6), Err(Rejection::Enough));

        let alice = roster.get(ALICE).expect("joined");
        assert_eq!(alice.submitted(), 6);
        assert!(alice.is_ready());
    }

    #[test]
    fn readiness_requires_everyone() {
        let mut roster = Roster::new();
        assert!(!roster.all_ready());

        roster.join(ALICE, "alice").expect("join");
        roster.join(BOB, "bob").expect("join");
        roster.submit(ALICE, 1).expect("submit");
        assert!(!roster.all_ready());

        roster.submit(BOB, 1).expect("submit");
        assert!(roster.all_ready());
    }

    #[test]
    fn unknown_player_cannot_submit() {
        let mut roster = Roster::new();
        assert_eq!(roster.submit(BOB, 6), Err(Rejection::NotJoined));
    }
}
