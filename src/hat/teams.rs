use std::ops::Not;

use rand::{seq::SliceRandom, Rng};

use super::{roster::Player, Rejection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    #[default]
    First,
    Second,
}

impl Side {
    pub const BOTH: [Self; 2] = [Self::First, Self::Second];

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

impl Not for Side {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// The two teams of a game and whose turn comes next in each.
#[derive(Debug, Clone)]
pub struct Teams {
    members: [Vec<Player>; 2],
    pointers: [usize; 2],
    active: Side,
}

impl Teams {
    /// Randomly splits `players`, giving the first team the extra player when
    /// the count is odd.
    pub fn form(players: &[Player], rng: &mut impl Rng) -> Result<Self, Rejection> {
        if players.len() < 2 {
            return Err(Rejection::NotEnoughPlayers);
        }

        let mut shuffled = players.to_vec();
        shuffled.shuffle(rng);
        let second = shuffled.split_off(shuffled.len().div_ceil(2));

        Ok(Self {
            members: [shuffled, second],
            pointers: [0, 0],
            active: Side::First,
        })
    }

    pub fn members(&self, side: Side) -> &[Player] {
        &self.members[side.index()]
    }

    /// The player whose turn is next, with their side.
    pub fn current(&self) -> (Side, &Player) {
        let side = self.active;
        (side, &self.members[side.index()][self.pointers[side.index()]])
    }

    /// Moves the finishing team on to its next player and hands the turn to
    /// the other team.
    ///
    /// The incoming team's pointer is left alone, so the second team opens
    /// with its first player.
    pub fn rotate(&mut self) {
        let finished = self.active.index();
        let len = self.members[finished].len();
        self.pointers[finished] = (self.pointers[finished] + 1) % len;
        self.active = !self.active;
    }
}
