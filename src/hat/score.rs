use super::teams::Side;

/// Words guessed by each team over the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score([u32; 2]);

impl Score {
    #[cfg(test)]
    pub const fn new(first: u32, second: u32) -> Self {
        Self([first, second])
    }

    pub fn add(&mut self, side: Side) {
        self.0[side.index()] += 1;
    }

    pub const fn get(&self, side: Side) -> u32 {
        self.0[side.index()]
    }

    /// `Team A 3: 5 Team B`
    pub fn line(&self, names: &[String; 2]) -> String {
        format!(
            "{} {}: {} {}",
            names[0],
            self.get(Side::First),
            self.get(Side::Second),
            names[1]
        )
    }
}

pub(super) fn words(count: u32) -> String {
    if count == 1 {
        "1 word".to_owned()
    } else {
        format!("{count} words")
    }
}
