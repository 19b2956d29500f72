use rand::{seq::SliceRandom, Rng};

/// Every word submitted for the current game.
///
/// Words before the cursor have already been shown this round, words at or
/// after it are still waiting in the hat.
#[derive(Debug, Clone, Default)]
pub struct WordPool {
    words: Vec<String>,
    cursor: usize,
}

impl WordPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.cursor = 0;
    }

    pub fn push(&mut self, word: impl Into<String>) {
        self.words.push(word.into());
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[cfg(test)]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pending(&self) -> &[String] {
        &self.words[self.cursor..]
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.words.len()
    }

    /// Start of a round: everything goes back into the hat.
    pub fn shuffle_all(&mut self, rng: &mut impl Rng) {
        self.words.shuffle(rng);
        self.cursor = 0;
    }

    /// Start of a turn: only the words still in the hat are mixed.
    pub fn shuffle_pending(&mut self, rng: &mut impl Rng) {
        self.words[self.cursor..].shuffle(rng);
    }

    /// Takes the next pending word out of the hat, returning it with its index.
    pub fn draw(&mut self) -> Option<(usize, &str)> {
        let index = self.cursor;
        let word = self.words.get(index)?;
        self.cursor += 1;
        Some((index, word.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::WordPool;
    use pretty_assertions::assert_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn pool(words: &[&str]) -> WordPool {
        let mut pool = WordPool::new();
        for word in words {
            pool.push(*word);
        }
        pool
    }

    #[test]
    fn draw_advances_cursor_until_exhausted() {
        let mut pool = pool(&["a", "b"]);

        assert_eq!(pool.draw(), Some((0, "a")));
        assert_eq!(pool.draw(), Some((1, "b")));
        assert!(pool.is_exhausted());
        assert_eq!(pool.draw(), None);
        assert_eq!(pool.cursor(), 2);
    }

    #[test]
    fn shuffle_pending_keeps_consumed_prefix() {
        let mut rng = StdRng::seed_from_u64(7);
        let words: Vec<String> = (0..20).map(|i| format!("word{i}")).collect();
        let mut pool = WordPool::new();
        for word in &words {
            pool.push(word.clone());
        }

        for _ in 0..5 {
            pool.draw();
        }
        pool.shuffle_pending(&mut rng);

        assert_eq!(pool.cursor(), 5);
        assert_eq!(&pool.words[..5], &words[..5]);

        let mut tail = pool.pending().to_vec();
        tail.sort();
        let mut expected = words[5..].to_vec();
        expected.sort();
        assert_eq!(tail, expected);
    }

    #[test]
    fn shuffle_all_resets_cursor() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut pool = pool(&["a", "b", "c"]);
        pool.draw();
        pool.draw();

        pool.shuffle_all(&mut rng);

        assert_eq!(pool.cursor(), 0);
        assert_eq!(pool.pending().len(), 3);
    }

    #[test]
    fn clear_empties_pool() {
        let mut pool = pool(&["a"]);
        pool.draw();
        pool.clear();

        assert!(pool.is_empty());
        assert_eq!(pool.cursor(), 0);
    }
}
