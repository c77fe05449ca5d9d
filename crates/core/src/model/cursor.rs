use crate::model::WordBank;

/// Outcome of advancing the cursor by one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorStep {
    /// Moved to the next word, possibly rolling over into a new round.
    Advanced,
    /// Stepped past the last word of the last round.
    Finished,
}

/// Mutable pointer into (round, word) identifying the active quiz item.
///
/// Invariant: while not finished, `round_index` addresses an existing round
/// and `word_index` an existing entry within it. Once finished the indices
/// are no longer meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCursor {
    round_index: usize,
    word_index: usize,
    finished: bool,
}

impl SessionCursor {
    /// Cursor positioned at the first word of the first round.
    #[must_use]
    pub fn start() -> Self {
        Self {
            round_index: 0,
            word_index: 0,
            finished: false,
        }
    }

    #[must_use]
    pub fn round_index(&self) -> usize {
        self.round_index
    }

    #[must_use]
    pub fn word_index(&self) -> usize {
        self.word_index
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mark the cursor finished, regardless of position.
    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Advance one word within the bank, rolling over round boundaries.
    ///
    /// Finishes the cursor when stepping past the last word, or when the
    /// bank is empty. Advancing an already-finished cursor stays finished.
    pub fn advance(&mut self, bank: &WordBank) -> CursorStep {
        if self.finished {
            return CursorStep::Finished;
        }

        let Some(round) = bank.round(self.round_index) else {
            self.finish();
            return CursorStep::Finished;
        };

        self.word_index += 1;
        if self.word_index < round.len() {
            return CursorStep::Advanced;
        }

        self.round_index += 1;
        self.word_index = 0;
        if self.round_index < bank.round_count() {
            return CursorStep::Advanced;
        }

        self.finish();
        CursorStep::Finished
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, EntryDraft, WordEntry};

    fn entry(word: &str, difficulty: u32) -> WordEntry {
        EntryDraft {
            word: word.to_string(),
            definition: String::new(),
            origin: String::new(),
            sentence: String::new(),
            difficulty: Difficulty::new(difficulty),
        }
        .validate()
        .unwrap()
    }

    fn bank_of(n: usize) -> WordBank {
        let entries = (0..n)
            .map(|i| entry(&format!("w{i}"), (n - i) as u32))
            .collect();
        WordBank::from_entries(entries)
    }

    #[test]
    fn cursor_rolls_over_round_boundary() {
        let bank = bank_of(7);
        let mut cursor = SessionCursor::start();

        for _ in 0..4 {
            assert_eq!(cursor.advance(&bank), CursorStep::Advanced);
        }
        assert_eq!(cursor.round_index(), 0);
        assert_eq!(cursor.word_index(), 4);

        assert_eq!(cursor.advance(&bank), CursorStep::Advanced);
        assert_eq!(cursor.round_index(), 1);
        assert_eq!(cursor.word_index(), 0);
    }

    #[test]
    fn advancing_total_word_count_times_finishes() {
        let bank = bank_of(12);
        let mut cursor = SessionCursor::start();

        for _ in 0..11 {
            assert_eq!(cursor.advance(&bank), CursorStep::Advanced);
            assert!(!cursor.is_finished());
        }
        assert_eq!(cursor.advance(&bank), CursorStep::Finished);
        assert!(cursor.is_finished());
    }

    #[test]
    fn advance_after_finish_stays_finished() {
        let bank = bank_of(1);
        let mut cursor = SessionCursor::start();
        assert_eq!(cursor.advance(&bank), CursorStep::Finished);
        assert_eq!(cursor.advance(&bank), CursorStep::Finished);
        assert!(cursor.is_finished());
    }

    #[test]
    fn empty_bank_finishes_immediately() {
        let bank = WordBank::from_entries(Vec::new());
        let mut cursor = SessionCursor::start();
        assert_eq!(cursor.advance(&bank), CursorStep::Finished);
    }

    #[test]
    fn finish_is_unconditional() {
        let bank = bank_of(5);
        let mut cursor = SessionCursor::start();
        cursor.advance(&bank);
        cursor.finish();
        assert!(cursor.is_finished());
    }
}
