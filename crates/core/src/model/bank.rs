use std::cmp::Reverse;

use crate::model::WordEntry;

/// Number of words presented per quiz round.
pub const ROUND_SIZE: usize = 5;

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// An ordered batch of up to `ROUND_SIZE` words presented in one quiz segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    entries: Vec<WordEntry>,
}

impl Round {
    #[must_use]
    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&WordEntry> {
        self.entries.get(index)
    }
}

//
// ─── WORD BANK ─────────────────────────────────────────────────────────────────
//

/// The full quiz bank: entries sorted hardest-first and partitioned into rounds.
///
/// Sorting is stable, so entries with equal difficulty keep their original
/// input order across runs. The final round may hold fewer than `ROUND_SIZE`
/// entries when the bank does not divide evenly; a bank smaller than one
/// round yields a single short round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordBank {
    rounds: Vec<Round>,
    total: usize,
}

impl WordBank {
    /// Build a bank from loaded entries, sorting by descending difficulty
    /// and partitioning into rounds of `ROUND_SIZE`.
    #[must_use]
    pub fn from_entries(mut entries: Vec<WordEntry>) -> Self {
        entries.sort_by_key(|e| Reverse(e.difficulty()));

        let total = entries.len();
        let mut rounds = Vec::with_capacity(total.div_ceil(ROUND_SIZE));
        let mut remaining = entries;
        while remaining.len() > ROUND_SIZE {
            let rest = remaining.split_off(ROUND_SIZE);
            rounds.push(Round { entries: remaining });
            remaining = rest;
        }
        if !remaining.is_empty() {
            rounds.push(Round { entries: remaining });
        }

        Self { rounds, total }
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    #[must_use]
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.rounds.get(index)
    }

    #[must_use]
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Total number of words across all rounds.
    #[must_use]
    pub fn total_words(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Look up an entry by (round, position-within-round).
    #[must_use]
    pub fn entry(&self, round_index: usize, word_index: usize) -> Option<&WordEntry> {
        self.rounds.get(round_index)?.entry(word_index)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, EntryDraft};

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

    #[test]
    fn bank_sorts_hardest_first_with_stable_ties() {
        let bank = WordBank::from_entries(vec![
            entry("alpha", 3),
            entry("bravo", 1),
            entry("charlie", 4),
            entry("delta", 1),
            entry("echo", 5),
        ]);

        let words: Vec<&str> = bank.rounds()[0].entries().iter().map(WordEntry::word).collect();
        assert_eq!(words, vec!["echo", "charlie", "alpha", "bravo", "delta"]);

        let difficulties: Vec<u32> = bank.rounds()[0]
            .entries()
            .iter()
            .map(|e| e.difficulty().value())
            .collect();
        assert_eq!(difficulties, vec![5, 4, 3, 1, 1]);
    }

    #[test]
    fn bank_partitions_twelve_entries_into_5_5_2() {
        let entries = (0..12).map(|i| entry(&format!("w{i}"), 12 - i)).collect();
        let bank = WordBank::from_entries(entries);

        let sizes: Vec<usize> = bank.rounds().iter().map(Round::len).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
        assert_eq!(bank.total_words(), 12);
        assert_eq!(bank.round_count(), 3);
    }

    #[test]
    fn bank_smaller_than_round_size_yields_single_short_round() {
        let bank = WordBank::from_entries(vec![entry("solo", 2), entry("duo", 4)]);
        assert_eq!(bank.round_count(), 1);
        assert_eq!(bank.rounds()[0].len(), 2);
        assert_eq!(bank.rounds()[0].entry(0).unwrap().word(), "duo");
    }

    #[test]
    fn empty_bank_has_no_rounds() {
        let bank = WordBank::from_entries(Vec::new());
        assert!(bank.is_empty());
        assert_eq!(bank.round_count(), 0);
    }

    #[test]
    fn entry_lookup_by_round_and_position() {
        let entries = (0..7).map(|i| entry(&format!("w{i}"), 7 - i)).collect();
        let bank = WordBank::from_entries(entries);

        assert_eq!(bank.entry(0, 0).unwrap().word(), "w0");
        assert_eq!(bank.entry(1, 1).unwrap().word(), "w6");
        assert!(bank.entry(1, 2).is_none());
        assert!(bank.entry(2, 0).is_none());
    }
}
