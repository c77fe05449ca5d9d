use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Ordinal difficulty rating for a word. Higher is harder.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Difficulty(u32);

impl Difficulty {
    /// Creates a new `Difficulty`
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Difficulty({})", self.0)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a difficulty from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError {
    raw: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse difficulty from {:?}", self.raw)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(Difficulty::new)
            .map_err(|_| ParseDifficultyError { raw: s.to_string() })
    }
}

//
// ─── WORD ENTRY ────────────────────────────────────────────────────────────────
//

/// Errors that can occur while validating a word entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EntryError {
    #[error("word must not be empty")]
    EmptyWord,
}

/// Unvalidated shape of a word entry, as read from an input source.
///
/// `definition`, `origin` and `sentence` may be empty; presentation layers
/// substitute fallback text for missing fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub word: String,
    pub definition: String,
    pub origin: String,
    pub sentence: String,
    pub difficulty: Difficulty,
}

impl EntryDraft {
    /// Validate the draft into an immutable `WordEntry`.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::EmptyWord` if the word is empty after trimming.
    pub fn validate(self) -> Result<WordEntry, EntryError> {
        let word = self.word.trim().to_owned();
        if word.is_empty() {
            return Err(EntryError::EmptyWord);
        }

        Ok(WordEntry {
            word,
            definition: self.definition.trim().to_owned(),
            origin: self.origin.trim().to_owned(),
            sentence: self.sentence.trim().to_owned(),
            difficulty: self.difficulty,
        })
    }
}

/// A single quiz word with its supporting material. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    definition: String,
    origin: String,
    sentence: String,
    difficulty: Difficulty,
}

impl WordEntry {
    #[must_use]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn sentence(&self) -> &str {
        &self.sentence
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Case-insensitive, whitespace-trimmed exact match against this word.
    #[must_use]
    pub fn matches_spelling(&self, attempt: &str) -> bool {
        attempt.trim().eq_ignore_ascii_case(&self.word)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(word: &str) -> EntryDraft {
        EntryDraft {
            word: word.to_string(),
            definition: "a definition".to_string(),
            origin: "Latin".to_string(),
            sentence: "An example sentence.".to_string(),
            difficulty: Difficulty::new(3),
        }
    }

    #[test]
    fn entry_fails_if_word_empty() {
        let err = draft("   ").validate().unwrap_err();
        assert!(matches!(err, EntryError::EmptyWord));
    }

    #[test]
    fn entry_trims_fields() {
        let mut d = draft("  accommodate ");
        d.definition = "  to provide lodging  ".to_string();
        let entry = d.validate().unwrap();
        assert_eq!(entry.word(), "accommodate");
        assert_eq!(entry.definition(), "to provide lodging");
    }

    #[test]
    fn spelling_match_is_case_insensitive() {
        let entry = draft("accommodate").validate().unwrap();
        assert!(entry.matches_spelling("Accommodate"));
        assert!(entry.matches_spelling("  ACCOMMODATE  "));
        assert!(!entry.matches_spelling("acommodate"));
    }

    #[test]
    fn difficulty_orders_and_parses() {
        assert!(Difficulty::new(5) > Difficulty::new(1));
        let d: Difficulty = " 4 ".parse().unwrap();
        assert_eq!(d, Difficulty::new(4));
        assert!("hard".parse::<Difficulty>().is_err());
    }
}
