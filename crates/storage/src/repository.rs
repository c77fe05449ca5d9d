use serde::Deserialize;
use thiserror::Error;

use spell_core::model::{Difficulty, EntryDraft, EntryError, ParseDifficultyError, WordBank, WordEntry};

/// Errors surfaced while validating a single data row.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RowError {
    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Difficulty(#[from] ParseDifficultyError),
}

/// Errors surfaced by word bank sources.
///
/// Loading fails fast: the first bad row aborts the whole load, there is no
/// partial bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("unexpected header {found:?}, expected {expected:?}")]
    Header {
        found: Vec<String>,
        expected: &'static [&'static str],
    },

    #[error("invalid row at line {line}: {source}")]
    Row { line: usize, source: RowError },

    #[error("word bank contains no entries")]
    Empty,
}

/// Persisted shape for a word entry, as it appears in one CSV row.
///
/// This mirrors the domain `WordEntry` so sources can deserialize without
/// leaking storage concerns into the domain layer. `difficulty` stays a
/// string here so a bad value is reported per row rather than as an opaque
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct EntryRecord {
    pub word: String,
    pub definition: String,
    pub origin: String,
    pub sentence: String,
    pub difficulty: String,
}

impl EntryRecord {
    /// Convert the record into a domain `WordEntry`.
    ///
    /// # Errors
    ///
    /// Returns `RowError` if the difficulty fails to parse or the entry
    /// fails validation.
    pub fn into_entry(self) -> Result<WordEntry, RowError> {
        let difficulty: Difficulty = self.difficulty.parse()?;
        let entry = EntryDraft {
            word: self.word,
            definition: self.definition,
            origin: self.origin,
            sentence: self.sentence,
            difficulty,
        }
        .validate()?;
        Ok(entry)
    }
}

/// A source that can produce a complete word bank.
pub trait WordBankSource {
    /// Load, validate and partition the full bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` on any I/O, parse or validation failure, or if
    /// the source holds no entries.
    fn load(&self) -> Result<WordBank, LoadError>;
}

/// In-memory source for tests and seeding.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<EntryRecord>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(records: Vec<EntryRecord>) -> Self {
        Self { records }
    }
}

impl WordBankSource for InMemorySource {
    fn load(&self) -> Result<WordBank, LoadError> {
        if self.records.is_empty() {
            return Err(LoadError::Empty);
        }

        let mut entries = Vec::with_capacity(self.records.len());
        for (index, record) in self.records.iter().cloned().enumerate() {
            let entry = record
                .into_entry()
                .map_err(|source| LoadError::Row {
                    line: index + 1,
                    source,
                })?;
            entries.push(entry);
        }

        Ok(WordBank::from_entries(entries))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
