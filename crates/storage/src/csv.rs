use std::path::{Path, PathBuf};

use crate::repository::{EntryRecord, LoadError, WordBankSource};
use spell_core::model::WordBank;

/// Column names and order the loader accepts. This is a compatibility
/// contract with existing word files; anything else is rejected up front.
pub const EXPECTED_HEADER: [&str; 5] = ["word", "definition", "origin", "sentence", "difficulty"];

/// CSV-backed word bank source.
///
/// Reads UTF-8 CSV with one header row and one data row per word. Loading
/// is a pure function of the file contents: the same file always yields the
/// same bank.
#[derive(Debug, Clone)]
pub struct CsvWordBank {
    path: PathBuf,
}

impl CsvWordBank {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load a bank straight from a path.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the file is missing, the header does not match
    /// `EXPECTED_HEADER`, any row is malformed, or the file has no data rows.
    pub fn load_path(path: impl Into<PathBuf>) -> Result<WordBank, LoadError> {
        Self::new(path).load()
    }
}

impl WordBankSource for CsvWordBank {
    fn load(&self) -> Result<WordBank, LoadError> {
        let mut reader = ::csv::Reader::from_path(&self.path)?;

        let header: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();
        if header != EXPECTED_HEADER {
            return Err(LoadError::Header {
                found: header,
                expected: &EXPECTED_HEADER,
            });
        }

        let mut entries = Vec::new();
        for (index, result) in reader.deserialize::<EntryRecord>().enumerate() {
            // Line 1 is the header, data starts at line 2.
            let line = index + 2;
            let record = result?;
            let entry = record
                .into_entry()
                .map_err(|source| LoadError::Row { line, source })?;
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(LoadError::Empty);
        }

        Ok(WordBank::from_entries(entries))
    }
}
