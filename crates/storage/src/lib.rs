#![forbid(unsafe_code)]

pub mod csv;
pub mod repository;

pub use csv::CsvWordBank;
pub use repository::{EntryRecord, InMemorySource, LoadError, RowError, WordBankSource};
