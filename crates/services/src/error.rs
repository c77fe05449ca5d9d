//! Shared error types for the services crate.

use thiserror::Error;

/// Errors emitted by the quiz session controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("word bank has no entries")]
    Empty,
    #[error("no active quiz session")]
    OutOfSession,
}

/// Errors emitted while classifying user input into an intent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IntentError {
    #[error(
        "unrecognized command {input:?}; valid commands are start, definition, origin, sentence, next, stop, or a single word to spell"
    )]
    InvalidCommand { input: String },
}
