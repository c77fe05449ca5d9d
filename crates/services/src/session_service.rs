use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

use spell_core::Clock;
use spell_core::model::{CursorStep, SessionCursor, WordBank, WordEntry};

use crate::error::SessionError;
use crate::progress::QuizProgress;

//
// ─── POLICY ────────────────────────────────────────────────────────────────────
//

/// When an incorrect attempt should reveal the expected spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealPolicy {
    /// Never reveal; the user keeps trying or moves on.
    #[default]
    Never,
    /// Reveal on the first incorrect attempt.
    Immediately,
    /// Reveal once this many attempts on the current word have failed.
    AfterAttempts(u32),
}

impl RevealPolicy {
    /// Whether the spelling should be revealed after the given number of
    /// attempts on the current word.
    #[must_use]
    pub fn reveals(self, attempts: u32) -> bool {
        match self {
            RevealPolicy::Never => false,
            RevealPolicy::Immediately => true,
            RevealPolicy::AfterAttempts(n) => attempts >= n,
        }
    }
}

/// Error type for parsing a reveal policy from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRevealPolicyError {
    raw: String,
}

impl fmt::Display for ParseRevealPolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid reveal policy {:?}, expected never, immediate, or after:N",
            self.raw
        )
    }
}

impl std::error::Error for ParseRevealPolicyError {}

impl FromStr for RevealPolicy {
    type Err = ParseRevealPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        match lowered.as_str() {
            "never" => Ok(RevealPolicy::Never),
            "immediate" => Ok(RevealPolicy::Immediately),
            _ => lowered
                .strip_prefix("after:")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|n| *n > 0)
                .map(RevealPolicy::AfterAttempts)
                .ok_or_else(|| ParseRevealPolicyError { raw: s.to_string() }),
        }
    }
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Position of the active word, without the word itself.
///
/// Presentation layers build the quiz prompt from this; the spelling is
/// deliberately absent so a prompt can never leak the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub round_index: usize,
    pub round_count: usize,
    pub word_index: usize,
    pub round_len: usize,
}

/// Score for one round: correct answers over words served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundScore {
    pub correct: u32,
    pub served: u32,
}

/// Result of checking one spelling attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Correct,
    /// Incorrect; `reveal` carries the expected word when the configured
    /// `RevealPolicy` says it should be shown.
    Incorrect { reveal: Option<String> },
}

/// Result of advancing to the next word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved to the next word within the same round.
    Next { prompt: Prompt },
    /// Rolled over into a new round; `completed` scores the finished one.
    NewRound { prompt: Prompt, completed: RoundScore },
    /// Stepped past the last word of the last round.
    Finished { completed: RoundScore },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session over a loaded word bank.
///
/// Owns the only mutable state in the system: the cursor, per-round score
/// and attempt counters. All operations are synchronous; commands issued
/// before `start` or after the session finishes yield
/// `SessionError::OutOfSession`.
pub struct QuizSession {
    bank: WordBank,
    cursor: Option<SessionCursor>,
    clock: Clock,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    round_correct: u32,
    round_served: u32,
    total_correct: u32,
    attempts_on_current: u32,
    solved_current: bool,
    reveal: RevealPolicy,
}

impl QuizSession {
    /// Create a session over the given bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank holds no words.
    pub fn new(bank: WordBank, clock: Clock) -> Result<Self, SessionError> {
        if bank.is_empty() {
            return Err(SessionError::Empty);
        }

        Ok(Self {
            bank,
            cursor: None,
            clock,
            started_at: None,
            completed_at: None,
            round_correct: 0,
            round_served: 0,
            total_correct: 0,
            attempts_on_current: 0,
            solved_current: false,
            reveal: RevealPolicy::default(),
        })
    }

    /// Set the reveal-on-incorrect policy.
    #[must_use]
    pub fn with_reveal_policy(mut self, reveal: RevealPolicy) -> Self {
        self.reveal = reveal;
        self
    }

    #[must_use]
    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// True once the session has finished, via `stop` or bank exhaustion.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor.is_some_and(|c| c.is_finished())
    }

    /// True between `start` and the session finishing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.cursor.is_some_and(|c| !c.is_finished())
    }

    /// The entry the cursor points at, while the session is active.
    #[must_use]
    pub fn current_entry(&self) -> Option<&WordEntry> {
        let cursor = self.cursor.filter(|c| !c.is_finished())?;
        self.bank.entry(cursor.round_index(), cursor.word_index())
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            round_index: self.cursor.map_or(0, |c| c.round_index()),
            round_count: self.bank.round_count(),
            round_served: self.round_served,
            round_correct: self.round_correct,
            total_correct: self.total_correct,
            total_words: self.bank.total_words(),
            is_finished: self.is_finished(),
        }
    }

    /// Begin (or restart) the quiz at the first word of the first round.
    pub fn start(&mut self) -> Prompt {
        self.cursor = Some(SessionCursor::start());
        self.started_at = Some(self.clock.now());
        self.completed_at = None;
        self.round_correct = 0;
        self.round_served = 1;
        self.total_correct = 0;
        self.attempts_on_current = 0;
        self.solved_current = false;
        self.prompt_at(0, 0)
    }

    /// Definition of the current word, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfSession` before `start` or after finish.
    pub fn definition(&self) -> Result<&str, SessionError> {
        self.require_current().map(WordEntry::definition)
    }

    /// Origin of the current word, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfSession` before `start` or after finish.
    pub fn origin(&self) -> Result<&str, SessionError> {
        self.require_current().map(WordEntry::origin)
    }

    /// Example sentence for the current word, possibly empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfSession` before `start` or after finish.
    pub fn sentence(&self) -> Result<&str, SessionError> {
        self.require_current().map(WordEntry::sentence)
    }

    /// Check a spelling attempt against the current word.
    ///
    /// Matching is case-insensitive and whitespace-trimmed. Does not
    /// advance the cursor; callers decide when to move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfSession` before `start` or after finish.
    pub fn attempt(&mut self, text: &str) -> Result<AttemptOutcome, SessionError> {
        let correct = self.require_current()?.matches_spelling(text);
        self.attempts_on_current += 1;

        if correct {
            // A word scores once; spelling it again keeps the score intact.
            if !self.solved_current {
                self.solved_current = true;
                self.round_correct += 1;
                self.total_correct += 1;
            }
            return Ok(AttemptOutcome::Correct);
        }

        let reveal = self
            .reveal
            .reveals(self.attempts_on_current)
            .then(|| self.require_current().map(|e| e.word().to_owned()))
            .transpose()?;
        Ok(AttemptOutcome::Incorrect { reveal })
    }

    /// Advance to the next word, rolling over round boundaries and
    /// finishing the session past the last word.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::OutOfSession` before `start` or after finish.
    pub fn next(&mut self) -> Result<StepOutcome, SessionError> {
        if !self.is_active() {
            return Err(SessionError::OutOfSession);
        }
        let mut cursor = self.cursor.ok_or(SessionError::OutOfSession)?;

        let previous_round = cursor.round_index();
        let step = cursor.advance(&self.bank);
        self.cursor = Some(cursor);
        self.attempts_on_current = 0;
        self.solved_current = false;

        let outcome = match step {
            CursorStep::Finished => {
                self.completed_at = Some(self.clock.now());
                StepOutcome::Finished {
                    completed: self.round_score(),
                }
            }
            CursorStep::Advanced if cursor.round_index() != previous_round => {
                let completed = self.round_score();
                self.round_correct = 0;
                self.round_served = 1;
                StepOutcome::NewRound {
                    prompt: self.prompt_at(cursor.round_index(), cursor.word_index()),
                    completed,
                }
            }
            CursorStep::Advanced => {
                self.round_served += 1;
                StepOutcome::Next {
                    prompt: self.prompt_at(cursor.round_index(), cursor.word_index()),
                }
            }
        };

        Ok(outcome)
    }

    /// End the session unconditionally. Idempotent: repeated calls return
    /// the same score.
    ///
    /// Stopping a session that was never started finishes it without
    /// stamping `completed_at`; a session only completes if it ran.
    pub fn stop(&mut self) -> RoundScore {
        match self.cursor {
            Some(mut cursor) if !cursor.is_finished() => {
                cursor.finish();
                self.cursor = Some(cursor);
                self.completed_at = Some(self.clock.now());
            }
            Some(_) => {}
            None => {
                let mut cursor = SessionCursor::start();
                cursor.finish();
                self.cursor = Some(cursor);
            }
        }
        self.round_score()
    }

    fn round_score(&self) -> RoundScore {
        RoundScore {
            correct: self.round_correct,
            served: self.round_served,
        }
    }

    fn require_current(&self) -> Result<&WordEntry, SessionError> {
        self.current_entry().ok_or(SessionError::OutOfSession)
    }

    fn prompt_at(&self, round_index: usize, word_index: usize) -> Prompt {
        Prompt {
            round_index,
            round_count: self.bank.round_count(),
            word_index,
            round_len: self.bank.round(round_index).map_or(0, |r| r.len()),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("total_words", &self.bank.total_words())
            .field("cursor", &self.cursor)
            .field("round_correct", &self.round_correct)
            .field("total_correct", &self.total_correct)
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
