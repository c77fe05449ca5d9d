#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod intent;
pub mod progress;
pub mod runtime;
pub mod session_service;

pub use spell_core::Clock;

pub use engine::{Reply, TutorEngine};
pub use error::{IntentError, SessionError};
pub use intent::{COMMANDS, Intent};
pub use progress::QuizProgress;
pub use runtime::{DialogRuntime, StubRuntime};
pub use session_service::{
    AttemptOutcome, ParseRevealPolicyError, Prompt, QuizSession, RevealPolicy, RoundScore,
    StepOutcome,
};
