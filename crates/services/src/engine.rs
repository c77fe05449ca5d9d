use spell_core::Clock;
use spell_core::model::WordBank;

use crate::error::SessionError;
use crate::intent::{self, Intent};
use crate::runtime::{DialogRuntime, StubRuntime};
use crate::session_service::{
    AttemptOutcome, Prompt, QuizSession, RevealPolicy, RoundScore, StepOutcome,
};

/// One rendered reply from the tutor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// True when this reply ends the conversation (stop, or bank exhausted).
    pub ended: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ended: false,
        }
    }

    fn ended(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ended: true,
        }
    }
}

/// The dispatch boundary of the quiz: one input line in, one reply out.
///
/// Every session error is converted to a textual response here; `respond`
/// never fails and never panics. An external `DialogRuntime` gets first
/// crack at each input and the deterministic local logic handles whatever
/// the runtime defers.
pub struct TutorEngine {
    session: QuizSession,
    runtime: Box<dyn DialogRuntime>,
    advance_on_correct: bool,
}

impl TutorEngine {
    /// Create an engine over the given bank, fronted by the stub runtime.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if the bank holds no words.
    pub fn new(bank: WordBank, clock: Clock) -> Result<Self, SessionError> {
        Ok(Self {
            session: QuizSession::new(bank, clock)?,
            runtime: Box::new(StubRuntime),
            advance_on_correct: true,
        })
    }

    /// Replace the conversational front end.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Box<dyn DialogRuntime>) -> Self {
        self.runtime = runtime;
        self
    }

    /// Set the reveal-on-incorrect policy.
    #[must_use]
    pub fn with_reveal_policy(mut self, reveal: RevealPolicy) -> Self {
        self.session = self.session.with_reveal_policy(reveal);
        self
    }

    /// Whether a correct attempt automatically moves to the next word.
    #[must_use]
    pub fn with_advance_on_correct(mut self, advance: bool) -> Self {
        self.advance_on_correct = advance;
        self
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Handle one line of user input.
    pub fn respond(&mut self, input: &str) -> Reply {
        if let Some(text) = self.runtime.reply(input) {
            return Reply {
                text,
                ended: self.session.is_finished(),
            };
        }

        match intent::parse(input) {
            Ok(intent) => self.dispatch(intent),
            Err(err) => Reply::text(format!("Sorry, {err}.")),
        }
    }

    fn dispatch(&mut self, intent: Intent) -> Reply {
        match intent {
            Intent::Start => {
                let prompt = self.session.start();
                Reply::text(format!(
                    "Okay! {} rounds, hardest to easiest. {}",
                    prompt.round_count,
                    prompt_line(prompt)
                ))
            }
            Intent::Definition => self.field_reply(
                "Definition",
                self.session.definition().map(str::to_owned),
                "No definition found.",
            ),
            Intent::Origin => self.field_reply(
                "Origin",
                self.session.origin().map(str::to_owned),
                "No origin found.",
            ),
            Intent::Sentence => self.field_reply(
                "Example",
                self.session.sentence().map(str::to_owned),
                "No example available.",
            ),
            Intent::Next => match self.session.next() {
                Ok(step) => self.step_reply("Moving on.", step),
                Err(_) => self.out_of_session_reply(),
            },
            Intent::Stop => {
                let score = self.session.stop();
                Reply::ended(format!("Stopping the quiz. {}", score_line(score)))
            }
            Intent::Attempt(word) => self.attempt_reply(&word),
        }
    }

    fn attempt_reply(&mut self, word: &str) -> Reply {
        match self.session.attempt(word) {
            Ok(AttemptOutcome::Correct) => {
                if !self.advance_on_correct {
                    return Reply::text("Correct! Say next to continue.");
                }
                match self.session.next() {
                    Ok(step) => self.step_reply("Correct!", step),
                    Err(_) => self.out_of_session_reply(),
                }
            }
            Ok(AttemptOutcome::Incorrect { reveal }) => match reveal {
                Some(expected) => Reply::text(format!(
                    "Not quite. The word was \"{expected}\". Say next to continue."
                )),
                None => Reply::text(
                    "Not quite. Try again, or ask for the definition, origin, or sentence.",
                ),
            },
            Err(SessionError::OutOfSession) => self.out_of_session_reply(),
            Err(err) => Reply::text(format!("Sorry, {err}.")),
        }
    }

    fn field_reply(
        &self,
        label: &str,
        field: Result<String, SessionError>,
        fallback: &str,
    ) -> Reply {
        match field {
            Ok(text) if text.is_empty() => Reply::text(format!("{label}: {fallback}")),
            Ok(text) => Reply::text(format!("{label}: {text}")),
            Err(_) => self.out_of_session_reply(),
        }
    }

    fn step_reply(&self, lead: &str, step: StepOutcome) -> Reply {
        match step {
            StepOutcome::Next { prompt } => Reply::text(format!("{lead} {}", prompt_line(prompt))),
            StepOutcome::NewRound { prompt, completed } => Reply::text(format!(
                "{lead} Round complete. {} {}",
                score_line(completed),
                prompt_line(prompt)
            )),
            StepOutcome::Finished { completed } => {
                let progress = self.session.progress();
                Reply::ended(format!(
                    "{lead} That was the last word. {} Total: {}/{}.",
                    score_line(completed),
                    progress.total_correct,
                    progress.total_words
                ))
            }
        }
    }

    fn out_of_session_reply(&self) -> Reply {
        if self.session.is_finished() {
            Reply::text("The quiz is over. Say start to play again.")
        } else {
            Reply::text("No quiz is running. Say start to begin.")
        }
    }
}

fn prompt_line(prompt: Prompt) -> String {
    format!(
        "Round {} of {}, word {} of {}. Spell the word, or ask for the definition, origin, or sentence.",
        prompt.round_index + 1,
        prompt.round_count,
        prompt.word_index + 1,
        prompt.round_len
    )
}

fn score_line(score: RoundScore) -> String {
    format!("Score this round: {}/{}.", score.correct, score.served)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use spell_core::model::{Difficulty, EntryDraft, WordEntry};
    use spell_core::time::fixed_clock;

    fn entry(word: &str, difficulty: u32) -> WordEntry {
        EntryDraft {
            word: word.to_string(),
            definition: format!("definition of {word}"),
            origin: String::new(),
            sentence: format!("{word} in a sentence"),
            difficulty: Difficulty::new(difficulty),
        }
        .validate()
        .unwrap()
    }

    fn engine_of(words: &[(&str, u32)]) -> TutorEngine {
        let entries = words.iter().map(|(w, d)| entry(w, *d)).collect();
        TutorEngine::new(WordBank::from_entries(entries), fixed_clock()).unwrap()
    }

    #[test]
    fn commands_before_start_hint_at_start() {
        let mut engine = engine_of(&[("alpha", 1)]);
        let reply = engine.respond("definition");
        assert_eq!(reply.text, "No quiz is running. Say start to begin.");
        assert!(!reply.ended);
    }

    #[test]
    fn start_names_round_and_position_but_not_the_word() {
        let mut engine = engine_of(&[("zygote", 5), ("alpha", 1)]);
        let reply = engine.respond("start");
        assert!(reply.text.contains("Round 1 of 1, word 1 of 2"));
        assert!(!reply.text.contains("zygote"));
    }

    #[test]
    fn definition_after_start_reads_current_word() {
        let mut engine = engine_of(&[("alpha", 1)]);
        engine.respond("start");
        let reply = engine.respond("definition");
        assert_eq!(reply.text, "Definition: definition of alpha");
    }

    #[test]
    fn empty_field_gets_fallback_text() {
        let mut engine = engine_of(&[("alpha", 1)]);
        engine.respond("start");
        let reply = engine.respond("origin");
        assert_eq!(reply.text, "Origin: No origin found.");
    }

    #[test]
    fn correct_attempt_advances_and_ends_on_last_word() {
        let mut engine = engine_of(&[("beta", 2), ("alpha", 1)]);
        engine.respond("start");

        let reply = engine.respond("beta");
        assert!(reply.text.starts_with("Correct!"));
        assert!(reply.text.contains("word 2 of 2"));
        assert!(!reply.ended);

        let reply = engine.respond("Alpha");
        assert!(reply.text.starts_with("Correct!"));
        assert!(reply.text.contains("Total: 2/2."));
        assert!(reply.ended);
    }

    #[test]
    fn incorrect_attempt_keeps_the_word_hidden_by_default() {
        let mut engine = engine_of(&[("alpha", 1)]);
        engine.respond("start");
        let reply = engine.respond("alhpa");
        assert!(reply.text.starts_with("Not quite."));
        assert!(!reply.text.contains("alpha"));
    }

    #[test]
    fn incorrect_attempt_reveals_when_configured() {
        let mut engine =
            engine_of(&[("alpha", 1)]).with_reveal_policy(RevealPolicy::Immediately);
        engine.respond("start");
        let reply = engine.respond("alhpa");
        assert!(reply.text.contains("The word was \"alpha\""));
    }

    #[test]
    fn stop_is_idempotent_and_terminal() {
        let mut engine = engine_of(&[("alpha", 1)]);
        engine.respond("start");
        let first = engine.respond("stop");
        let second = engine.respond("stop");
        assert_eq!(first, second);
        assert!(first.ended);
        assert!(first.text.contains("Score this round: 0/1."));
    }

    #[test]
    fn invalid_command_lists_valid_ones() {
        let mut engine = engine_of(&[("alpha", 1)]);
        let reply = engine.respond("please help me");
        assert!(reply.text.contains("start, definition, origin, sentence, next, stop"));
    }

    #[test]
    fn commands_after_finish_report_session_over() {
        let mut engine = engine_of(&[("alpha", 1)]);
        engine.respond("start");
        let last = engine.respond("next");
        assert!(last.ended);

        let reply = engine.respond("definition");
        assert_eq!(reply.text, "The quiz is over. Say start to play again.");
    }

    #[test]
    fn runtime_reply_takes_precedence() {
        struct CannedRuntime;
        impl DialogRuntime for CannedRuntime {
            fn reply(&mut self, input: &str) -> Option<String> {
                (input == "hello").then(|| "Hi there!".to_string())
            }
        }

        let mut engine = engine_of(&[("alpha", 1)]).with_runtime(Box::new(CannedRuntime));
        assert_eq!(engine.respond("hello").text, "Hi there!");
        // Anything else falls through to the local engine.
        let reply = engine.respond("definition");
        assert_eq!(reply.text, "No quiz is running. Say start to begin.");
    }
}
