use crate::error::IntentError;

/// Command tokens the quiz understands, in the order they are reported to
/// the user.
pub const COMMANDS: [&str; 6] = ["start", "definition", "origin", "sentence", "next", "stop"];

/// Closed set of recognized user intents.
///
/// Free-text input that is not a recognized command falls through to
/// `Attempt`, carrying the raw (trimmed) text of the spelling attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Definition,
    Origin,
    Sentence,
    Next,
    Stop,
    Attempt(String),
}

/// Classify one line of user input.
///
/// Command matching is case-insensitive and accepts the conversational
/// synonyms the quiz has always understood (`start quiz`, `begin`,
/// `quiz me`; `end`, `finish`). A spelling attempt is a single word, so
/// empty input and unrecognized multi-word input are rejected.
///
/// # Errors
///
/// Returns `IntentError::InvalidCommand` for empty input or unrecognized
/// input containing whitespace.
pub fn parse(input: &str) -> Result<Intent, IntentError> {
    let trimmed = input.trim();
    let lowered = trimmed.to_lowercase();

    let intent = match lowered.as_str() {
        "start" | "start quiz" | "begin" | "quiz me" => Intent::Start,
        "definition" => Intent::Definition,
        "origin" => Intent::Origin,
        "sentence" => Intent::Sentence,
        "next" => Intent::Next,
        "stop" | "end" | "finish" => Intent::Stop,
        _ => {
            if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
                return Err(IntentError::InvalidCommand {
                    input: trimmed.to_string(),
                });
            }
            Intent::Attempt(trimmed.to_string())
        }
    };

    Ok(intent)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_parse_case_insensitively() {
        assert_eq!(parse("START").unwrap(), Intent::Start);
        assert_eq!(parse("  Definition ").unwrap(), Intent::Definition);
        assert_eq!(parse("origin").unwrap(), Intent::Origin);
        assert_eq!(parse("Sentence").unwrap(), Intent::Sentence);
        assert_eq!(parse("NEXT").unwrap(), Intent::Next);
        assert_eq!(parse("stop").unwrap(), Intent::Stop);
    }

    #[test]
    fn synonyms_are_recognized() {
        assert_eq!(parse("start quiz").unwrap(), Intent::Start);
        assert_eq!(parse("Quiz Me").unwrap(), Intent::Start);
        assert_eq!(parse("begin").unwrap(), Intent::Start);
        assert_eq!(parse("end").unwrap(), Intent::Stop);
        assert_eq!(parse("finish").unwrap(), Intent::Stop);
    }

    #[test]
    fn single_word_falls_through_to_attempt() {
        assert_eq!(
            parse("  Accommodate ").unwrap(),
            Intent::Attempt("Accommodate".to_string())
        );
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = parse("   ").unwrap_err();
        assert!(matches!(err, IntentError::InvalidCommand { .. }));
    }

    #[test]
    fn multi_word_garbage_is_invalid() {
        let err = parse("please help me").unwrap_err();
        assert!(matches!(err, IntentError::InvalidCommand { .. }));
    }
}
