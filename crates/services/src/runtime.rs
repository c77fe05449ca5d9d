//! Seam for an external conversational runtime.
//!
//! The quiz logic never depends on a dialog framework: the engine consults
//! a `DialogRuntime` first and falls back to its own deterministic handling
//! when the runtime produces nothing. The stub implementation keeps the
//! whole system offline and deterministic.

/// A conversational front end that may answer user input before the local
/// engine does.
pub trait DialogRuntime {
    /// Produce a reply for the raw input line, or `None` to defer to the
    /// local engine.
    fn reply(&mut self, input: &str) -> Option<String>;
}

/// Deterministic stand-in for an external dialog runtime. Always defers.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubRuntime;

impl DialogRuntime for StubRuntime {
    fn reply(&mut self, _input: &str) -> Option<String> {
        None
    }
}
