mod bank;
mod cursor;
mod entry;

pub use bank::{ROUND_SIZE, Round, WordBank};
pub use cursor::{CursorStep, SessionCursor};
pub use entry::{Difficulty, EntryDraft, EntryError, ParseDifficultyError, WordEntry};
