use serde::Serialize;

/// Aggregated view of quiz progress, useful for presentation layers.
///
/// Round and word indices are zero-based; presentation layers may format
/// them as they see fit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub round_index: usize,
    pub round_count: usize,
    pub round_served: u32,
    pub round_correct: u32,
    pub total_correct: u32,
    pub total_words: usize,
    pub is_finished: bool,
}
