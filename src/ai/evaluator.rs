use crate::game::Position;

/// Score reserved for columns that cannot be played.
pub const INVALID_MOVE: i32 = i32::MIN;

/// Position scoring used by the computer player and the evaluation display.
///
/// Scores are from the perspective of the side to move: higher is better for
/// whoever plays next. Implementations may be slow (search), so callers are
/// expected to cache results per position instead of asking twice.
pub trait Evaluator {
    /// One score per column, `INVALID_MOVE` for unplayable columns.
    fn score_columns(&mut self, position: &Position) -> Vec<i32>;

    /// Single score for the whole position, `None` if nothing is playable.
    fn score_position(&mut self, position: &Position) -> Option<i32> {
        best_score(&self.score_columns(position))
    }

    /// Display name.
    fn name(&self) -> &str;
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn score_columns(&mut self, position: &Position) -> Vec<i32> {
        (**self).score_columns(position)
    }

    fn score_position(&mut self, position: &Position) -> Option<i32> {
        (**self).score_position(position)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Highest score among playable columns.
pub fn best_score(scores: &[i32]) -> Option<i32> {
    scores.iter().copied().filter(|&s| s != INVALID_MOVE).max()
}
