use crate::ai::INVALID_MOVE;
use crate::error::SelectionError;

/// Pick the computer's column from an evaluation vector.
///
/// Columns are scanned left to right and the first one reaching the highest
/// playable score wins, so equal scores always resolve to the lowest index.
pub fn select_column(scores: &[i32], width: usize) -> Result<usize, SelectionError> {
    if scores.is_empty() {
        return Err(SelectionError::EmptyEvaluation);
    }
    if scores.len() != width {
        return Err(SelectionError::LengthMismatch {
            expected: width,
            actual: scores.len(),
        });
    }

    let mut best: Option<(usize, i32)> = None;
    for (col, &score) in scores.iter().enumerate() {
        if score == INVALID_MOVE {
            continue;
        }
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((col, score));
        }
    }

    best.map(|(col, _)| col).ok_or(SelectionError::NoLegalColumn)
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: i32 = INVALID_MOVE;

    #[test]
    fn picks_first_of_tied_maximum() {
        assert_eq!(select_column(&[-1, 2, 5, S, 5, 0, -3], 7), Ok(2));
        assert_eq!(select_column(&[0, 0, 4, 0, 4, 0, 0], 7), Ok(2));
    }

    #[test]
    fn picks_unique_maximum() {
        assert_eq!(select_column(&[1, 2, 3, 4, 3, 9, 1], 7), Ok(5));
    }

    #[test]
    fn skips_sentinel_columns() {
        assert_eq!(select_column(&[S, S, -7, S, -9, S, S], 7), Ok(2));
    }

    #[test]
    fn handles_all_negative_scores() {
        assert_eq!(select_column(&[-50, -20, -20, -90, -30, -40, -60], 7), Ok(1));
    }

    #[test]
    fn deterministic_across_calls() {
        let scores = [3, 1, 3, 3, 0, 3, 2];
        for _ in 0..10 {
            assert_eq!(select_column(&scores, 7), Ok(0));
        }
    }

    #[test]
    fn empty_vector_is_reported() {
        assert_eq!(select_column(&[], 7), Err(SelectionError::EmptyEvaluation));
    }

    #[test]
    fn wrong_length_is_reported() {
        assert_eq!(
            select_column(&[1, 2, 3], 7),
            Err(SelectionError::LengthMismatch {
                expected: 7,
                actual: 3
            })
        );
    }

    #[test]
    fn all_sentinel_is_reported() {
        assert_eq!(select_column(&[S; 7], 7), Err(SelectionError::NoLegalColumn));
    }
}
