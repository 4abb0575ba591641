//! Precomputed per-column scores for early positions, keyed by move history.
//!
//! On disk a book is JSON:
//!
//! ```json
//! { "width": 7, "height": 6, "entries": { "": [..], "3": [..], "33": [..] } }
//! ```
//!
//! Keys are the 0-based columns played so far, one digit per move.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::BookError;
use crate::game::{Position, COLS, ROWS};

use super::evaluator::{Evaluator, INVALID_MOVE};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct BookFile {
    width: usize,
    height: usize,
    entries: BTreeMap<String, Vec<i32>>,
}

#[derive(Debug, Clone, Default)]
pub struct OpeningBook {
    entries: HashMap<String, Vec<i32>>,
}

impl OpeningBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, position: &Position, scores: Vec<i32>) {
        self.entries.insert(position.history_key(), scores);
    }

    /// Scores for `position`, with full columns forced to `INVALID_MOVE`.
    pub fn lookup(&self, position: &Position) -> Option<Vec<i32>> {
        let scores = self.entries.get(&position.history_key())?;
        Some(
            scores
                .iter()
                .enumerate()
                .map(|(col, &s)| if position.can_play(col) { s } else { INVALID_MOVE })
                .collect(),
        )
    }

    /// Load and validate a book file.
    pub fn load(path: &Path) -> Result<Self, BookError> {
        let content = std::fs::read_to_string(path).map_err(|e| BookError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let file: BookFile = serde_json::from_str(&content).map_err(|e| BookError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        if file.width != COLS || file.height != ROWS {
            return Err(BookError::Dimensions {
                width: file.width,
                height: file.height,
                expected_width: COLS,
                expected_height: ROWS,
            });
        }

        let mut entries = HashMap::with_capacity(file.entries.len());
        for (key, scores) in file.entries {
            if scores.len() != COLS {
                return Err(BookError::EntryLength {
                    len: scores.len(),
                    key,
                    expected: COLS,
                });
            }
            let Some(position) = parse_key(&key) else {
                return Err(BookError::InvalidKey(key));
            };
            if let Some(column) =
                (0..COLS).find(|&col| position.can_play(col) && scores[col] == INVALID_MOVE)
            {
                return Err(BookError::PlayableColumnMarked { key, column });
            }
            entries.insert(key, scores);
        }

        Ok(OpeningBook { entries })
    }

    /// Write the book as pretty JSON with keys in sorted order.
    pub fn save(&self, path: &Path) -> Result<(), BookError> {
        let file = BookFile {
            width: COLS,
            height: ROWS,
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Score every unfinished position reachable within `plies` moves.
    pub fn generate<E: Evaluator + ?Sized>(evaluator: &mut E, plies: usize) -> Self {
        let mut book = OpeningBook::new();
        let mut pending = vec![Position::new()];

        while let Some(position) = pending.pop() {
            book.insert(&position, evaluator.score_columns(&position));

            if position.moves_played() >= plies {
                continue;
            }
            for col in position.legal_columns() {
                if let Ok(next) = position.with_move(col) {
                    if !next.has_winning_line_for_last_mover() && !next.is_full() {
                        pending.push(next);
                    }
                }
            }
        }

        tracing::info!(entries = book.len(), plies, "generated opening book");
        book
    }
}

/// Replay a history key; `None` if it is not a legal, unfinished game.
fn parse_key(key: &str) -> Option<Position> {
    let moves = key
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as usize).filter(|&d| d < COLS))
        .collect::<Option<Vec<_>>>()?;
    Position::from_moves(&moves).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    struct Flat;

    impl Evaluator for Flat {
        fn score_columns(&mut self, position: &Position) -> Vec<i32> {
            (0..COLS)
                .map(|col| if position.can_play(col) { 0 } else { INVALID_MOVE })
                .collect()
        }

        fn name(&self) -> &str {
            "Flat"
        }
    }

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_lookup_masks_full_columns() {
        let position = Position::from_moves(&[0, 0, 0, 0, 0, 0]).unwrap();
        let mut book = OpeningBook::new();
        book.insert(&position, vec![4, 1, 1, 1, 1, 1, 1]);

        let scores = book.lookup(&position).unwrap();
        assert_eq!(scores[0], INVALID_MOVE);
        assert_eq!(&scores[1..], &[1, 1, 1, 1, 1, 1]);
        assert!(book.lookup(&Position::new()).is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.json");

        let mut book = OpeningBook::new();
        book.insert(&Position::new(), vec![-2, -1, 0, 3, 0, -1, -2]);
        book.insert(&Position::from_moves(&[3]).unwrap(), vec![1; COLS]);
        book.save(&path).unwrap();

        let loaded = OpeningBook::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.lookup(&Position::new()),
            Some(vec![-2, -1, 0, 3, 0, -1, -2])
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = OpeningBook::load(Path::new("no_such_book.json")).unwrap_err();
        assert!(matches!(err, BookError::Read { .. }));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "bad.json", "not json");
        assert!(matches!(
            OpeningBook::load(&path).unwrap_err(),
            BookError::Parse { .. }
        ));
    }

    #[test]
    fn test_load_rejects_wrong_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "b.json", r#"{"width": 8, "height": 7, "entries": {}}"#);
        assert!(matches!(
            OpeningBook::load(&path).unwrap_err(),
            BookError::Dimensions { width: 8, height: 7, .. }
        ));
    }

    #[test]
    fn test_load_rejects_short_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "b.json",
            r#"{"width": 7, "height": 6, "entries": {"3": [1, 2, 3]}}"#,
        );
        assert!(matches!(
            OpeningBook::load(&path).unwrap_err(),
            BookError::EntryLength { len: 3, .. }
        ));
    }

    #[test]
    fn test_load_rejects_bad_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "b.json",
            r#"{"width": 7, "height": 6, "entries": {"39": [0, 0, 0, 0, 0, 0, 0]}}"#,
        );
        assert!(matches!(
            OpeningBook::load(&path).unwrap_err(),
            BookError::InvalidKey(k) if k == "39"
        ));
    }

    #[test]
    fn test_load_rejects_sentinel_on_playable_column() {
        let dir = tempfile::tempdir().unwrap();
        let s = INVALID_MOVE;
        let path = write_file(
            &dir,
            "b.json",
            &format!(r#"{{"width": 7, "height": 6, "entries": {{"": [0, 0, {s}, 0, 0, 0, 0]}}}}"#),
        );
        assert!(matches!(
            OpeningBook::load(&path).unwrap_err(),
            BookError::PlayableColumnMarked { column: 2, .. }
        ));
    }

    #[test]
    fn test_load_accepts_sentinel_on_full_column() {
        let dir = tempfile::tempdir().unwrap();
        let s = INVALID_MOVE;
        let path = write_file(
            &dir,
            "b.json",
            &format!(
                r#"{{"width": 7, "height": 6, "entries": {{"000000": [{s}, 1, 1, 1, 1, 1, 1]}}}}"#
            ),
        );
        assert_eq!(OpeningBook::load(&path).unwrap().len(), 1);
    }

    #[test]
    fn test_generate_covers_all_short_histories() {
        let book = OpeningBook::generate(&mut Flat, 2);
        // 1 root + 7 one-move + 49 two-move histories
        assert_eq!(book.len(), 1 + 7 + 49);
        assert!(book.lookup(&Position::from_moves(&[6, 0]).unwrap()).is_some());
        assert!(book.lookup(&Position::from_moves(&[6, 0, 1]).unwrap()).is_none());
    }
}
