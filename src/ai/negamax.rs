use crate::game::{Board, Player, Position, COLS, ROWS};

use super::book::OpeningBook;
use super::evaluator::{Evaluator, INVALID_MOVE};

/// Score of a win found with no search depth left; deeper remaining depth adds to it.
pub const WIN_SCORE: i32 = 100_000;

const INF: i32 = i32::MAX;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i32;
}

/// Default heuristic that scans all 4-cell windows and scores threats.
pub struct ConnectFourHeuristic;

/// Window start steps as (row step, column step): horizontal, vertical, `/`, `\`.
const WINDOW_STEPS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

impl ConnectFourHeuristic {
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 3 && empty == 1 {
            50
        } else if own == 2 && empty == 2 {
            10
        } else if opp == 3 && empty == 1 {
            -80
        } else if opp == 2 && empty == 2 {
            -10
        } else {
            0
        }
    }
}

impl Heuristic for ConnectFourHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score = 0;

        // Center column bonus
        for row in 0..ROWS {
            let cell = board.get(row, COLS / 2);
            if cell == own_cell {
                score += 3;
            } else if cell == opp_cell {
                score -= 3;
            }
        }

        for row in 0..ROWS as isize {
            for col in 0..COLS as isize {
                for &(dr, dc) in &WINDOW_STEPS {
                    let end_row = row + 3 * dr;
                    let end_col = col + 3 * dc;
                    if !(0..ROWS as isize).contains(&end_row) || end_col >= COLS as isize {
                        continue;
                    }

                    let (mut own, mut opp, mut empty) = (0, 0, 0);
                    for i in 0..4 {
                        match board.get((row + i * dr) as usize, (col + i * dc) as usize) {
                            c if c == own_cell => own += 1,
                            c if c == opp_cell => opp += 1,
                            _ => empty += 1,
                        }
                    }
                    score += Self::score_window(own, opp, empty);
                }
            }
        }

        score
    }
}

/// Column ordering: center-first for better alpha-beta pruning.
const MOVE_ORDER: [usize; COLS] = [3, 2, 4, 1, 5, 0, 6];

/// Search settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below each candidate column.
    pub depth: usize,
    /// Optional JSON opening book consulted before searching.
    pub book: Option<std::path::PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: 7,
            book: Some("7x6.book.json".into()),
        }
    }
}

/// Negamax evaluator with alpha-beta pruning and an optional opening book.
pub struct NegamaxEvaluator {
    depth: usize,
    heuristic: Box<dyn Heuristic>,
    book: Option<OpeningBook>,
    nodes: u64,
}

impl NegamaxEvaluator {
    pub fn new(depth: usize) -> Self {
        NegamaxEvaluator {
            depth: depth.max(1),
            heuristic: Box::new(ConnectFourHeuristic),
            book: None,
            nodes: 0,
        }
    }

    pub fn with_book(mut self, book: OpeningBook) -> Self {
        self.book = Some(book);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn has_book(&self) -> bool {
        self.book.is_some()
    }

    /// Nodes visited by the most recent search
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    fn search_columns(&mut self, position: &Position) -> Vec<i32> {
        let board = *position.board();
        let player = position.side_to_move();
        let mut scores = vec![INVALID_MOVE; COLS];
        self.nodes = 0;

        for &col in &MOVE_ORDER {
            let mut next = board;
            let Ok(row) = next.drop_piece(col, player.to_cell()) else {
                continue;
            };
            scores[col] = if next.check_win(row, col) {
                WIN_SCORE + self.depth as i32
            } else {
                -self.negamax(&next, player.other(), self.depth - 1, -INF, INF)
            };
        }

        scores
    }

    /// Score `board` for `player` to move; the previous mover has not won.
    fn negamax(
        &mut self,
        board: &Board,
        player: Player,
        depth: usize,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes += 1;

        if board.is_full() {
            return 0;
        }

        if depth == 0 {
            return self.heuristic.evaluate(board, player);
        }

        let mut best = -INF;

        for &col in &MOVE_ORDER {
            let mut next = *board;
            let Ok(row) = next.drop_piece(col, player.to_cell()) else {
                continue;
            };
            let score = if next.check_win(row, col) {
                WIN_SCORE + depth as i32
            } else {
                -self.negamax(&next, player.other(), depth - 1, -beta, -alpha)
            };
            if score > best {
                best = score;
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                break;
            }
        }

        best
    }
}

impl Evaluator for NegamaxEvaluator {
    fn score_columns(&mut self, position: &Position) -> Vec<i32> {
        if let Some(scores) = self.book.as_ref().and_then(|book| book.lookup(position)) {
            tracing::debug!(history = %position.history_key(), "opening book hit");
            return scores;
        }

        let scores = self.search_columns(position);
        tracing::debug!(
            history = %position.history_key(),
            depth = self.depth,
            nodes = self.nodes,
            ?scores,
            "searched position"
        );
        scores
    }

    fn name(&self) -> &str {
        "Negamax"
    }
}
