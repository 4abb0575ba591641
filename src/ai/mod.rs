//! Position evaluation for the computer player: the `Evaluator` seam, a
//! negamax search implementation and its optional opening book.

mod book;
mod evaluator;
mod negamax;

pub use book::OpeningBook;
pub use evaluator::{best_score, Evaluator, INVALID_MOVE};
pub use negamax::{ConnectFourHeuristic, Heuristic, NegamaxEvaluator, SearchConfig, WIN_SCORE};
