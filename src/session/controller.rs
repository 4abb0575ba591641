use tracing::{debug, error, info, warn};

use crate::ai::{best_score, Evaluator};
use crate::error::{SelectionError, SessionFault};
use crate::game::{Board, MoveError, Player, Position};

use super::phase::{Outcome, Phase, Turn};
use super::selector::select_column;
use super::SessionConfig;

/// Evaluation vector for the position after `ply` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub ply: usize,
    pub scores: Vec<i32>,
    /// Best playable score, from the side to move's perspective.
    pub score: Option<i32>,
}

impl Evaluation {
    fn new(ply: usize, scores: Vec<i32>) -> Self {
        Evaluation {
            ply,
            score: best_score(&scores),
            scores,
        }
    }
}

/// One human-vs-computer session: the only owner of the board, the turn
/// marker and the lifecycle phase.
pub struct Session<E: Evaluator> {
    pub(super) evaluator: E,
    pub(super) config: SessionConfig,
    pub(super) position: Position,
    pub(super) turn: Turn,
    pub(super) phase: Phase,
    pub(super) human_disc: Player,
    pub(super) evaluation: Option<Evaluation>,
    pub(super) games_started: u64,
}

impl<E: Evaluator> Session<E> {
    pub fn new(evaluator: E, config: SessionConfig) -> Self {
        Session {
            evaluator,
            config,
            position: Position::new(),
            turn: Turn::Human,
            phase: Phase::AwaitingFirstPlayerChoice,
            human_disc: Player::Red,
            evaluation: None,
            games_started: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn human_disc(&self) -> Player {
        self.human_disc
    }

    pub fn computer_disc(&self) -> Player {
        self.human_disc.other()
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Most recent evaluation, possibly for an earlier position.
    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    /// Evaluation of the position currently on the board, if one was made.
    pub fn current_evaluation(&self) -> Option<&Evaluation> {
        self.evaluation
            .as_ref()
            .filter(|e| e.ply == self.position.moves_played())
    }

    pub fn is_column_legal(&self, column: usize) -> bool {
        self.position.can_play(column)
    }

    /// Drop a human disc. Returns `false`, changing nothing, when it is not
    /// the human's turn or the column cannot be played. A non-terminal move
    /// hands the turn to the computer, which replies before this returns.
    pub fn apply_human_move(&mut self, column: usize) -> bool {
        if !self.phase.is_in_play() || self.turn != Turn::Human || !self.is_column_legal(column) {
            debug!(column, phase = self.phase.name(), turn = ?self.turn, "ignored human move");
            return false;
        }

        if self.play(column, Turn::Human).is_err() {
            return false;
        }

        if self.phase.is_in_play() {
            self.apply_computer_move();
        }
        true
    }

    /// Let the computer choose and play a column. Returns whether a disc was
    /// dropped.
    pub fn apply_computer_move(&mut self) -> bool {
        if !self.phase.is_in_play() || self.turn != Turn::Computer {
            return false;
        }

        let scores = self.current_scores();
        let column = match select_column(&scores, Position::WIDTH) {
            Ok(column) => column,
            Err(SelectionError::EmptyEvaluation) => {
                warn!(
                    evaluator = self.evaluator.name(),
                    "evaluator returned no scores, computer move skipped"
                );
                self.evaluation = None;
                return false;
            }
            Err(e) => {
                self.abort(e.into());
                return false;
            }
        };

        match self.play(column, Turn::Computer) {
            Ok(()) => true,
            Err(_) => {
                self.abort(SessionFault::IllegalChoice { column });
                false
            }
        }
    }

    /// Apply a move for `mover`, then resolve win, tie or the next turn.
    fn play(&mut self, column: usize, mover: Turn) -> Result<(), MoveError> {
        let row = self.position.play_column(column)?;
        debug!(
            column,
            row,
            ?mover,
            ply = self.position.moves_played(),
            "applied move"
        );

        match self.detect_terminal(mover) {
            Some(outcome) => {
                info!(?outcome, moves = self.position.moves_played(), "game over");
                self.phase = Phase::Terminal(outcome);
            }
            None => {
                self.turn = mover.other();
                if self.config.live_evaluation {
                    self.evaluate();
                }
            }
        }
        Ok(())
    }

    /// Win for the player who just moved beats a full board.
    fn detect_terminal(&self, mover: Turn) -> Option<Outcome> {
        if self.position.has_winning_line_for_last_mover() {
            return Some(Outcome::win_for(mover));
        }
        if (0..Position::WIDTH).all(|col| !self.position.can_play(col)) {
            return Some(Outcome::Tie);
        }
        None
    }

    /// Cached vector for the current ply, or a fresh one.
    fn current_scores(&mut self) -> Vec<i32> {
        match self.current_evaluation() {
            Some(evaluation) => evaluation.scores.clone(),
            None => self.evaluate(),
        }
    }

    fn evaluate(&mut self) -> Vec<i32> {
        let scores = self.evaluator.score_columns(&self.position);
        debug!(ply = self.position.moves_played(), ?scores, "evaluated position");
        self.evaluation = Some(Evaluation::new(self.position.moves_played(), scores.clone()));
        scores
    }

    fn abort(&mut self, fault: SessionFault) {
        error!(%fault, ply = self.position.moves_played(), "session aborted");
        self.phase = Phase::Aborted(fault);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::INVALID_MOVE;
    use crate::game::Cell;
    use crate::session::testing::{assert_gravity, Scripted, DRAW_GAME, LAST_MOVE_WINS};

    const S: i32 = INVALID_MOVE;

    fn session(evaluator: Scripted) -> Session<Scripted> {
        Session::new(evaluator, SessionConfig::default())
    }

    fn quiet_session(evaluator: Scripted) -> Session<Scripted> {
        Session::new(
            evaluator,
            SessionConfig {
                live_evaluation: false,
            },
        )
    }

    fn human_first(evaluator: Scripted) -> Session<Scripted> {
        let mut s = session(evaluator);
        assert!(s.choose_first_player(Turn::Human));
        s
    }

    /// Play the even-indexed moves of `game` as the human; the scripted
    /// evaluator plays the odd ones.
    fn play_out(s: &mut Session<Scripted>, game: &[usize]) {
        for &col in game.iter().step_by(2) {
            assert!(s.apply_human_move(col), "human move {col} rejected");
        }
    }

    #[test]
    fn moves_are_ignored_before_first_player_choice() {
        let mut s = session(Scripted::game(&[]));
        assert!(!s.apply_human_move(3));
        assert!(!s.apply_computer_move());
        assert_eq!(s.position().moves_played(), 0);
        assert_eq!(s.evaluator().calls, 0);
    }

    #[test]
    fn computer_replies_immediately_to_human_move() {
        let mut s = human_first(Scripted::game(&[3, 4]));
        assert!(s.apply_human_move(3));

        assert_eq!(s.turn(), Turn::Human);
        assert!(s.phase().is_in_play());
        assert_eq!(s.board().get(0, 3), Cell::Red);
        assert_eq!(s.board().get(0, 4), Cell::Yellow);
        assert_eq!(s.human_disc(), Player::Red);
        assert_eq!(s.computer_disc(), Player::Yellow);
    }

    #[test]
    fn selector_tie_break_scenario() {
        let mut s = human_first(Scripted::fixed(vec![-1, 2, 5, S, 5, 0, -3]));
        assert!(s.apply_human_move(3));
        assert_eq!(s.board().get(0, 2), Cell::Yellow);
        assert_eq!(s.board().get(0, 4), Cell::Empty);
        assert_eq!(s.position().history(), &[3, 2]);
    }

    #[test]
    fn illegal_human_moves_change_nothing() {
        let mut s = human_first(Scripted::game(&[0, 0, 0, 0, 0, 0, 1, 1]));
        for _ in 0..3 {
            assert!(s.apply_human_move(0));
        }
        assert!(!s.is_column_legal(0));
        let before = s.position().clone();

        assert!(!s.apply_human_move(0));
        assert!(!s.apply_human_move(7));
        assert!(!s.apply_human_move(usize::MAX));
        assert_eq!(s.position(), &before);
        assert_eq!(s.turn(), Turn::Human);
    }

    #[test]
    fn computer_move_is_ignored_on_human_turn() {
        let mut s = human_first(Scripted::game(&[3, 3]));
        assert!(!s.apply_computer_move());
        assert_eq!(s.position().moves_played(), 0);
    }

    #[test]
    fn empty_vector_skips_computer_move_without_flipping_turn() {
        let mut s = human_first(Scripted::fixed(Vec::new()));
        assert!(s.apply_human_move(3));

        assert!(s.phase().is_in_play());
        assert_eq!(s.turn(), Turn::Computer);
        assert_eq!(s.position().moves_played(), 1);

        // Human input is gated on the turn marker
        assert!(!s.apply_human_move(4));

        // A retry asks the evaluator again rather than reusing the empty result
        let calls = s.evaluator().calls;
        assert!(!s.apply_computer_move());
        assert_eq!(s.evaluator().calls, calls + 1);
        assert!(s.phase().is_in_play());
    }

    #[test]
    fn wrong_length_vector_aborts() {
        let mut s = human_first(Scripted::fixed(vec![1, 2, 3]));
        assert!(s.apply_human_move(3));
        assert_eq!(
            s.phase(),
            &Phase::Aborted(SessionFault::Selection(SelectionError::LengthMismatch {
                expected: 7,
                actual: 3
            }))
        );
        assert_eq!(s.position().moves_played(), 1);
        assert!(!s.apply_human_move(4));
        assert!(!s.apply_computer_move());
    }

    #[test]
    fn all_sentinel_vector_aborts() {
        let mut s = human_first(Scripted::fixed(vec![S; 7]));
        assert!(s.apply_human_move(3));
        assert_eq!(
            s.phase(),
            &Phase::Aborted(SessionFault::Selection(SelectionError::NoLegalColumn))
        );
    }

    #[test]
    fn choosing_a_full_column_aborts() {
        let mut s = human_first(Scripted::fixed(vec![5, 0, 0, 0, 0, 0, 0]));
        for _ in 0..3 {
            assert!(s.apply_human_move(0));
        }
        assert!(!s.is_column_legal(0));

        assert!(s.apply_human_move(1));
        assert_eq!(
            s.phase(),
            &Phase::Aborted(SessionFault::IllegalChoice { column: 0 })
        );
        assert_eq!(s.position().moves_played(), 7);
    }

    #[test]
    fn three_in_a_row_completed_by_human_wins() {
        let mut s = human_first(Scripted::game(&[0, 0, 1, 1, 2, 2]));
        for col in 0..3 {
            assert!(s.apply_human_move(col));
        }
        assert_eq!(s.turn(), Turn::Human);
        assert!(s.is_column_legal(3));

        assert!(s.apply_human_move(3));
        assert_eq!(s.phase(), &Phase::Terminal(Outcome::HumanWin));
        assert_eq!(s.outcome(), Some(Outcome::HumanWin));
        // The computer did not answer the winning move
        assert_eq!(s.position().moves_played(), 7);
    }

    #[test]
    fn moves_are_ignored_after_game_over() {
        let mut s = human_first(Scripted::game(&[0, 0, 1, 1, 2, 2]));
        for col in 0..4 {
            s.apply_human_move(col);
        }
        let before = s.position().clone();
        assert!(!s.apply_human_move(5));
        assert!(!s.apply_computer_move());
        assert_eq!(s.position(), &before);
    }

    #[test]
    fn full_board_without_line_is_a_tie() {
        let mut s = human_first(Scripted::game(&DRAW_GAME));
        play_out(&mut s, &DRAW_GAME);
        assert!(s.position().is_full());
        assert_eq!(s.phase(), &Phase::Terminal(Outcome::Tie));
    }

    #[test]
    fn winning_move_that_fills_the_board_is_a_win() {
        let mut s = human_first(Scripted::game(&LAST_MOVE_WINS));
        play_out(&mut s, &LAST_MOVE_WINS);
        assert!(s.position().is_full());
        assert_eq!(s.phase(), &Phase::Terminal(Outcome::ComputerWin));
    }

    #[test]
    fn live_evaluation_reuses_vector_for_decision() {
        let mut s = human_first(Scripted::game(&[3, 3, 2, 2]));
        assert!(s.apply_human_move(3));
        // One call for the computer's position, one for the human's display
        assert_eq!(s.evaluator().calls, 2);
        let shown = s.current_evaluation().unwrap();
        assert_eq!(shown.ply, 2);
        assert_eq!(shown.scores.len(), 7);
        assert_eq!(shown.score, Some(10));
    }

    #[test]
    fn without_live_evaluation_only_decisions_evaluate() {
        let mut s = quiet_session(Scripted::game(&[3, 3, 2, 2]));
        assert!(s.choose_first_player(Turn::Human));
        assert!(s.apply_human_move(3));
        assert_eq!(s.evaluator().calls, 1);
        assert!(s.current_evaluation().is_none());
        assert_eq!(s.evaluation().map(|e| e.ply), Some(1));
    }

    #[test]
    fn random_play_keeps_gravity_and_gates_input() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        struct Noise(StdRng);

        impl Evaluator for Noise {
            fn score_columns(&mut self, position: &Position) -> Vec<i32> {
                (0..Position::WIDTH)
                    .map(|col| {
                        if position.can_play(col) {
                            self.0.random_range(-3..=3)
                        } else {
                            S
                        }
                    })
                    .collect()
            }

            fn name(&self) -> &str {
                "Noise"
            }
        }

        let mut rng = StdRng::seed_from_u64(42);
        for game in 0..50 {
            let mut s = Session::new(Noise(StdRng::seed_from_u64(game)), SessionConfig::default());
            s.choose_first_player(if game % 2 == 0 { Turn::Human } else { Turn::Computer });

            while s.phase().is_in_play() {
                assert_eq!(s.turn(), Turn::Human);
                let col = rng.random_range(0..Position::WIDTH + 2);
                let legal = s.is_column_legal(col);
                let before = s.position().moves_played();
                assert_eq!(s.apply_human_move(col), legal);
                if !legal {
                    assert_eq!(s.position().moves_played(), before);
                }
                assert_gravity(s.board());
            }

            assert!(s.outcome().is_some());
            let before = s.position().clone();
            for col in 0..Position::WIDTH {
                assert!(!s.apply_human_move(col));
            }
            assert!(!s.apply_computer_move());
            assert_eq!(s.position(), &before);
        }
    }
}
