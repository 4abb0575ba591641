use tracing::{debug, info};

use crate::ai::Evaluator;
use crate::game::{Player, Position};

use super::controller::Session;
use super::phase::{Command, Phase, Turn};

impl<E: Evaluator> Session<E> {
    /// Start a game on a fresh board. Only valid while waiting for the
    /// choice; if the computer starts, its first disc is already down when
    /// this returns.
    pub fn choose_first_player(&mut self, first: Turn) -> bool {
        if self.phase != Phase::AwaitingFirstPlayerChoice {
            debug!(phase = self.phase.name(), "ignored first player choice");
            return false;
        }

        self.position = Position::new();
        self.evaluation = None;
        self.turn = first;
        self.human_disc = match first {
            Turn::Human => Player::FIRST,
            Turn::Computer => Player::FIRST.other(),
        };
        self.phase = Phase::InPlay;
        self.games_started += 1;
        info!(
            game = self.games_started,
            ?first,
            human = %self.human_disc,
            evaluator = self.evaluator.name(),
            "game started"
        );

        if first == Turn::Computer {
            self.apply_computer_move();
        }
        true
    }

    /// Move a finished game on to waiting for replay, once the front end has
    /// shown the final board.
    pub fn settle(&mut self) -> bool {
        match self.phase {
            Phase::Terminal(outcome) => {
                self.phase = Phase::AwaitingReplay(outcome);
                true
            }
            _ => false,
        }
    }

    /// Discard the finished game and go back to the first player choice.
    pub fn request_replay(&mut self) -> bool {
        let Phase::AwaitingReplay(outcome) = self.phase else {
            debug!(phase = self.phase.name(), "ignored replay request");
            return false;
        };

        info!(?outcome, game = self.games_started, "replay requested");
        self.position = Position::new();
        self.evaluation = None;
        self.turn = Turn::Human;
        self.phase = Phase::AwaitingFirstPlayerChoice;
        true
    }

    /// Route a presentation-layer command. Returns whether anything changed.
    pub fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::ColumnClicked(column) => self.apply_human_move(column),
            Command::FirstPlayerChosen { human_first } => {
                let first = if human_first { Turn::Human } else { Turn::Computer };
                self.choose_first_player(first)
            }
            Command::ReplayRequested => self.request_replay(),
        }
    }

    /// Games started over the lifetime of this session.
    pub fn games_started(&self) -> u64 {
        self.games_started
    }
}
