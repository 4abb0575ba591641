use crate::error::SessionFault;

/// Whose move the session is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Human,
    Computer,
}

impl Turn {
    pub fn other(self) -> Turn {
        match self {
            Turn::Human => Turn::Computer,
            Turn::Computer => Turn::Human,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HumanWin,
    ComputerWin,
    Tie,
}

impl Outcome {
    /// Outcome when `mover` has just completed a line
    pub fn win_for(mover: Turn) -> Outcome {
        match mover {
            Turn::Human => Outcome::HumanWin,
            Turn::Computer => Outcome::ComputerWin,
        }
    }
}

/// Session lifecycle.
///
/// ```text
/// AwaitingFirstPlayerChoice -> InPlay -> Terminal -> AwaitingReplay -+
///          ^                                                          |
///          +----------------------------------------------------------+
/// ```
///
/// `Aborted` is reachable from `InPlay` only, when the evaluator breaks its
/// contract, and is final.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirstPlayerChoice,
    InPlay,
    Terminal(Outcome),
    AwaitingReplay(Outcome),
    Aborted(SessionFault),
}

impl Phase {
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Terminal(outcome) | Phase::AwaitingReplay(outcome) => Some(*outcome),
            _ => None,
        }
    }

    pub fn is_in_play(&self) -> bool {
        matches!(self, Phase::InPlay)
    }

    /// Short label for logs and the status bar
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingFirstPlayerChoice => "choosing first player",
            Phase::InPlay => "in play",
            Phase::Terminal(_) => "game over",
            Phase::AwaitingReplay(_) => "awaiting replay",
            Phase::Aborted(_) => "aborted",
        }
    }
}

/// Discrete input from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ColumnClicked(usize),
    FirstPlayerChosen { human_first: bool },
    ReplayRequested,
}
