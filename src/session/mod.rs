//! Human-vs-computer game orchestration: turn control, computer move
//! selection, and the first-player / game-over / replay lifecycle.
//!
//! Everything here is synchronous. The evaluator is called on the caller's
//! thread and at most once per position; its result is cached with the ply it
//! was computed for so it is never applied to a board that has moved on.

mod controller;
mod lifecycle;
mod phase;
mod selector;

pub use controller::{Evaluation, Session};
pub use phase::{Command, Outcome, Phase, Turn};
pub use selector::select_column;

/// Session behaviour settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Re-evaluate after every move so the front end can show live scores.
    pub live_evaluation: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            live_evaluation: true,
        }
    }
}
