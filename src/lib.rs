//! # Connect Four Duel
//!
//! Human-vs-computer Connect Four in the terminal. The computer picks its
//! column from a per-column score vector produced by a negamax search,
//! optionally backed by a precomputed opening book.
//!
//! ## Modules
//!
//! - [`game`]: Board, discs, gravity and win detection
//! - [`ai`]: Evaluator trait, negamax search, opening book
//! - [`session`]: Turn control, move selection, game lifecycle
//! - [`ui`]: Terminal UI: first-player menu, board, game-over popup
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: File-backed `tracing` subscriber
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod session;
pub mod ui;
