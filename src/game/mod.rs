//! Core Connect Four game logic: gravity board, disc colours, and positions
//! that track whose turn it is and detect a completed line.

mod board;
mod player;
mod position;

pub use board::{Board, Cell, DropError, COLS, ROWS};
pub use player::Player;
pub use position::{MoveError, Position};
