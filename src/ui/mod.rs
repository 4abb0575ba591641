//! Terminal UI: first-player menu, the board with live column scores, and
//! the game-over and abort popups.

mod app;
pub mod board_widget;
mod game_view;
pub mod input;
pub mod layout;
mod popup;

pub use app::{App, Exit, UiConfig};
