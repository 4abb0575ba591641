//! Translation of raw terminal events into front-end actions.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::game::COLS;

use super::layout::{contains, ScreenLayout};

/// What the front end is currently showing; decides how input is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    FirstPlayerMenu,
    Board,
    GameOver,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CursorLeft,
    CursorRight,
    Hover(usize),
    Drop,
    DropAt(usize),
    MenuToggle,
    MenuConfirm,
    ChooseFirst { human_first: bool },
    Replay,
}

pub fn map_event(event: &Event, screen: Screen, layout: &ScreenLayout) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(*key, screen),
        Event::Mouse(mouse) => map_mouse(*mouse, screen, layout),
        _ => None,
    }
}

/// Map keyboard input for the current screen.
pub fn map_key(key: KeyEvent, screen: Screen) -> Option<Action> {
    if should_quit(key) {
        return Some(Action::Quit);
    }

    match screen {
        Screen::FirstPlayerMenu => match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                Some(Action::MenuToggle)
            }
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::MenuConfirm),
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('h') | KeyCode::Char('H') => {
                Some(Action::ChooseFirst { human_first: true })
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                Some(Action::ChooseFirst { human_first: false })
            }
            _ => None,
        },
        Screen::Board => match key.code {
            KeyCode::Left => Some(Action::CursorLeft),
            KeyCode::Right => Some(Action::CursorRight),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => Some(Action::Drop),
            KeyCode::Char(c) => c
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|&d| (1..=COLS).contains(&d))
                .map(|d| Action::DropAt(d - 1)),
            _ => None,
        },
        Screen::GameOver => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') | KeyCode::Char('R') => {
                Some(Action::Replay)
            }
            _ => None,
        },
        // Any key leaves once a fatal error is on screen
        Screen::Aborted => Some(Action::Quit),
    }
}

/// Map mouse input for the current screen using the last drawn layout.
pub fn map_mouse(mouse: MouseEvent, screen: Screen, layout: &ScreenLayout) -> Option<Action> {
    let (x, y) = (mouse.column, mouse.row);
    let clicked = mouse.kind == MouseEventKind::Down(MouseButton::Left);

    match screen {
        Screen::FirstPlayerMenu if clicked => {
            let [you, computer] = layout.menu_buttons();
            if contains(you, x, y) {
                Some(Action::ChooseFirst { human_first: true })
            } else if contains(computer, x, y) {
                Some(Action::ChooseFirst { human_first: false })
            } else {
                None
            }
        }
        Screen::Board => {
            let col = layout.column_at(x, y)?;
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Action::DropAt(col)),
                MouseEventKind::Moved => Some(Action::Hover(col)),
                _ => None,
            }
        }
        Screen::GameOver if clicked && contains(layout.replay_button(), x, y) => {
            Some(Action::Replay)
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
