use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::{backend::Backend, Frame, Terminal};
use tracing::{debug, info};

use crate::ai::Evaluator;
use crate::error::SessionFault;
use crate::game::COLS;
use crate::session::{Command, Phase, Session, Turn};

use super::game_view::{self, ViewState};
use super::input::{self, Action, Screen};
use super::layout::ScreenLayout;

/// Front-end timing and input settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Input poll timeout, which is also the redraw interval.
    pub frame_ms: u64,
    /// How long the final board stays up before the game-over popup.
    pub outcome_delay_ms: u64,
    /// Capture the mouse so columns and buttons can be clicked.
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            frame_ms: 100,
            outcome_delay_ms: 200,
            mouse: true,
        }
    }
}

/// Why [`App::run`] returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exit {
    Quit,
    Aborted(SessionFault),
}

pub struct App<E: Evaluator> {
    session: Session<E>,
    config: UiConfig,
    cursor: usize,
    menu_human_first: bool,
    should_quit: bool,
    terminal_since: Option<Instant>,
    layout: ScreenLayout,
}

impl<E: Evaluator> App<E> {
    pub fn new(session: Session<E>, config: UiConfig) -> Self {
        App {
            session,
            config,
            cursor: COLS / 2, // Start in middle
            menu_human_first: true,
            should_quit: false,
            terminal_since: None,
            layout: ScreenLayout::default(),
        }
    }

    pub fn session(&self) -> &Session<E> {
        &self.session
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Screen implied by the session phase. A finished game keeps showing
    /// the board until it has settled.
    pub fn screen(&self) -> Screen {
        match self.session.phase() {
            Phase::AwaitingFirstPlayerChoice => Screen::FirstPlayerMenu,
            Phase::InPlay | Phase::Terminal(_) => Screen::Board,
            Phase::AwaitingReplay(_) => Screen::GameOver,
            Phase::Aborted(_) => Screen::Aborted,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<Exit>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal
                .draw(|f| self.draw(f))
                .map_err(Into::<io::Error>::into)?;

            if self.should_quit {
                break;
            }

            self.tick(Instant::now());
            self.handle_events()?;
        }

        Ok(match self.session.phase() {
            Phase::Aborted(fault) => Exit::Aborted(fault.clone()),
            _ => Exit::Quit,
        })
    }

    /// Render one frame and remember its layout for mouse hit-testing.
    pub fn draw(&mut self, frame: &mut Frame) {
        self.layout = ScreenLayout::new(frame.area());
        let view = ViewState {
            screen: self.screen(),
            cursor: self.cursor,
            menu_human_first: self.menu_human_first,
        };
        game_view::render(frame, &self.session, &view, &self.layout);
    }

    /// Per-frame housekeeping. Retries a computer move the evaluator
    /// skipped, and settles a finished game once its final board has been on
    /// screen for `outcome_delay_ms`.
    pub fn tick(&mut self, now: Instant) {
        match self.session.phase() {
            Phase::InPlay => {
                self.terminal_since = None;
                if self.session.turn() == Turn::Computer {
                    self.session.apply_computer_move();
                }
            }
            Phase::Terminal(_) => {
                let since = *self.terminal_since.get_or_insert(now);
                let delay = Duration::from_millis(self.config.outcome_delay_ms);
                if now.saturating_duration_since(since) >= delay {
                    self.session.settle();
                    self.terminal_since = None;
                }
            }
            _ => self.terminal_since = None,
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(self.config.frame_ms))? {
            let event = event::read()?;
            if let Some(action) = input::map_event(&event, self.screen(), &self.layout) {
                self.apply(action);
            }
        }
        Ok(())
    }

    pub fn apply(&mut self, action: Action) {
        debug!(?action, screen = ?self.screen(), "ui action");
        match action {
            Action::Quit => {
                info!(games = self.session.games_started(), "quit requested");
                self.should_quit = true;
            }
            Action::CursorLeft => self.cursor = self.cursor.saturating_sub(1),
            Action::CursorRight => self.cursor = (self.cursor + 1).min(COLS - 1),
            Action::Hover(col) => self.cursor = col.min(COLS - 1),
            Action::Drop => {
                self.session.handle(Command::ColumnClicked(self.cursor));
            }
            Action::DropAt(col) => {
                self.cursor = col.min(COLS - 1);
                self.session.handle(Command::ColumnClicked(col));
            }
            Action::MenuToggle => self.menu_human_first = !self.menu_human_first,
            Action::MenuConfirm => {
                self.session.handle(Command::FirstPlayerChosen {
                    human_first: self.menu_human_first,
                });
            }
            Action::ChooseFirst { human_first } => {
                self.menu_human_first = human_first;
                self.session.handle(Command::FirstPlayerChosen { human_first });
            }
            Action::Replay => {
                self.session.handle(Command::ReplayRequested);
            }
        }
    }
}
