use crate::ai::{Evaluator, INVALID_MOVE};
use crate::game::Player;
use crate::session::{Outcome, Phase, Session, Turn};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::board_widget;
use super::input::Screen;
use super::layout::ScreenLayout;
use super::popup;

/// Everything the view needs besides the session itself.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub screen: Screen,
    pub cursor: usize,
    pub menu_human_first: bool,
}

pub fn render<E: Evaluator>(
    frame: &mut Frame,
    session: &Session<E>,
    view: &ViewState,
    layout: &ScreenLayout,
) {
    render_header(frame, session, layout.header);

    let cursor = (view.screen == Screen::Board
        && session.phase().is_in_play()
        && session.turn() == Turn::Human)
        .then_some(view.cursor);
    board_widget::render_board(
        frame,
        session.board(),
        cursor,
        session.position().last_cell(),
        layout.board,
    );

    render_evaluation(frame, session, layout.evaluation);
    render_controls(frame, view.screen, layout.controls);

    match view.screen {
        Screen::FirstPlayerMenu => popup::render_menu(frame, layout, view.menu_human_first),
        Screen::GameOver => {
            if let Some(outcome) = session.outcome() {
                popup::render_game_over(frame, layout, outcome);
            }
        }
        Screen::Aborted => {
            if let Phase::Aborted(fault) = session.phase() {
                popup::render_abort(frame, layout, &fault.to_string());
            }
        }
        Screen::Board => {}
    }
}

pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::HumanWin => "You Win!",
        Outcome::ComputerWin => "AI Wins!",
        Outcome::Tie => "Game Tied!",
    }
}

/// Status bar text for the current phase and turn.
pub fn status_line<E: Evaluator>(session: &Session<E>) -> String {
    let score = session.current_evaluation().and_then(|e| e.score);
    match session.phase() {
        Phase::AwaitingFirstPlayerChoice => "Choose who moves first".to_string(),
        Phase::InPlay => match (session.turn(), score) {
            (Turn::Human, Some(score)) => format!("Your turn (Eval: {score})"),
            (Turn::Human, None) => "Your Turn".to_string(),
            (Turn::Computer, Some(score)) => format!("AI's Turn (Evaluation: {score})"),
            (Turn::Computer, None) => "AI's Turn".to_string(),
        },
        Phase::Terminal(outcome) | Phase::AwaitingReplay(outcome) => {
            outcome_message(*outcome).to_string()
        }
        Phase::Aborted(_) => "Session aborted".to_string(),
    }
}

fn player_color(player: Player) -> Color {
    match player {
        Player::Red => Color::Red,
        Player::Yellow => Color::Yellow,
    }
}

fn render_header<E: Evaluator>(frame: &mut Frame, session: &Session<E>, area: Rect) {
    let color = match (session.phase(), session.turn()) {
        (Phase::InPlay, Turn::Human) => player_color(session.human_disc()),
        (Phase::InPlay, Turn::Computer) => player_color(session.computer_disc()),
        (Phase::Aborted(_), _) => Color::LightRed,
        _ => Color::White,
    };

    let line = Line::from(vec![
        Span::styled(
            status_line(session),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  |  You: {}  |  Game {}",
            session.human_disc(),
            session.games_started().max(1)
        )),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connect Four"),
        );

    frame.render_widget(header, area);
}

/// Per-column scores of the position on the board, `-` for full columns.
pub fn evaluation_line<E: Evaluator>(session: &Session<E>) -> String {
    match session.current_evaluation() {
        Some(eval) if !eval.scores.is_empty() => eval
            .scores
            .iter()
            .enumerate()
            .map(|(col, &score)| {
                if score == INVALID_MOVE {
                    format!("{}: -", col + 1)
                } else {
                    format!("{}: {score}", col + 1)
                }
            })
            .collect::<Vec<_>>()
            .join("  "),
        _ => String::new(),
    }
}

fn render_evaluation<E: Evaluator>(frame: &mut Frame, session: &Session<E>, area: Rect) {
    let widget = Paragraph::new(evaluation_line(session))
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Column scores ({})", session.evaluator().name())),
        );

    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, screen: Screen, area: Rect) {
    let text = match screen {
        Screen::FirstPlayerMenu => {
            "←/→: Select  |  Enter: Start  |  Y/C: You/Computer first  |  Q: Quit"
        }
        Screen::Board => "←/→: Move  |  Enter: Drop  |  1-7: Drop in column  |  Q: Quit",
        Screen::GameOver => "Enter/R: Replay  |  Q: Quit",
        Screen::Aborted => "Any key: Exit",
    };

    let controls = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Controls"),
        );

    frame.render_widget(controls, area);
}
