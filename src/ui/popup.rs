use ratatui::{
    layout::{Alignment, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::session::Outcome;

use super::game_view::outcome_message;
use super::layout::ScreenLayout;

fn frame_popup(frame: &mut Frame, area: Rect, title: &str, color: Color) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(block, area);
}

fn headline(frame: &mut Frame, popup: Rect, text: &str, color: Color) {
    let line = Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ));
    let area = Rect::new(popup.x, popup.y + 2, popup.width, 1).intersection(popup);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn button(frame: &mut Frame, area: Rect, label: &str, selected: bool) {
    let style = if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let widget = Paragraph::new(label.to_string())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));
    frame.render_widget(widget, area);
}

/// First-player menu with "You" and "Computer" buttons.
pub fn render_menu(frame: &mut Frame, layout: &ScreenLayout, human_first: bool) {
    frame_popup(frame, layout.popup, "New Game", Color::Cyan);
    headline(frame, layout.popup, "Who moves first?", Color::White);

    let [you, computer] = layout.menu_buttons();
    button(frame, you, "You", human_first);
    button(frame, computer, "Computer", !human_first);
}

pub fn render_game_over(frame: &mut Frame, layout: &ScreenLayout, outcome: Outcome) {
    let color = match outcome {
        Outcome::HumanWin => Color::Green,
        Outcome::ComputerWin => Color::Red,
        Outcome::Tie => Color::Yellow,
    };
    frame_popup(frame, layout.popup, "Game Over", color);
    headline(frame, layout.popup, outcome_message(outcome), color);
    button(frame, layout.replay_button(), "Replay", true);
}

/// Fatal fault screen; the session cannot continue.
pub fn render_abort(frame: &mut Frame, layout: &ScreenLayout, fault: &str) {
    frame_popup(frame, layout.popup, "Session aborted", Color::LightRed);

    let text = Text::from(vec![
        Line::from(Span::styled(
            fault.to_string(),
            Style::default().fg(Color::LightRed),
        )),
        Line::from(""),
        Line::from("Press any key to exit"),
    ]);
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        layout.popup.inner(Margin::new(2, 1)),
    );
}
