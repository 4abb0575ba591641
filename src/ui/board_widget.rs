use crate::game::{Board, Cell, COLS, ROWS};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Board lines, top row first: column numbers, framed grid, cursor marker.
///
/// `cursor` is `None` when no column can be picked (menus, game over).
pub fn board_lines(
    board: &Board,
    cursor: Option<usize>,
    last_cell: Option<(usize, usize)>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(ROWS + 4);

    // Column numbers with selection indicator
    let mut col_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        let label = format!(" {} ", col + 1);
        if Some(col) == cursor {
            col_line.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        } else {
            col_line.push(Span::raw(label));
        }
    }
    lines.push(Line::from(col_line));

    lines.push(Line::from(format!("  ╔{}╗", "═".repeat(COLS * 3 + 1))));

    // Row 0 is the bottom of the board, so draw from the top row down
    for row in (0..ROWS).rev() {
        let mut row_spans = vec![Span::raw("  ║")];
        for col in 0..COLS {
            let (symbol, color) = match board.get(row, col) {
                Cell::Empty => (" . ", Color::DarkGray),
                Cell::Red => (" ● ", Color::Red),
                Cell::Yellow => (" ● ", Color::Yellow),
            };
            let mut style = Style::default().fg(color);
            if last_cell == Some((row, col)) {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            row_spans.push(Span::styled(symbol, style));
        }
        row_spans.push(Span::raw(" ║"));
        lines.push(Line::from(row_spans));
    }

    lines.push(Line::from(format!("  ╚{}╝", "═".repeat(COLS * 3 + 1))));

    let mut indicator_line = vec![Span::raw("   ")];
    for col in 0..COLS {
        if Some(col) == cursor {
            indicator_line.push(Span::styled(" ▲ ", Style::default().fg(Color::Cyan)));
        } else {
            indicator_line.push(Span::raw("   "));
        }
    }
    lines.push(Line::from(indicator_line));

    lines
}

/// Render the board into `area` (see [`super::layout::ScreenLayout::board`]).
pub fn render_board(
    frame: &mut Frame,
    board: &Board,
    cursor: Option<usize>,
    last_cell: Option<(usize, usize)>,
    area: Rect,
) {
    let widget = Paragraph::new(board_lines(board, cursor, last_cell));
    frame.render_widget(widget, area);
}
