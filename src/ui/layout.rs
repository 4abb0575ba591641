use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::game::{COLS, ROWS};

/// Left padding before the first cell on each board line ("  ║").
pub const BOARD_PADDING: u16 = 3;
/// Width of one board cell (" ● ").
pub const CELL_WIDTH: u16 = 3;
/// Column numbers, top border, rows, bottom border, cursor indicator.
pub const BOARD_HEIGHT: u16 = ROWS as u16 + 4;
pub const BOARD_WIDTH: u16 = BOARD_PADDING + CELL_WIDTH * COLS as u16 + 2;

const POPUP_WIDTH: u16 = 40;
const POPUP_HEIGHT: u16 = 9;
const BUTTON_WIDTH: u16 = 14;
const BUTTON_HEIGHT: u16 = 3;

/// Screen regions for one frame. Rendering and mouse hit-testing both use
/// this so a click always maps to what was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub area: Rect,
    pub header: Rect,
    pub board_panel: Rect,
    pub board: Rect,
    pub evaluation: Rect,
    pub controls: Rect,
    pub popup: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),            // Header
                Constraint::Min(BOARD_HEIGHT),    // Board
                Constraint::Length(3),            // Evaluation
                Constraint::Length(3),            // Controls
            ])
            .split(area);

        ScreenLayout {
            area,
            header: chunks[0],
            board_panel: chunks[1],
            board: centered(chunks[1], BOARD_WIDTH, BOARD_HEIGHT),
            evaluation: chunks[2],
            controls: chunks[3],
            popup: centered(area, POPUP_WIDTH, POPUP_HEIGHT),
        }
    }

    /// Board column under the terminal cell (x, y).
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        if !contains(self.board, x, y) {
            return None;
        }
        let first = self.board.x + BOARD_PADDING;
        if x < first {
            return None;
        }
        let col = ((x - first) / CELL_WIDTH) as usize;
        (col < COLS).then_some(col)
    }

    /// "You" and "Computer" buttons of the first-player menu.
    pub fn menu_buttons(&self) -> [Rect; 2] {
        let y = self.popup.y + 4;
        let left = Rect::new(self.popup.x + 4, y, BUTTON_WIDTH, BUTTON_HEIGHT);
        let right = Rect::new(
            (self.popup.x + self.popup.width).saturating_sub(4 + BUTTON_WIDTH),
            y,
            BUTTON_WIDTH,
            BUTTON_HEIGHT,
        );
        [left, right].map(|r| r.intersection(self.area))
    }

    /// Replay button of the game-over popup.
    pub fn replay_button(&self) -> Rect {
        let x = self.popup.x + self.popup.width.saturating_sub(BUTTON_WIDTH) / 2;
        Rect::new(x, self.popup.y + 4, BUTTON_WIDTH, BUTTON_HEIGHT).intersection(self.area)
    }
}

/// `width` x `height` rect centred in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

pub fn contains(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}
