use super::board::{Board, Cell, DropError, COLS, ROWS};
use super::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    ColumnFull,
    InvalidColumn,
    GameOver,
}

impl From<DropError> for MoveError {
    fn from(e: DropError) -> Self {
        match e {
            DropError::ColumnFull => MoveError::ColumnFull,
            DropError::InvalidColumn => MoveError::InvalidColumn,
        }
    }
}

/// A board plus whose turn it is and how it got there.
///
/// `Position` knows nothing about humans or computers; it only alternates
/// Red and Yellow. Replacing a game means constructing a fresh `Position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Player,
    history: Vec<usize>,
    last_cell: Option<(usize, usize)>,
}

impl Position {
    pub const WIDTH: usize = COLS;
    pub const HEIGHT: usize = ROWS;

    /// Empty board, Red to move
    pub fn new() -> Self {
        Position {
            board: Board::new(),
            side_to_move: Player::FIRST,
            history: Vec::with_capacity(COLS * ROWS),
            last_cell: None,
        }
    }

    /// Replay a sequence of 0-based columns from the empty board.
    ///
    /// Stops with `GameOver` if a move follows a completed line.
    pub fn from_moves(moves: &[usize]) -> Result<Self, MoveError> {
        let mut position = Position::new();
        for &col in moves {
            if position.has_winning_line_for_last_mover() {
                return Err(MoveError::GameOver);
            }
            position.play_column(col)?;
        }
        Ok(position)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// The player who made the most recent move
    pub fn last_mover(&self) -> Option<Player> {
        self.last_cell.map(|_| self.side_to_move.other())
    }

    /// (row, col) of the most recent disc
    pub fn last_cell(&self) -> Option<(usize, usize)> {
        self.last_cell
    }

    /// Columns played so far, oldest first
    pub fn history(&self) -> &[usize] {
        &self.history
    }

    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// True iff `col` is on the board and its top cell is empty
    pub fn can_play(&self, col: usize) -> bool {
        !self.board.is_column_full(col)
    }

    pub fn legal_columns(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| self.can_play(col)).collect()
    }

    pub fn cell_owner(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn is_full(&self) -> bool {
        self.board.is_full()
    }

    /// Drop a disc for the side to move. Returns the landing row.
    pub fn play_column(&mut self, col: usize) -> Result<usize, MoveError> {
        let row = self.board.drop_piece(col, self.side_to_move.to_cell())?;
        self.history.push(col);
        self.last_cell = Some((row, col));
        self.side_to_move = self.side_to_move.other();
        Ok(row)
    }

    /// Copy of this position with `col` played, for search
    pub fn with_move(&self, col: usize) -> Result<Position, MoveError> {
        let mut next = self.clone();
        next.play_column(col)?;
        Ok(next)
    }

    pub fn has_winning_line_for_last_mover(&self) -> bool {
        match self.last_cell {
            Some((row, col)) => self.board.check_win(row, col),
            None => false,
        }
    }

    /// History as a string of column digits, e.g. `"3324"`
    pub fn history_key(&self) -> String {
        self.history
            .iter()
            .map(|&col| char::from(b'0' + col as u8))
            .collect()
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}
