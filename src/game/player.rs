use std::fmt;

use super::board::Cell;

/// Disc colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// Colour that opens every game.
    pub const FIRST: Player = Player::Red;

    pub fn other(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::Red => Cell::Red,
            Player::Yellow => Cell::Yellow,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Player::Red => "Red",
            Player::Yellow => "Yellow",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_opens_and_colours_alternate() {
        assert_eq!(Player::FIRST, Player::Red);
        assert_eq!(Player::FIRST.other(), Player::Yellow);
        assert_eq!(Player::FIRST.other().other(), Player::FIRST);
    }

    #[test]
    fn test_to_cell() {
        assert_eq!(Player::Red.to_cell(), Cell::Red);
        assert_eq!(Player::Yellow.to_cell(), Cell::Yellow);
    }

    #[test]
    fn test_display() {
        assert_eq!(Player::Red.to_string(), "Red");
        assert_eq!(format!("{}", Player::Yellow), "Yellow");
    }
}
