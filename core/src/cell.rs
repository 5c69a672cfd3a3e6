use serde::{Deserialize, Serialize};

/// One grid position, owned by the [`Board`](crate::Board).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub revealed: bool,
    pub is_mine: bool,
    pub adjacent_mine_count: u8,
    pub flagged: bool,
}

impl Cell {
    pub const fn hidden(is_mine: bool, adjacent_mine_count: u8) -> Self {
        Self {
            revealed: false,
            is_mine,
            adjacent_mine_count,
            flagged: false,
        }
    }

    pub const fn is_unrevealed(self) -> bool {
        !self.revealed
    }

    /// Single-character form used by the text board.
    pub const fn symbol(self) -> char {
        match (self.revealed, self.is_mine) {
            (false, _) => '*',
            (true, true) => 'x',
            (true, false) => match char::from_digit(self.adjacent_mine_count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
        }
    }
}
