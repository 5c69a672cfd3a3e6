use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board size and mine count.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub dimension: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    pub const fn new_unchecked(dimension: Coord, mines: CellCount) -> Self {
        Self { dimension, mines }
    }

    pub fn new(dimension: Coord, mines: CellCount) -> Result<Self> {
        if !(1..=MAX_DIMENSION).contains(&dimension) {
            return Err(GameError::InvalidDimension);
        }
        if mines > square(dimension) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(dimension, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        square(self.dimension)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    pub const fn config(self) -> BoardConfig {
        match self {
            Self::Easy => BoardConfig::new_unchecked(9, 10),
            Self::Medium => BoardConfig::new_unchecked(16, 40),
            Self::Hard => BoardConfig::new_unchecked(30, 116),
        }
    }

    pub const fn dimension(self) -> Coord {
        self.config().dimension
    }

    pub const fn mines(self) -> CellCount {
        self.config().mines
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl From<Difficulty> for BoardConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Numeric game modes, `0` is easy up to `2` for hard.
impl TryFrom<u8> for Difficulty {
    type Error = GameError;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(Self::Easy),
            1 => Ok(Self::Medium),
            2 => Ok(Self::Hard),
            _ => Err(GameError::InvalidDifficulty),
        }
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::InvalidDifficulty)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
