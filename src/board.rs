use std::fmt;
use thiserror::Error;

use crate::piece::{Archetype, Piece};

/// Board size constants
pub const BOARD_SIZE: usize = 7;
pub const DEFAULT_COLUMNS: [char; BOARD_SIZE] = ['a', 'b', 'c', 'd', 'e', 'f', 'g'];
pub const DEFAULT_BACK_RANK: [Archetype; BOARD_SIZE] = [
    Archetype::Chinchilla,
    Archetype::Wombat,
    Archetype::Emu,
    Archetype::Cuttlefish,
    Archetype::Emu,
    Archetype::Wombat,
    Archetype::Chinchilla,
];

/// A square on the 7x7 board. Column and row are zero-based, row 0 is rank "1".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    col: usize,
    row: usize,
}

impl Square {
    /// Returns `None` when either index falls off the board.
    pub fn new(col: usize, row: usize) -> Option<Self> {
        (col < BOARD_SIZE && row < BOARD_SIZE).then_some(Square { col, row })
    }

    pub(crate) fn new_unchecked(col: usize, row: usize) -> Self {
        debug_assert!(col < BOARD_SIZE && row < BOARD_SIZE);
        Square { col, row }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    /// Signed (column, row) delta from `self` to `to`.
    pub fn delta(&self, to: Square) -> (i32, i32) {
        (
            to.col as i32 - self.col as i32,
            to.row as i32 - self.row as i32,
        )
    }

    pub fn offset(&self, dc: i32, dr: i32) -> Option<Square> {
        let c = self.col as i32 + dc;
        let r = self.row as i32 + dr;
        if c < 0 || r < 0 {
            return None;
        }
        Square::new(c as usize, r as usize)
    }

    /// Squares strictly between `self` and `to`, walked in unit steps.
    ///
    /// Empty when the two squares are adjacent, identical, or not on a shared
    /// rank, file or diagonal.
    pub fn between(&self, to: Square) -> Vec<Square> {
        let (dc, dr) = self.delta(to);
        if !(dc == 0 || dr == 0 || dc.abs() == dr.abs()) {
            return Vec::new();
        }

        let step_c = dc.signum();
        let step_r = dr.signum();
        let mut squares = Vec::new();
        let mut current = *self;

        while let Some(next) = current.offset(step_c, step_r) {
            if next == to {
                break;
            }
            squares.push(next);
            current = next;
        }

        squares
    }

    /// Every square, rank 1 first, columns left to right.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE).map(move |col| Square::new_unchecked(col, row)))
    }
}

impl fmt::Display for Square {
    /// Uses the default column letters; see [`GameConfig::format_square`] for
    /// a configured board.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DEFAULT_COLUMNS[self.col], self.row + 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("expected a column letter and a rank digit, got {0:?}")]
    WrongLength(String),
    #[error("unknown column {0:?}")]
    UnknownColumn(char),
    #[error("rank {0:?} is off the board")]
    RankOutOfRange(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("column letter {0:?} used more than once")]
    DuplicateColumn(char),
    #[error("column label {0:?} must be an ASCII letter")]
    InvalidColumn(char),
    #[error("back rank needs exactly one royal piece, found {0}")]
    RoyalCount(usize),
}

/// Fixed layout shared by every game built from it: column labels and the
/// back-rank archetype order used for both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub columns: [char; BOARD_SIZE],
    pub back_rank: [Archetype; BOARD_SIZE],
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            columns: DEFAULT_COLUMNS,
            back_rank: DEFAULT_BACK_RANK,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, &c) in self.columns.iter().enumerate() {
            if !c.is_ascii_alphabetic() {
                return Err(ConfigError::InvalidColumn(c));
            }
            if self.columns[..i].contains(&c) {
                return Err(ConfigError::DuplicateColumn(c));
            }
        }

        let royals = self.back_rank.iter().filter(|a| a.is_royal()).count();
        if royals != 1 {
            return Err(ConfigError::RoyalCount(royals));
        }

        Ok(())
    }

    /// Parse a coordinate such as `"a1"`.
    pub fn parse_square(&self, text: &str) -> Result<Square, CoordinateError> {
        let mut chars = text.chars();
        let (Some(col_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(CoordinateError::WrongLength(text.to_string()));
        };

        let col = self
            .columns
            .iter()
            .position(|&c| c == col_char)
            .ok_or(CoordinateError::UnknownColumn(col_char))?;

        let row = rank_char
            .to_digit(10)
            .and_then(|d| (d as usize).checked_sub(1))
            .filter(|&r| r < BOARD_SIZE)
            .ok_or(CoordinateError::RankOutOfRange(rank_char))?;

        Ok(Square::new_unchecked(col, row))
    }

    pub fn format_square(&self, square: Square) -> String {
        format!("{}{}", self.columns[square.col()], square.row() + 1)
    }
}

/// Board contents, one `Option<Piece>` per square; `None` is the only empty marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row()][square.col()]
    }

    /// Store `piece` (or clear the square) and return the previous occupant.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.cells[square.row()][square.col()], piece)
    }

    pub fn is_occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}
