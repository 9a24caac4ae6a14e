use std::fmt;

use crate::error::BoardError;
use crate::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// A fixed size grid of cells
///
/// Rows are indexed from the top, so pieces fall towards row `height - 1`.
/// The dimensions are fixed at creation and a cell, once taken, stays taken
/// for the lifetime of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>, // cells are stored left-to-right, top-to-bottom
}

/// The largest number of cells a board may have
pub const MAX_CELLS: usize = 1 << 24;

/// Checks a board size and returns its number of cells
///
/// Each side must fit a terminal coordinate and the whole grid must stay
/// within [`MAX_CELLS`].
pub fn cell_count(height: usize, width: usize) -> Result<usize, BoardError> {
    if height == 0 || width == 0 {
        return Err(BoardError::InvalidDimensions { height, width });
    }
    let max_side = u16::MAX as usize;
    height
        .checked_mul(width)
        .filter(|&count| height <= max_side && width <= max_side && count <= MAX_CELLS)
        .ok_or(BoardError::TooLarge { height, width })
}

impl Board {
    pub fn new(height: usize, width: usize) -> Result<Self, BoardError> {
        let count = cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            cells: vec![Cell::Empty; count],
        })
    }

    /// An empty board with the same dimensions as this one
    pub fn cleared(&self) -> Self {
        Self {
            height: self.height,
            width: self.width,
            cells: vec![Cell::Empty; self.cells.len()],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the cell at `(y, x)`, or `None` if the coordinates are off the board
    pub fn get(&self, y: usize, x: usize) -> Option<Cell> {
        if y < self.height && x < self.width {
            Some(self.cells[x + self.width * y])
        } else {
            None
        }
    }

    /// Returns the lowest empty row of column `x`, or `None` if the column
    /// is full or does not exist
    pub fn landing_row(&self, x: usize) -> Option<usize> {
        if x >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&y| self.cells[x + self.width * y].is_empty())
    }

    pub fn set(&mut self, y: usize, x: usize, player: Player) {
        let idx = x + self.width * y;
        debug_assert!(
            self.cells[idx].is_empty(),
            "cell ({}, {}) is already taken",
            y,
            x
        );
        self.cells[idx] = player.into();
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Iterates over the rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            height: HEIGHT,
            width: WIDTH,
            cells: vec![Cell::Empty; HEIGHT * WIDTH],
        }
    }
}
