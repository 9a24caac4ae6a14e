use thiserror::Error;

/// Reasons a move is rejected. A rejected move never changes the game.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Game is over! Start a new game!")]
    GameOver,

    #[error("Invalid move, column {} full", .column + 1)]
    ColumnFull { column: usize },

    #[error("Invalid move, column {} out of range. Columns must be between 1 and {width}", .column + 1)]
    InvalidColumn { column: usize, width: usize },
}

impl MoveError {
    /// Rejections the front end should swallow without telling the user.
    /// Clicking a full column does nothing.
    pub fn is_silent(&self) -> bool {
        matches!(self, MoveError::ColumnFull { .. })
    }
}

#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board dimensions {height}x{width}, both must be non-zero")]
    InvalidDimensions { height: usize, width: usize },

    #[error("board dimensions {height}x{width} are too large, at most {} cells with sides up to {} are allowed", crate::board::MAX_CELLS, u16::MAX)]
    TooLarge { height: usize, width: usize },
}
