//! The state of a single game: board, turn and result

use crate::{
    board::{Board, Player},
    config::{Rules, WinCheck},
    error::{BoardError, MoveError},
    win::{self, Line},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Tied,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Where an accepted move landed and what it did to the game
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub column: usize,
    pub player: Player,
    pub status: GameStatus,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current: Player,
    status: GameStatus,
    moves: Vec<usize>,
    win_check: WinCheck,
}

impl Game {
    pub fn new(rules: &Rules) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(rules.height(), rules.width())?,
            current: Player::One,
            status: GameStatus::InProgress,
            moves: Vec::new(),
            win_check: rules.win_check(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player to move, or the player who made the last move once the game is over
    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The columns played since the start of the game, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn winning_line(&self) -> Option<Line> {
        match self.status {
            GameStatus::Won(player) => win::find_line(&self.board, player),
            _ => None,
        }
    }

    /// Drops the current player's piece into `column`
    ///
    /// A win is checked before a full board, so a move that both completes a
    /// line and fills the last cell wins the game.
    pub fn play(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if column >= self.board.width() {
            return Err(MoveError::InvalidColumn {
                column,
                width: self.board.width(),
            });
        }
        let row = self
            .board
            .landing_row(column)
            .ok_or(MoveError::ColumnFull { column })?;

        let player = self.current;
        self.board.set(row, column, player);
        self.moves.push(column);

        self.status = if self.check_win(row, column, player) {
            GameStatus::Won(player)
        } else if self.board.is_full() {
            GameStatus::Tied
        } else {
            self.current = player.other();
            GameStatus::InProgress
        };

        Ok(Placement {
            row,
            column,
            player,
            status: self.status,
        })
    }

    /// Starts a new game on an empty board of the same size
    pub fn reset(&mut self) {
        self.board = self.board.cleared();
        self.current = Player::One;
        self.status = GameStatus::InProgress;
        self.moves.clear();
    }

    fn check_win(&self, row: usize, column: usize, player: Player) -> bool {
        let won = match self.win_check {
            WinCheck::Exhaustive => win::has_four_in_a_row(&self.board, player),
            WinCheck::Incremental => win::completes_line(&self.board, row, column, player),
        };
        debug_assert_eq!(
            win::has_four_in_a_row(&self.board, player),
            win::completes_line(&self.board, row, column, player),
            "win checks disagree after {:?}",
            self.moves
        );
        won
    }
}
