//! Game rules and command line configuration

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::board::cell_count;
use crate::error::BoardError;
use crate::{HEIGHT, WIDTH};

/// How a move is checked for a win
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WinCheck {
    /// Scan every line on the board
    #[default]
    Exhaustive,
    /// Scan only the lines through the piece just dropped
    Incremental,
}

/// Validated settings for a game
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rules {
    height: usize,
    width: usize,
    win_check: WinCheck,
}

impl Rules {
    pub fn new(height: usize, width: usize) -> Result<Self, BoardError> {
        cell_count(height, width)?;
        Ok(Self {
            height,
            width,
            win_check: WinCheck::default(),
        })
    }

    pub fn with_win_check(mut self, win_check: WinCheck) -> Self {
        self.win_check = win_check;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn win_check(&self) -> WinCheck {
        self.win_check
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            height: HEIGHT,
            width: WIDTH,
            win_check: WinCheck::default(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "connect4", version, about = "Two player Connect 4 in the terminal")]
pub struct Cli {
    #[command(flatten)]
    pub rules: RulesArgs,

    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Debug, Args)]
pub struct RulesArgs {
    /// Number of rows on the board
    #[arg(long, default_value_t = HEIGHT)]
    pub height: usize,

    /// Number of columns on the board
    #[arg(long, default_value_t = WIDTH)]
    pub width: usize,

    /// Strategy used to look for four in a row after each move
    #[arg(long, value_enum, default_value_t = WinCheck::Exhaustive)]
    pub win_check: WinCheck,
}

impl RulesArgs {
    pub fn rules(&self) -> Result<Rules, BoardError> {
        Ok(Rules::new(self.height, self.width)?.with_win_check(self.win_check))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Mode {
    /// Play a game in the terminal
    Play {
        /// Columns (numbered from 1) to play before handing over, e.g. "4453"
        #[arg(long)]
        moves: Option<String>,

        /// Milliseconds a dropped piece spends on each row as it falls, 0 to turn the animation off
        #[arg(long, default_value_t = 30)]
        drop_delay: u64,
    },
    /// Check that both win checks agree on every game up to a number of moves
    Verify {
        /// Number of moves to explore from the empty board
        #[arg(long, default_value_t = 6)]
        depth: usize,
    },
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Play {
            moves: None,
            drop_delay: 30,
        }
    }
}
