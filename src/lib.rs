//! Two player Connect 4
//!
//! Players take turns dropping pieces into the columns of a board. The first
//! to line up four pieces horizontally, vertically or diagonally wins, and the
//! game is tied when the board fills up first.
//!
//! [`TurnController`] owns the game and reports every change to an
//! [`Observer`], which is how a presentation (such as the
//! [`TerminalView`](terminal::TerminalView)) learns what to draw.
//!
//! # Basic Usage
//!
//! ```
//! use connect4::{config::Rules, controller::TurnController, game::GameStatus, board::Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut controller = TurnController::new(&Rules::default(), ())?;
//! let status = controller.replay(&[0, 6, 1, 6, 2, 6, 3])?;
//!
//! assert_eq!(status, GameStatus::Won(Player::One));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod win;

pub mod error;

pub mod config;

pub mod game;

pub mod observer;

pub mod controller;

pub mod terminal;

pub mod verify;

mod test;

pub use controller::TurnController;
pub use observer::Observer;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// the default board must be able to hold a winning line
const_assert!(WIDTH >= win::RUN && HEIGHT >= win::RUN);

assert_impl_all!(board::Board: Send, Sync, Clone);
assert_impl_all!(game::Game: Send, Sync, Clone);
