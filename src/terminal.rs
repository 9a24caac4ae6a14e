//! A terminal front end: renders notifications with crossterm and parses typed input

use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent, StyledContent},
    QueueableCommand,
};
use tracing::{debug, warn};

use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::{
    board::{Cell, Player},
    config::Rules,
    error::MoveError,
    controller::TurnController,
    observer::Observer,
};

/// Draws the board as it learns about moves
///
/// The view keeps its own copy of the grid, built only from notifications,
/// so it never reaches into the game state. The game has already moved on by
/// the time a notification arrives, so a drop animation only holds up the
/// drawing.
pub struct TerminalView<W: Write> {
    out: W,
    height: usize,
    width: usize,
    cells: Vec<Cell>,
    drop_delay: Duration,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, rules: &Rules) -> Self {
        Self {
            out,
            height: rules.height(),
            width: rules.width(),
            cells: vec![Cell::Empty; rules.height() * rules.width()],
            drop_delay: Duration::from_millis(0),
        }
    }

    /// Animates dropped pieces falling through the column, pausing `delay`
    /// on each row. A zero delay draws the board without animation.
    pub fn with_drop_delay(mut self, delay: Duration) -> Self {
        self.drop_delay = delay;
        self
    }

    /// The cell at `(y, x)` as last drawn
    pub fn cell(&self, y: usize, x: usize) -> Option<Cell> {
        if x < self.width {
            self.cells.get(x + self.width * y).copied()
        } else {
            None
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn draw(&mut self) -> Result<()> {
        let cols: String = (1..=self.width).map(|x| (x % 10).to_string()).collect();
        self.out.queue(PrintStyledContent(style(cols + "\n")))?;

        for row in self.cells.chunks(self.width) {
            for &cell in row {
                self.out.queue(PrintStyledContent(piece(cell)))?;
            }
            self.out.queue(PrintStyledContent(style("\n")))?;
        }
        self.out.flush()?;
        Ok(())
    }

    // draws the board without the new piece, then moves the piece down the
    // column one row at a time, leaving the cursor below the board
    fn animate_drop(&mut self, row: usize, column: usize, player: Player) -> Result<()> {
        self.draw()?;
        let (_, below) = crossterm::cursor::position()?;
        let lines = drop_lines(below, self.height, row)
            .ok_or_else(|| anyhow!("board does not fit on the screen"))?;
        let column = column as u16;

        for (i, &line) in lines.iter().enumerate() {
            self.out
                .queue(MoveTo(column, line))?
                .queue(PrintStyledContent(piece(player.into())))?;
            self.out.flush()?;
            thread::sleep(self.drop_delay);
            if i + 1 < lines.len() {
                self.out
                    .queue(MoveTo(column, line))?
                    .queue(PrintStyledContent(piece(Cell::Empty)))?;
            }
        }
        self.out.queue(MoveTo(0, below))?;
        self.out.flush()?;
        Ok(())
    }

    pub fn announce(&mut self, message: &str) -> Result<()> {
        self.out.queue(PrintStyledContent(
            style(format!("{}\n", message)).attribute(Attribute::Bold),
        ))?;
        self.out.flush()?;
        Ok(())
    }

    fn redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!(%err, "failed to draw board");
        }
    }

    fn show(&mut self, message: &str) {
        if let Err(err) = self.announce(message) {
            warn!(%err, text = message, "failed to write message");
        }
    }
}

impl<W: Write> Observer for TerminalView<W> {
    fn on_piece_dropped(&mut self, row: usize, column: usize, player: Player) {
        let animated = !self.drop_delay.is_zero()
            && match self.animate_drop(row, column, player) {
                Ok(()) => true,
                Err(err) => {
                    debug!(%err, "drop animation skipped");
                    false
                }
            };
        if let Some(cell) = self.cells.get_mut(column + self.width * row) {
            *cell = player.into();
        }
        if !animated {
            self.redraw();
        }
    }

    fn on_game_won(&mut self, player: Player) {
        self.show(&format!("{} won!", player));
    }

    fn on_game_tied(&mut self) {
        self.show("Tie game!  Board is filled!");
    }

    fn on_turn_changed(&mut self, player: Player) {
        self.show(&format!("{}'s turn!", player));
    }

    fn on_game_reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = Cell::Empty);
        self.show("New game!");
        self.redraw();
        self.show(&format!("{}'s turn!", Player::One));
    }
}

fn piece(cell: Cell) -> StyledContent<&'static str> {
    style("O")
        .attribute(Attribute::Bold)
        .on(Color::DarkBlue)
        .with(match cell {
            Cell::PlayerOne => Color::Red,
            Cell::PlayerTwo => Color::Yellow,
            Cell::Empty => Color::DarkBlue,
        })
}

/// The screen lines a piece passes through on its way down to `row`, for a
/// board of `height` rows drawn just above screen line `below`
pub fn drop_lines(below: u16, height: usize, row: usize) -> Option<Vec<u16>> {
    let top = (below as usize).checked_sub(height)?;
    (0..=row).map(|y| u16::try_from(top + y).ok()).collect()
}

/// The message to show for a rejected move, or `None` when the rejection
/// should pass silently
pub fn rejection_message(err: &MoveError) -> Option<String> {
    if err.is_silent() {
        None
    } else {
        Some(err.to_string())
    }
}

/// Plays a move string the way typed moves are played: the replay stops at
/// the first rejected move, and the game carries on from there
///
/// Returns the message to show for the rejected move, if any. Only a
/// malformed move string is an error.
pub fn replay_moves<O: Observer>(
    controller: &mut TurnController<O>,
    moves: &str,
) -> Result<Option<String>> {
    let columns = parse_moves(moves)?;
    Ok(controller
        .replay(&columns)
        .err()
        .and_then(|err| rejection_message(&err)))
}

/// A line of user input
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Drop a piece into a zero-indexed column
    Drop(usize),
    Reset,
    Quit,
}

impl Command {
    /// Parses a 1-indexed column number, `r`/`reset` or `q`/`quit`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        match input.to_lowercase().as_str() {
            "r" | "reset" => return Ok(Command::Reset),
            "q" | "quit" => return Ok(Command::Quit),
            _ => {}
        }
        let column = input
            .parse::<usize>()
            .map_err(|_| anyhow!("Invalid number: {}", input))?;
        column
            .checked_sub(1)
            .map(Command::Drop)
            .ok_or_else(|| anyhow!("Invalid move, columns are numbered from 1"))
    }
}

/// Parses a move string such as `"4453"` into zero-indexed columns
pub fn parse_moves(moves: &str) -> Result<Vec<usize>> {
    moves
        .chars()
        .map(|column_char| match column_char.to_digit(10) {
            Some(column @ 1..=9) => Ok(column as usize - 1),
            _ => Err(anyhow!("could not parse '{}' as a valid move", column_char)),
        })
        .collect()
}
