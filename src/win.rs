//! Four-in-a-row detection
//!
//! [`find_line`] is the reference form: it tries every line of [`RUN`] cells
//! starting at every cell of the board, at most `height * width * 4` lines.
//! [`find_line_through`] only tries the lines containing one cell, which is
//! all that can change when a single piece is dropped. On any board reached
//! by legal play with no earlier winner, the two agree for the piece that was
//! just placed.

use crate::board::{Board, Cell, Player};

/// The number of aligned pieces needed to win
pub const RUN: usize = 4;

/// The directions a line extends in from its first cell, as `(dy, dx)`:
/// horizontal, vertical, diagonal down-right and diagonal down-left
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// The `(y, x)` coordinates of a winning line, in order along its direction
pub type Line = [(usize, usize); RUN];

// the line of RUN cells starting at (y, x), or None if it leaves the board
fn line_from(board: &Board, y: usize, x: usize, (dy, dx): (isize, isize)) -> Option<Line> {
    let mut line = [(0, 0); RUN];
    for (i, coords) in line.iter_mut().enumerate() {
        let i = i as isize;
        let cell_y = y.checked_add_signed(dy * i)?;
        let cell_x = x.checked_add_signed(dx * i)?;
        board.get(cell_y, cell_x)?;
        *coords = (cell_y, cell_x);
    }
    Some(line)
}

fn owned_by(board: &Board, line: &Line, player: Player) -> bool {
    let target = Cell::from(player);
    line.iter().all(|&(y, x)| board.get(y, x) == Some(target))
}

/// Searches the whole board for a line of `player`'s pieces
pub fn find_line(board: &Board, player: Player) -> Option<Line> {
    for y in 0..board.height() {
        for x in 0..board.width() {
            for &direction in DIRECTIONS.iter() {
                if let Some(line) = line_from(board, y, x, direction) {
                    if owned_by(board, &line, player) {
                        return Some(line);
                    }
                }
            }
        }
    }
    None
}

pub fn has_four_in_a_row(board: &Board, player: Player) -> bool {
    find_line(board, player).is_some()
}

/// Searches only the lines passing through `(y, x)` for a line of `player`'s pieces
pub fn find_line_through(board: &Board, y: usize, x: usize, player: Player) -> Option<Line> {
    for &(dy, dx) in DIRECTIONS.iter() {
        // a line through (y, x) starts up to RUN - 1 steps behind it
        for back in 0..RUN as isize {
            let start = (
                y.checked_add_signed(-dy * back),
                x.checked_add_signed(-dx * back),
            );
            if let (Some(start_y), Some(start_x)) = start {
                if let Some(line) = line_from(board, start_y, start_x, (dy, dx)) {
                    if owned_by(board, &line, player) {
                        return Some(line);
                    }
                }
            }
        }
    }
    None
}

pub fn completes_line(board: &Board, y: usize, x: usize, player: Player) -> bool {
    find_line_through(board, y, x, player).is_some()
}
