//! Cross-checks the two win detectors over every game up to a given length

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::{
    board::{Board, Player},
    config::Rules,
    error::BoardError,
    win,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Positions reached, counting each move sequence separately
    pub positions: usize,
    pub wins: usize,
    pub ties: usize,
    /// Move sequences after which the detectors disagreed
    pub mismatches: Vec<Vec<usize>>,
}

impl Report {
    fn merge(mut self, mut other: Report) -> Report {
        self.positions += other.positions;
        self.wins += other.wins;
        self.ties += other.ties;
        self.mismatches.append(&mut other.mismatches);
        self
    }
}

/// Plays out every legal move sequence of up to `depth` moves from the empty
/// board and compares [`win::has_four_in_a_row`] with [`win::completes_line`]
/// after each move. Sequences end early at a win or a full board.
#[instrument(skip(rules), fields(height = rules.height(), width = rules.width()))]
pub fn check_equivalence(rules: &Rules, depth: usize, show_progress: bool) -> Result<Report, BoardError> {
    let board = Board::new(rules.height(), rules.width())?;
    if depth == 0 {
        return Ok(Report::default());
    }

    let progress = if show_progress {
        ProgressBar::new(board.width() as u64)
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Checking win detection: {bar:40.cyan/blue} {pos}/{len} columns ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    // each first move is an independent subtree
    let report = (0..board.width())
        .into_par_iter()
        .map(|column| {
            let mut report = Report::default();
            let mut moves = Vec::with_capacity(depth);
            visit(&board, column, Player::One, &mut moves, depth, &mut report);
            progress.inc(1);
            report
        })
        .reduce(Report::default, Report::merge);

    progress.finish();
    debug!(
        positions = report.positions,
        wins = report.wins,
        ties = report.ties,
        mismatches = report.mismatches.len(),
        "equivalence check complete"
    );
    Ok(report)
}

fn visit(
    board: &Board,
    column: usize,
    player: Player,
    moves: &mut Vec<usize>,
    depth: usize,
    report: &mut Report,
) {
    let row = match board.landing_row(column) {
        Some(row) => row,
        None => return,
    };
    // cells are never cleared, so every branch gets its own board
    let mut board = board.clone();
    board.set(row, column, player);
    moves.push(column);
    report.positions += 1;

    let exhaustive = win::has_four_in_a_row(&board, player);
    let incremental = win::completes_line(&board, row, column, player);
    if exhaustive != incremental {
        report.mismatches.push(moves.clone());
    }

    if exhaustive || incremental {
        report.wins += 1;
    } else if board.is_full() {
        report.ties += 1;
    } else if moves.len() < depth {
        for next in 0..board.width() {
            visit(&board, next, player.other(), moves, depth, report);
        }
    }
    moves.pop();
}
