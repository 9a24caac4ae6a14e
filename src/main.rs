use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Write};
use std::time::Duration;

use connect4::{
    config::{Cli, Mode, Rules},
    terminal::{rejection_message, replay_moves, Command, TerminalView},
    verify, TurnController,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = cli.rules.rules()?;

    match cli.mode.unwrap_or_default() {
        Mode::Play { moves, drop_delay } => play(
            &rules,
            moves.as_deref(),
            Duration::from_millis(drop_delay),
        ),
        Mode::Verify { depth } => check(&rules, depth),
    }
}

fn play(rules: &Rules, moves: Option<&str>, drop_delay: Duration) -> Result<()> {
    let view = TerminalView::new(stdout(), rules).with_drop_delay(drop_delay);
    let mut controller = TurnController::new(rules, view)?;
    let stdin = stdin();

    println!("Welcome to Connect 4\n");
    println!("Enter a column number to drop a piece, 'r' to start over or 'q' to quit\n");

    if let Some(moves) = moves {
        if let Some(message) = replay_moves(&mut controller, moves)? {
            println!("{}", message);
        }
    }
    if controller.game().moves().is_empty() {
        let player = controller.game().current_player();
        let view = controller.observer_mut();
        view.draw()?;
        view.announce(&format!("{}'s turn!", player))?;
    }

    // game loop
    loop {
        print!("Move input > ");
        stdout().flush()?;

        let mut input_str = String::new();
        if stdin.read_line(&mut input_str)? == 0 {
            break;
        }

        match Command::parse(&input_str) {
            Err(err) => println!("{}", err),
            Ok(Command::Quit) => break,
            Ok(Command::Reset) => controller.reset(),
            Ok(Command::Drop(column)) => {
                if let Err(err) = controller.apply_move(column) {
                    if let Some(message) = rejection_message(&err) {
                        println!("{}", message);
                    }
                }
            }
        }
    }

    let record: String = controller
        .game()
        .moves()
        .iter()
        .map(|column| (column + 1).to_string())
        .collect();
    if !record.is_empty() {
        println!("Moves played: {}", record);
    }
    Ok(())
}

fn check(rules: &Rules, depth: usize) -> Result<()> {
    let report = verify::check_equivalence(rules, depth, true)?;
    println!(
        "Checked {} positions up to {} moves on a {}x{} board: {} wins, {} ties",
        report.positions,
        depth,
        rules.height(),
        rules.width(),
        report.wins,
        report.ties
    );
    if !report.mismatches.is_empty() {
        for moves in report.mismatches.iter().take(10) {
            let record: String = moves.iter().map(|column| (column + 1).to_string()).collect();
            println!("Win checks disagree after {}", record);
        }
        bail!("{} mismatched positions", report.mismatches.len());
    }
    println!("Incremental and exhaustive win checks agree");
    Ok(())
}
