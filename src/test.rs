#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::{
        board::{Board, Cell, Player},
        config::{Rules, WinCheck},
        controller::TurnController,
        error::MoveError,
        game::GameStatus,
        observer::{Event, EventLog},
        terminal::{drop_lines, parse_moves, rejection_message, replay_moves, Command, TerminalView},
        verify, win, HEIGHT, WIDTH,
    };

    // fills the whole 6x7 board without anyone lining up four
    const TIED_GAME: [usize; 42] = [
        0, 1, 0, 0, 2, 0, 0, 0, 2, 1, 1, 2, 1, 1, 1, 2, 2, 2, 4, 3, 4, 3, 3, 4, 3, 3, 3, 4, 4, 4,
        6, 5, 6, 5, 5, 6, 5, 5, 5, 6, 6, 6,
    ];

    // Player 2's last move fills the board and completes a line
    const WON_ON_LAST_CELL: [usize; 42] = [
        5, 6, 1, 3, 6, 1, 4, 4, 5, 1, 0, 3, 1, 5, 2, 0, 0, 6, 1, 0, 4, 5, 2, 0, 4, 5, 0, 4, 2, 4,
        5, 1, 6, 2, 6, 2, 2, 3, 3, 6, 3, 3,
    ];

    fn controller(rules: &Rules) -> Result<TurnController<EventLog>> {
        Ok(TurnController::new(rules, EventLog::new())?)
    }

    fn board_with(pieces: &[(usize, usize, Player)]) -> Board {
        let mut board = Board::default();
        for &(y, x, player) in pieces {
            board.set(y, x, player);
        }
        board
    }

    #[test]
    pub fn landing_rows_rise_until_the_column_is_full() -> Result<()> {
        for column in 0..WIDTH {
            let mut board = Board::default();
            let mut player = Player::One;
            let mut rows = vec![];
            while let Some(row) = board.landing_row(column) {
                board.set(row, column, player);
                rows.push(row);
                player = player.other();
            }
            assert_eq!(rows, (0..HEIGHT).rev().collect::<Vec<_>>());
            assert_eq!(board.landing_row(column), None);
        }
        Ok(())
    }

    #[test]
    pub fn is_full_is_idempotent() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        assert!(!game.game().board().is_full());
        assert!(!game.game().board().is_full());
        game.replay(&TIED_GAME)?;
        let board = game.game().board();
        assert!(board.is_full());
        assert!(board.is_full());
        Ok(())
    }

    #[test]
    pub fn four_in_a_row_in_every_direction() -> Result<()> {
        let horizontal = board_with(&[
            (5, 2, Player::One),
            (5, 3, Player::One),
            (5, 4, Player::One),
            (5, 5, Player::One),
        ]);
        let vertical = board_with(&[
            (5, 6, Player::Two),
            (4, 6, Player::Two),
            (3, 6, Player::Two),
            (2, 6, Player::Two),
        ]);
        let down_right = board_with(&[
            (2, 0, Player::One),
            (3, 1, Player::One),
            (4, 2, Player::One),
            (5, 3, Player::One),
        ]);
        let down_left = board_with(&[
            (0, 6, Player::Two),
            (1, 5, Player::Two),
            (2, 4, Player::Two),
            (3, 3, Player::Two),
        ]);

        assert_eq!(
            win::find_line(&horizontal, Player::One),
            Some([(5, 2), (5, 3), (5, 4), (5, 5)])
        );
        assert!(!win::has_four_in_a_row(&horizontal, Player::Two));
        assert_eq!(
            win::find_line(&vertical, Player::Two),
            Some([(2, 6), (3, 6), (4, 6), (5, 6)])
        );
        assert!(win::has_four_in_a_row(&down_right, Player::One));
        assert!(win::has_four_in_a_row(&down_left, Player::Two));

        // every cell of a line finds it incrementally
        for &(y, x) in [(2, 0), (3, 1), (4, 2), (5, 3)].iter() {
            assert!(win::completes_line(&down_right, y, x, Player::One));
        }
        for &(y, x) in [(0, 6), (1, 5), (2, 4), (3, 3)].iter() {
            assert!(win::completes_line(&down_left, y, x, Player::Two));
        }
        Ok(())
    }

    #[test]
    pub fn three_in_a_row_is_not_a_win() -> Result<()> {
        let gap = board_with(&[
            (5, 0, Player::One),
            (5, 1, Player::One),
            (5, 2, Player::One),
            (5, 4, Player::One),
        ]);
        let blocked = board_with(&[
            (5, 0, Player::One),
            (5, 1, Player::One),
            (5, 2, Player::One),
            (5, 3, Player::Two),
        ]);
        let blocked_diagonal = board_with(&[
            (2, 0, Player::One),
            (3, 1, Player::One),
            (4, 2, Player::Two),
            (5, 3, Player::One),
        ]);

        assert!(!win::has_four_in_a_row(&gap, Player::One));
        assert!(!win::completes_line(&gap, 5, 4, Player::One));
        assert!(!win::has_four_in_a_row(&blocked, Player::One));
        assert!(!win::has_four_in_a_row(&blocked, Player::Two));
        assert!(!win::has_four_in_a_row(&blocked_diagonal, Player::One));
        Ok(())
    }

    #[test]
    pub fn stacking_one_column() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        assert_eq!(game.replay(&[0, 0, 0, 0])?, GameStatus::InProgress);

        let board = game.game().board();
        assert_eq!(board.get(5, 0), Some(Cell::PlayerOne));
        assert_eq!(board.get(4, 0), Some(Cell::PlayerTwo));
        assert_eq!(board.get(3, 0), Some(Cell::PlayerOne));
        assert_eq!(board.get(2, 0), Some(Cell::PlayerTwo));
        assert_eq!(board.get(1, 0), Some(Cell::Empty));
        assert_eq!(game.game().current_player(), Player::One);

        assert_eq!(
            &game.observer().events()[..4],
            &[
                Event::PieceDropped {
                    row: 5,
                    column: 0,
                    player: Player::One
                },
                Event::TurnChanged(Player::Two),
                Event::PieceDropped {
                    row: 4,
                    column: 0,
                    player: Player::Two
                },
                Event::TurnChanged(Player::One),
            ]
        );
        Ok(())
    }

    #[test]
    pub fn horizontal_win_ends_the_game() -> Result<()> {
        for &win_check in [WinCheck::Exhaustive, WinCheck::Incremental].iter() {
            let mut game = controller(&Rules::default().with_win_check(win_check))?;
            assert_eq!(game.replay(&[0, 6, 1, 6, 2, 6])?, GameStatus::InProgress);
            assert_eq!(game.apply_move(3)?, GameStatus::Won(Player::One));

            assert_eq!(game.game().status(), GameStatus::Won(Player::One));
            assert_eq!(
                game.game().winning_line(),
                Some([(5, 0), (5, 1), (5, 2), (5, 3)])
            );
            assert_eq!(
                game.observer().events().last(),
                Some(&Event::GameWon(Player::One))
            );
        }
        Ok(())
    }

    #[test]
    pub fn moves_after_the_end_are_rejected() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        game.replay(&[0, 6, 1, 6, 2, 6, 3])?;
        let board = game.game().board().clone();
        let events = game.observer_mut().take();

        for column in 0..WIDTH {
            assert_eq!(game.apply_move(column), Err(MoveError::GameOver));
        }
        assert_eq!(game.apply_move(WIDTH), Err(MoveError::GameOver));
        assert_eq!(game.game().board(), &board);
        assert_eq!(game.game().moves().len(), 7);
        assert!(game.observer().events().is_empty());
        assert_eq!(events.len(), 14);
        Ok(())
    }

    #[test]
    pub fn full_and_invalid_columns_change_nothing() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        game.replay(&[2, 2, 2, 2, 2, 2])?;
        let board = game.game().board().clone();
        let player = game.game().current_player();
        game.observer_mut().take();

        assert_eq!(game.apply_move(2), Err(MoveError::ColumnFull { column: 2 }));
        assert_eq!(
            game.apply_move(WIDTH),
            Err(MoveError::InvalidColumn {
                column: WIDTH,
                width: WIDTH
            })
        );
        assert_eq!(game.game().board(), &board);
        assert_eq!(game.game().current_player(), player);
        assert_eq!(game.game().status(), GameStatus::InProgress);
        assert!(game.observer().events().is_empty());
        Ok(())
    }

    #[test]
    pub fn filling_the_board_without_a_line_ties() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        assert_eq!(game.replay(&TIED_GAME[..41])?, GameStatus::InProgress);
        assert_eq!(game.apply_move(TIED_GAME[41])?, GameStatus::Tied);

        assert!(game.game().board().is_full());
        assert_eq!(game.game().winning_line(), None);
        assert_eq!(game.observer().events().last(), Some(&Event::GameTied));
        assert_eq!(game.apply_move(0), Err(MoveError::GameOver));
        Ok(())
    }

    #[test]
    pub fn win_beats_tie_on_the_last_cell() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        assert_eq!(game.replay(&WON_ON_LAST_CELL[..41])?, GameStatus::InProgress);
        assert_eq!(
            game.apply_move(WON_ON_LAST_CELL[41])?,
            GameStatus::Won(Player::Two)
        );
        assert!(game.game().board().is_full());
        assert!(!game.observer().events().contains(&Event::GameTied));

        // the same on a single row board
        let mut game = controller(&Rules::new(1, 7)?)?;
        assert_eq!(
            game.replay(&[0, 4, 1, 5, 2, 6, 3])?,
            GameStatus::Won(Player::One)
        );
        assert!(game.game().board().is_full());
        Ok(())
    }

    #[test]
    pub fn reset_starts_over() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        game.replay(&[0, 6, 1, 6, 2, 6, 3])?;
        game.reset();

        assert_eq!(game.game().status(), GameStatus::InProgress);
        assert_eq!(game.game().current_player(), Player::One);
        assert!(game.game().moves().is_empty());
        let board = game.game().board();
        assert_eq!((board.height(), board.width()), (HEIGHT, WIDTH));
        assert!(board.rows().flatten().all(|cell| cell.is_empty()));
        assert_eq!(game.observer().events().last(), Some(&Event::GameReset));

        assert_eq!(game.apply_move(3)?, GameStatus::InProgress);
        assert_eq!(game.game().board().get(5, 3), Some(Cell::PlayerOne));
        Ok(())
    }

    #[test]
    pub fn detectors_agree_along_full_games() -> Result<()> {
        for moves in [&TIED_GAME[..], &WON_ON_LAST_CELL[..]].iter() {
            let mut board = Board::default();
            let mut player = Player::One;
            for &column in moves.iter() {
                let row = board.landing_row(column).expect("column has room");
                board.set(row, column, player);
                assert_eq!(
                    win::has_four_in_a_row(&board, player),
                    win::completes_line(&board, row, column, player)
                );
                player = player.other();
            }
        }
        Ok(())
    }

    #[test]
    pub fn exhaustive_equivalence() -> Result<()> {
        let report = verify::check_equivalence(&Rules::default(), 7, false)?;
        assert_eq!(report.positions, 960792);
        assert_eq!(report.wins, 13032);
        assert_eq!(report.ties, 0);
        assert!(report.mismatches.is_empty());

        // a small board runs out of room, so every game ends
        let report = verify::check_equivalence(&Rules::new(3, 4)?, 12, false)?;
        assert!(report.wins > 0);
        assert!(report.ties > 0);
        assert!(report.mismatches.is_empty());

        assert_eq!(
            verify::check_equivalence(&Rules::default(), 0, false)?,
            verify::Report::default()
        );
        Ok(())
    }

    #[test]
    pub fn terminal_view_follows_notifications() -> Result<()> {
        let view = TerminalView::new(Vec::new(), &Rules::default());
        let mut game = TurnController::new(&Rules::default(), view)?;
        game.replay(&[0, 6, 1, 6, 2, 6, 3])?;

        assert_eq!(game.observer().cell(5, 0), Some(Cell::PlayerOne));
        assert_eq!(game.observer().cell(3, 6), Some(Cell::PlayerTwo));
        assert_eq!(game.observer().cell(0, WIDTH), None);

        game.reset();
        assert_eq!(game.observer().cell(5, 0), Some(Cell::Empty));

        let output = String::from_utf8(game.into_observer().into_inner())?;
        assert!(output.contains("1234567"));
        assert!(output.contains("Player 2's turn!"));
        assert!(output.contains("Player 1 won!"));
        assert!(output.contains("New game!"));
        Ok(())
    }

    #[test]
    pub fn command_parsing() -> Result<()> {
        assert_eq!(Command::parse("4\n")?, Command::Drop(3));
        assert_eq!(Command::parse(" R ")?, Command::Reset);
        assert_eq!(Command::parse("quit")?, Command::Quit);
        assert!(Command::parse("0").is_err());
        assert!(Command::parse("four").is_err());

        assert_eq!(parse_moves("4453")?, vec![3, 3, 4, 2]);
        assert!(parse_moves("40").is_err());
        assert!(parse_moves("4x").is_err());
        Ok(())
    }

    #[test]
    pub fn replayed_moves_past_a_full_column_carry_on() -> Result<()> {
        let view = TerminalView::new(Vec::new(), &Rules::default());
        let mut game = TurnController::new(&Rules::default(), view)?;

        // the seventh piece does not fit, which passes silently
        assert_eq!(replay_moves(&mut game, "1111111")?, None);
        assert_eq!(game.game().moves().len(), 6);
        assert_eq!(game.game().status(), GameStatus::InProgress);
        assert_eq!(game.game().current_player(), Player::One);

        // play continues from where the replay stopped
        assert_eq!(game.apply_move(1)?, GameStatus::InProgress);
        assert_eq!(game.observer().cell(5, 1), Some(Cell::PlayerOne));
        Ok(())
    }

    #[test]
    pub fn replayed_moves_after_a_win_report_game_over() -> Result<()> {
        let mut game = controller(&Rules::default())?;
        assert_eq!(
            replay_moves(&mut game, "17273747")?,
            Some("Game is over! Start a new game!".to_string())
        );
        assert_eq!(game.game().status(), GameStatus::Won(Player::One));
        assert_eq!(game.game().moves().len(), 7);

        // a malformed move string is still an error
        assert!(replay_moves(&mut game, "1a").is_err());
        Ok(())
    }

    #[test]
    pub fn rejection_messages() -> Result<()> {
        assert_eq!(rejection_message(&MoveError::ColumnFull { column: 0 }), None);
        assert_eq!(
            rejection_message(&MoveError::GameOver),
            Some("Game is over! Start a new game!".to_string())
        );
        assert!(rejection_message(&MoveError::InvalidColumn {
            column: 9,
            width: WIDTH
        })
        .is_some());
        Ok(())
    }

    #[test]
    pub fn drop_animation_lines() -> Result<()> {
        // header on line 3, rows on lines 4..=9, cursor below on line 10
        assert_eq!(drop_lines(10, HEIGHT, 0), Some(vec![4]));
        assert_eq!(drop_lines(10, HEIGHT, 5), Some(vec![4, 5, 6, 7, 8, 9]));
        // the top of the board has scrolled off the screen
        assert_eq!(drop_lines(3, HEIGHT, 5), None);
        Ok(())
    }
}
