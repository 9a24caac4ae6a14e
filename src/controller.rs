//! Applies moves to the game and tells the presentation what happened

use tracing::{debug, info, instrument};

use crate::{
    config::Rules,
    error::{BoardError, MoveError},
    game::{Game, GameStatus},
    observer::Observer,
};

/// The single owner of the game state
///
/// Presentations read the game through [`TurnController::game`] and learn
/// about changes through their [`Observer`] callbacks. Notifications for a
/// move are all sent before the call that applied it returns.
pub struct TurnController<O> {
    game: Game,
    observer: O,
}

impl<O: Observer> TurnController<O> {
    pub fn new(rules: &Rules, observer: O) -> Result<Self, BoardError> {
        Ok(Self {
            game: Game::new(rules)?,
            observer,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    /// Drops the current player's piece into `column`
    ///
    /// Rejected moves leave the game untouched and send no notifications.
    #[instrument(skip(self), fields(player = %self.game.current_player()))]
    pub fn apply_move(&mut self, column: usize) -> Result<GameStatus, MoveError> {
        let placement = self.game.play(column).map_err(|err| {
            debug!(%err, "move rejected");
            err
        })?;
        debug!(row = placement.row, "piece dropped");
        self.observer
            .on_piece_dropped(placement.row, placement.column, placement.player);

        match placement.status {
            GameStatus::Won(player) => {
                info!(%player, moves = self.game.moves().len(), "game won");
                self.observer.on_game_won(player);
            }
            GameStatus::Tied => {
                info!("game tied");
                self.observer.on_game_tied();
            }
            GameStatus::InProgress => {
                self.observer.on_turn_changed(self.game.current_player());
            }
        }
        Ok(placement.status)
    }

    /// Applies `columns` in order, stopping at the first rejected move
    pub fn replay(&mut self, columns: &[usize]) -> Result<GameStatus, MoveError> {
        let mut status = self.game.status();
        for &column in columns {
            status = self.apply_move(column)?;
        }
        Ok(status)
    }

    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        info!("game reset");
        self.observer.on_game_reset();
    }
}
