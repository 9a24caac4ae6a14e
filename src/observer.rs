//! Notifications from the game to whatever is presenting it

use crate::board::Player;

/// Receives game notifications in the order the moves were applied
///
/// Every method defaults to doing nothing, so a presentation only needs to
/// implement the notifications it cares about.
pub trait Observer {
    fn on_piece_dropped(&mut self, _row: usize, _column: usize, _player: Player) {}

    fn on_game_won(&mut self, _player: Player) {}

    fn on_game_tied(&mut self) {}

    fn on_turn_changed(&mut self, _player: Player) {}

    fn on_game_reset(&mut self) {}
}

impl Observer for () {}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_piece_dropped(&mut self, row: usize, column: usize, player: Player) {
        (**self).on_piece_dropped(row, column, player)
    }

    fn on_game_won(&mut self, player: Player) {
        (**self).on_game_won(player)
    }

    fn on_game_tied(&mut self) {
        (**self).on_game_tied()
    }

    fn on_turn_changed(&mut self, player: Player) {
        (**self).on_turn_changed(player)
    }

    fn on_game_reset(&mut self) {
        (**self).on_game_reset()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PieceDropped {
        row: usize,
        column: usize,
        player: Player,
    },
    GameWon(Player),
    GameTied,
    TurnChanged(Player),
    GameReset,
}

/// An observer that records every notification it receives
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Removes and returns the events recorded so far
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl Observer for EventLog {
    fn on_piece_dropped(&mut self, row: usize, column: usize, player: Player) {
        self.events.push(Event::PieceDropped {
            row,
            column,
            player,
        });
    }

    fn on_game_won(&mut self, player: Player) {
        self.events.push(Event::GameWon(player));
    }

    fn on_game_tied(&mut self) {
        self.events.push(Event::GameTied);
    }

    fn on_turn_changed(&mut self, player: Player) {
        self.events.push(Event::TurnChanged(player));
    }

    fn on_game_reset(&mut self) {
        self.events.push(Event::GameReset);
    }
}
