pub mod action;
pub mod agent;
pub mod cards;
pub mod log;
pub mod observation;
pub mod round;
pub mod stake;
pub mod state;
pub mod trick;

pub use action::Action;
pub use cards::{deck, hand};
pub use observation::Observation;
pub use state::{GameState, Step};

use enum_map::Enum;
use serde::{Deserialize, Serialize};

/// Cards dealt to each player at the start of a round
pub const HAND_SIZE: usize = 3;
/// A game ends as soon as a side has at least this many points
pub const WINNING_SCORE: Score = 12;
pub use deck::MAX_PLAYERS;

pub type Score = u8;
pub type SeqNum = usize;

/// One of the two sides of the table. With 1v1 play a side is a single player.
#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "Player 1"),
            Side::B => write!(f, "Player 2"),
        }
    }
}

/// An action that is not allowed in the current state. The state is left untouched when one of
/// these is returned, so the caller can simply pick another action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    #[display(fmt = "A truco or raise is pending and must be answered first")]
    MustRespond,
    #[display(fmt = "Slot {} has no card", _0)]
    EmptySlot(usize),
    #[display(fmt = "There is no slot {}", _0)]
    SlotOutOfRange(usize),
    #[display(fmt = "Not allowed to call truco or raise")]
    NotTrucable,
    #[display(fmt = "The stake is already at its maximum")]
    StakeAtMaximum,
    #[display(fmt = "No truco or raise to respond to")]
    NoCallPending,
    #[display(fmt = "Unknown action {}", _0)]
    UnknownAction(usize),
    #[display(fmt = "The game is over")]
    GameOver,
}

impl std::error::Error for ActionError {}

#[derive(Debug, derive_more::Display)]
pub enum GameError {
    DeckError(deck::DeckError),
    InvalidAction(ActionError),
}

impl std::error::Error for GameError {}

impl From<deck::DeckError> for GameError {
    fn from(d: deck::DeckError) -> Self {
        GameError::DeckError(d)
    }
}

impl From<ActionError> for GameError {
    fn from(a: ActionError) -> Self {
        GameError::InvalidAction(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_side() {
        assert_eq!(Side::A.other(), Side::B);
        assert_eq!(Side::B.other().other(), Side::B);
    }

    #[test]
    fn error_messages() {
        let e: GameError = ActionError::EmptySlot(2).into();
        assert_eq!(e.to_string(), "Slot 2 has no card");
        let e: GameError = deck::DeckError::OutOfCards.into();
        assert_eq!(e.to_string(), "No more cards in deck");
    }
}
