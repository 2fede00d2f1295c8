use crate::{ActionError, HAND_SIZE};
use serde::{Deserialize, Serialize};

/// Number of distinct encoded actions, see [`Action::index`]
pub const NUM_ACTIONS: usize = HAND_SIZE + 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Play the card in the given slot of the hand
    Play(usize),
    /// Call truco, or raise the stake if it has been called already
    Call,
    Accept,
    Decline,
}

impl Action {
    /// Stable integer encoding: the play slots first, then call, accept, decline
    pub const fn index(&self) -> usize {
        match self {
            Action::Play(slot) => *slot,
            Action::Call => HAND_SIZE,
            Action::Accept => HAND_SIZE + 1,
            Action::Decline => HAND_SIZE + 2,
        }
    }

    pub const fn is_response(&self) -> bool {
        matches!(self, Action::Accept | Action::Decline)
    }
}

impl TryFrom<usize> for Action {
    type Error = ActionError;

    fn try_from(i: usize) -> Result<Self, Self::Error> {
        match i {
            i if i < HAND_SIZE => Ok(Action::Play(i)),
            i if i == HAND_SIZE => Ok(Action::Call),
            i if i == HAND_SIZE + 1 => Ok(Action::Accept),
            i if i == HAND_SIZE + 2 => Ok(Action::Decline),
            _ => Err(ActionError::UnknownAction(i)),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Action::Play(slot) => write!(f, "Play({})", slot),
            Action::Call => write!(f, "Call"),
            Action::Accept => write!(f, "Accept"),
            Action::Decline => write!(f, "Decline"),
        }
    }
}
