//! Everything that lives from one deal to the end of the round: the hands, the cards on the
//! table, and which tricks went to whom.
use crate::cards::power::MAX_POWER;
use crate::cards::{Card, Hand, PowerTable};
use crate::trick::{self, TrickOutcome};
use crate::{ActionError, Side, HAND_SIZE};
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

/// Who won the first trick of the round, if it has been played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FirstTrick {
    Undetermined,
    Won(Side),
    Tie,
}

impl FirstTrick {
    /// 0 for undetermined, 1 or 2 for a win by side A or B, 3 for a tie
    pub const fn tag(&self) -> u8 {
        match self {
            FirstTrick::Undetermined => 0,
            FirstTrick::Won(Side::A) => 1,
            FirstTrick::Won(Side::B) => 2,
            FirstTrick::Tie => 3,
        }
    }
}

impl From<TrickOutcome> for FirstTrick {
    fn from(t: TrickOutcome) -> Self {
        match t {
            TrickOutcome::Won(side) => FirstTrick::Won(side),
            TrickOutcome::Tie => FirstTrick::Tie,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Keep playing tricks
    Undetermined,
    Won(Side),
    /// Nobody scores
    Tie,
}

impl RoundOutcome {
    pub const fn is_over(&self) -> bool {
        !matches!(self, RoundOutcome::Undetermined)
    }
}

/// Decide the round after a trick has been resolved.
///
/// `trick_number` is the 0-based index of the trick just played and `first` is the first trick's
/// result as it was known *before* this trick, so the first trick itself never decides a round.
///
/// Whoever takes the first trick wins the round unless the other side takes a later trick
/// outright. If the first trick tied, the next decisive trick wins. The third trick always ends
/// the round, possibly in a tie.
pub fn round_outcome(trick_number: usize, first: FirstTrick, trick: TrickOutcome) -> RoundOutcome {
    if trick_number == HAND_SIZE - 1 {
        return match trick {
            TrickOutcome::Won(side) => RoundOutcome::Won(side),
            TrickOutcome::Tie => RoundOutcome::Tie,
        };
    }
    match (first, trick) {
        (FirstTrick::Tie, TrickOutcome::Won(side)) => RoundOutcome::Won(side),
        (FirstTrick::Tie, TrickOutcome::Tie) => RoundOutcome::Undetermined,
        (FirstTrick::Won(first_side), TrickOutcome::Tie) => RoundOutcome::Won(first_side),
        (FirstTrick::Won(first_side), TrickOutcome::Won(side)) if side == first_side => {
            RoundOutcome::Won(first_side)
        }
        _ => RoundOutcome::Undetermined,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub(crate) hands: EnumMap<Side, Hand>,
    /// The card each side has put down in the current trick
    pub(crate) played: EnumMap<Side, Option<Card>>,
    /// 0-based index of the trick being played
    pub(crate) trick_number: usize,
    pub(crate) first_trick: FirstTrick,
    pub(crate) tricks_won: EnumMap<Side, u8>,
    /// How many cards of each power have been played this round. Index is power - 1.
    pub(crate) card_frequency: [u8; MAX_POWER as usize],
}

impl Round {
    pub fn new(hands: EnumMap<Side, Hand>) -> Self {
        Self {
            hands,
            played: EnumMap::default(),
            trick_number: 0,
            first_trick: FirstTrick::Undetermined,
            tricks_won: EnumMap::default(),
            card_frequency: [0; MAX_POWER as usize],
        }
    }

    /// Move a card from `side`'s hand to the table. Returns the trick's outcome if both sides
    /// have now played.
    pub(crate) fn play(
        &mut self,
        side: Side,
        slot: usize,
        table: &PowerTable,
    ) -> Result<(Card, Option<TrickOutcome>), ActionError> {
        let card = self.hands[side].play(slot, table)?;
        self.card_frequency[table.power(card).value() as usize - 1] += 1;
        self.played[side] = Some(card);
        let outcome = match (self.played[Side::A], self.played[Side::B]) {
            (Some(a), Some(b)) => Some(trick::resolve(table, a, b)),
            _ => None,
        };
        Ok((card, outcome))
    }

    /// Book a resolved trick: tally it, clear the table, move on to the next trick. Returns the
    /// state of the round afterwards.
    pub(crate) fn finish_trick(&mut self, trick: TrickOutcome) -> RoundOutcome {
        if let TrickOutcome::Won(side) = trick {
            self.tricks_won[side] += 1;
        }
        let outcome = round_outcome(self.trick_number, self.first_trick, trick);
        if self.trick_number == 0 {
            self.first_trick = trick.into();
        }
        self.played = EnumMap::default();
        self.trick_number += 1;
        outcome
    }

    pub fn hand(&self, side: Side) -> &Hand {
        &self.hands[side]
    }

    pub fn played(&self, side: Side) -> Option<Card> {
        self.played[side]
    }

    pub const fn trick_number(&self) -> usize {
        self.trick_number
    }

    pub const fn first_trick(&self) -> FirstTrick {
        self.first_trick
    }

    pub fn tricks_won(&self, side: Side) -> u8 {
        self.tricks_won[side]
    }

    pub const fn card_frequency(&self) -> &[u8; MAX_POWER as usize] {
        &self.card_frequency
    }
}
