use crate::cards::power::MAX_POWER;
use crate::cards::Power;
use crate::round::FirstTrick;
use crate::{Score, HAND_SIZE};
use serde::{Deserialize, Serialize};

/// Length of [`Observation::features`]
pub const NUM_FEATURES: usize = HAND_SIZE + 7 + MAX_POWER as usize;

/// What the side to act can see. Everything is relative to that side: "my" hand and score,
/// "other" card and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Powers of the cards in hand, strongest first, played slots last
    pub hand: [Option<Power>; HAND_SIZE],
    /// The card the other side has put down in this trick, if any
    pub other_card: Option<Power>,
    pub first_trick: FirstTrick,
    pub my_score: Score,
    pub other_score: Score,
    /// 0 through 4, for a round worth 2, 4, 6, 10 or 12
    pub stake_rung: usize,
    /// Whether the side to act may call truco or raise
    pub trucable: bool,
    /// Whether the side to act must answer a call
    pub respond: bool,
    /// Cards played this round, by power. Index is power - 1.
    pub card_frequency: [u8; MAX_POWER as usize],
}

impl Observation {
    /// Flat integer encoding for learned agents. Missing cards become 0, which no real card has.
    pub fn features(&self) -> [i64; NUM_FEATURES] {
        let power = |p: Option<Power>| p.map(|p| p.value() as i64).unwrap_or(0);
        let mut f = [0i64; NUM_FEATURES];
        for (i, p) in self.hand.iter().enumerate() {
            f[i] = power(*p);
        }
        let rest = [
            power(self.other_card),
            self.first_trick.tag() as i64,
            self.my_score as i64,
            self.other_score as i64,
            self.stake_rung as i64,
            self.trucable as i64,
            self.respond as i64,
        ];
        f[HAND_SIZE..HAND_SIZE + rest.len()].copy_from_slice(&rest);
        for (i, n) in self.card_frequency.iter().enumerate() {
            f[HAND_SIZE + rest.len() + i] = *n as i64;
        }
        f
    }
}
