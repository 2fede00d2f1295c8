//! A trick (or "hand" at the table) is one card from each side.
use crate::cards::{Card, PowerTable};
use crate::Side;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrickOutcome {
    Won(Side),
    /// Both cards had the same power. Common, not an error.
    Tie,
}

impl TrickOutcome {
    pub const fn winner(&self) -> Option<Side> {
        match self {
            TrickOutcome::Won(side) => Some(*side),
            TrickOutcome::Tie => None,
        }
    }
}

impl std::fmt::Display for TrickOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrickOutcome::Won(side) => write!(f, "{side} wins the trick"),
            TrickOutcome::Tie => write!(f, "Trick tied"),
        }
    }
}

/// Compare side A's card against side B's card
pub fn resolve(table: &PowerTable, a: Card, b: Card) -> TrickOutcome {
    match table.power(a).cmp(&table.power(b)) {
        Ordering::Greater => TrickOutcome::Won(Side::A),
        Ordering::Less => TrickOutcome::Won(Side::B),
        Ordering::Equal => TrickOutcome::Tie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::{all_cards, cards_from_str};

    fn outcome(a: &'static str, b: &'static str) -> TrickOutcome {
        let t = PowerTable::new(all_cards().iter());
        resolve(&t, cards_from_str(a)[0], cards_from_str(b)[0])
    }

    #[test]
    fn higher_wins() {
        assert_eq!(outcome("3h", "2h"), TrickOutcome::Won(Side::A));
        assert_eq!(outcome("Qh", "Jd"), TrickOutcome::Won(Side::B));
        assert_eq!(outcome("4c", "3s"), TrickOutcome::Won(Side::A));
        assert_eq!(outcome("7d", "As"), TrickOutcome::Won(Side::B));
    }

    #[test]
    fn same_rank_ties() {
        assert_eq!(outcome("3h", "3s"), TrickOutcome::Tie);
        assert_eq!(outcome("4h", "4d"), TrickOutcome::Tie);
        assert_eq!(outcome("Kh", "Kc").winner(), None);
    }

    /// Swapping the cards swaps the winner
    #[test]
    fn antisymmetric() {
        let t = PowerTable::new(all_cards().iter());
        for a in all_cards() {
            for b in all_cards() {
                let ab = resolve(&t, a, b);
                let ba = resolve(&t, b, a);
                assert_eq!(ab.winner().map(Side::other), ba.winner());
            }
        }
    }
}
