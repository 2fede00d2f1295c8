//! The strict order of the 40-card deck.
//!
//! Manilhas always take the top four powers (11 through 14). Every other card is ranked by its
//! rank alone, so the up-to-four copies of a rank all share a power and tie against each other.
use super::card::{Card, MANILHAS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Highest power a card can have (the Zap)
pub const MAX_POWER: u8 = 14;

#[derive(
    Hash,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub struct Power(u8);

impl Power {
    /// The power a card has. Pure function of the card identity.
    pub fn of(card: Card) -> Self {
        match MANILHAS.iter().position(|m| *m == card) {
            Some(i) => Self(MAX_POWER - i as u8),
            None => Self(card.rank.ladder()),
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Power lookup for every card of one deck. Built once and then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowerTable {
    powers: HashMap<Card, Power>,
}

impl PowerTable {
    pub fn new<'a, I: IntoIterator<Item = &'a Card>>(cards: I) -> Self {
        Self {
            powers: cards.into_iter().map(|c| (*c, Power::of(*c))).collect(),
        }
    }

    /// Power of the given card.
    ///
    /// Panics if the card was not part of the deck this table was built from. Cards only ever
    /// come from that deck, so this would be a bug and not something a player can cause.
    pub fn power(&self, card: Card) -> Power {
        *self
            .powers
            .get(&card)
            .expect("Card is not part of this power table's deck")
    }

    pub fn len(&self) -> usize {
        self.powers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::{all_cards, cards_from_str, Rank};
    use itertools::Itertools;

    fn table() -> PowerTable {
        PowerTable::new(all_cards().iter())
    }

    #[test]
    fn manilha_powers() {
        let t = table();
        let powers: Vec<u8> = cards_from_str("4c 7h As 7d")
            .into_iter()
            .map(|c| t.power(c).value())
            .collect();
        assert_eq!(powers, vec![14, 13, 12, 11]);
    }

    #[test]
    fn manilhas_beat_everything() {
        let t = table();
        let weakest_manilha = MANILHAS.iter().map(|c| t.power(*c)).min().unwrap();
        for c in all_cards().iter().filter(|c| !c.is_manilha()) {
            assert!(t.power(*c) < weakest_manilha, "{c} outranks a manilha");
        }
    }

    #[test]
    fn rank_ladder() {
        let t = table();
        for (s, p) in [
            ("3h", 10),
            ("2d", 9),
            ("Ah", 8),
            ("Kc", 7),
            ("Js", 6),
            ("Qd", 5),
            ("7s", 4),
            ("6c", 3),
            ("5h", 2),
            ("4d", 1),
        ] {
            assert_eq!(t.power(s.parse().unwrap()).value(), p, "{s}");
        }
    }

    /// Same rank means same power, different rank means different power
    #[test]
    fn total_order() {
        let t = table();
        for (a, b) in all_cards()
            .iter()
            .filter(|c| !c.is_manilha())
            .tuple_combinations()
        {
            assert_eq!(a.rank == b.rank, t.power(*a) == t.power(*b));
            assert_eq!(a.rank < b.rank, t.power(*a) < t.power(*b));
        }
    }

    /// How many cards there are of each power
    #[test]
    fn power_counts() {
        let t = table();
        let counts = all_cards().iter().map(|c| t.power(*c).value()).counts();
        assert_eq!(counts[&Rank::Ace.ladder()], 3);
        assert_eq!(counts[&Rank::Seven.ladder()], 2);
        assert_eq!(counts[&Rank::Four.ladder()], 3);
        assert_eq!(counts[&Rank::King.ladder()], 4);
        for p in 11..=MAX_POWER {
            assert_eq!(counts[&p], 1);
        }
        assert_eq!(t.len(), 40);
    }

    #[test]
    #[should_panic]
    fn foreign_card() {
        let t = PowerTable::new(cards_from_str("4c 3h").iter());
        t.power("Ah".parse().unwrap());
    }
}
