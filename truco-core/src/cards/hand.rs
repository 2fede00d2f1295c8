use super::card::Card;
use super::power::{Power, PowerTable};
use crate::ActionError;
use crate::HAND_SIZE;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

/// The cards a player holds during a round. Slots are always sorted strongest first with the
/// played (empty) slots at the end, so slot `i` is playable iff `i < self.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    slots: [Option<Card>; HAND_SIZE],
}

impl Hand {
    pub fn new(cards: [Card; HAND_SIZE], table: &PowerTable) -> Self {
        let mut h = Self {
            slots: cards.map(Some),
        };
        h.sort(table);
        h
    }

    fn sort(&mut self, table: &PowerTable) {
        self.slots
            .sort_by_key(|s| Reverse(s.map(|c| table.power(c))));
    }

    /// Take the card out of the given slot.
    pub fn play(&mut self, slot: usize, table: &PowerTable) -> Result<Card, ActionError> {
        let card = self
            .slots
            .get_mut(slot)
            .ok_or(ActionError::SlotOutOfRange(slot))?
            .take()
            .ok_or(ActionError::EmptySlot(slot))?;
        self.sort(table);
        Ok(card)
    }

    pub fn slots(&self) -> &[Option<Card>; HAND_SIZE] {
        &self.slots
    }

    pub fn powers(&self, table: &PowerTable) -> [Option<Power>; HAND_SIZE] {
        self.slots.map(|s| s.map(|c| table.power(c)))
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }

    /// Number of cards not played yet
    pub fn len(&self) -> usize {
        self.cards().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use itertools::Itertools;
        let s = self
            .slots
            .iter()
            .map(|s| match s {
                Some(c) => c.to_string(),
                None => "--".to_string(),
            })
            .join(" ");
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::{all_cards, cards_from_str};

    fn hand(s: &'static str, table: &PowerTable) -> Hand {
        let c = cards_from_str(s);
        Hand::new([c[0], c[1], c[2]], table)
    }

    #[test]
    fn sorted_on_deal() {
        let t = PowerTable::new(all_cards().iter());
        let h = hand("4d 4c 3h", &t);
        let expected = cards_from_str("4c 3h 4d");
        assert_eq!(h.cards().collect::<Vec<_>>(), expected);
        assert_eq!(h.to_string(), "4c 3h 4d");
    }

    #[test]
    fn play_resorts() {
        let t = PowerTable::new(all_cards().iter());
        let mut h = hand("2h 6c 4h", &t);
        let c = h.play(0, &t).unwrap();
        assert_eq!(c.to_string(), "2h");
        assert_eq!(h.to_string(), "6c 4h --");
        assert_eq!(h.len(), 2);
        let c = h.play(1, &t).unwrap();
        assert_eq!(c.to_string(), "4h");
        assert_eq!(h.to_string(), "6c -- --");
        let powers = h.powers(&t);
        assert_eq!(powers[0].map(|p| p.value()), Some(3));
        assert_eq!(powers[1], None);
    }

    #[test]
    fn play_bad_slots() {
        let t = PowerTable::new(all_cards().iter());
        let mut h = hand("2h 6c 4h", &t);
        h.play(2, &t).unwrap();
        let before = h;
        assert_eq!(h.play(2, &t).unwrap_err(), ActionError::EmptySlot(2));
        assert_eq!(h.play(3, &t).unwrap_err(), ActionError::SlotOutOfRange(3));
        assert_eq!(h, before);
    }

    #[test]
    fn play_everything() {
        let t = PowerTable::new(all_cards().iter());
        let mut h = hand("2h 6c 4h", &t);
        for _ in 0..HAND_SIZE {
            h.play(0, &t).unwrap();
        }
        assert!(h.is_empty());
        assert_eq!(h.cards().count(), 0);
    }
}
