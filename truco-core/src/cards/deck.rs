use super::card::{all_cards, Card, DECK_LEN};
use crate::HAND_SIZE;
use base64ct::{self, Base64, Encoding};
use rand::prelude::*;
use rand_chacha::ChaChaRng;
use std::error::Error;
use std::fmt;
use std::str::FromStr;

/// 13x3 = 39, one card short of `DECK_LEN`
pub const MAX_PLAYERS: u8 = (DECK_LEN / HAND_SIZE) as u8;
const SEED_LEN: usize = 32;
const ENCODED_SEED_LEN: usize = 4 * ((SEED_LEN + 3 - 1) / 3); // 4 * ceil(SEED_LEN / 3)

#[derive(PartialEq, Debug)]
pub enum DeckError {
    OutOfCards,
    TooManyPlayers,
    CantDealToNoPlayers,
    DeckSeedDecodeError(base64ct::Error),
}

impl Error for DeckError {}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::OutOfCards => write!(f, "No more cards in deck"),
            DeckError::TooManyPlayers => write!(f, "Too many players to deal"),
            DeckError::CantDealToNoPlayers => write!(f, "Need at least one player"),
            DeckError::DeckSeedDecodeError(e) => write!(f, "{}", e),
        }
    }
}

impl From<base64ct::Error> for DeckError {
    fn from(e: base64ct::Error) -> Self {
        Self::DeckSeedDecodeError(e)
    }
}

/// The cards not dealt yet. Thrown away once a round's hands are dealt.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new(&DeckSeed::default())
    }
}

impl Deck {
    /// Generate a new deck of all 40 cards, shuffled with the given seed
    pub fn new(seed: &DeckSeed) -> Self {
        let mut d = Deck {
            cards: all_cards().to_vec(),
        };
        d.seeded_shuffle(seed);
        d
    }

    pub fn seeded_shuffle(&mut self, seed: &DeckSeed) {
        let mut rng = seed.rng();
        // For determinism given the same seed, the cards need to be in a known order before shuffling.
        self.cards.sort_unstable_by_key(|c| (c.suit, c.rank));
        self.cards.shuffle(&mut rng)
    }

    /// Draw the topmost card and return it, or return and error if there are no more cards.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::OutOfCards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deal `HAND_SIZE` cards to each player, one card at a time around the table. The deck is
    /// shuffled, so taking from the top is the same as taking a uniformly random remaining card.
    pub fn deal_hands(&mut self, num_players: u8) -> Result<Vec<[Card; HAND_SIZE]>, DeckError> {
        if num_players > MAX_PLAYERS {
            return Err(DeckError::TooManyPlayers);
        } else if num_players < 1 {
            return Err(DeckError::CantDealToNoPlayers);
        } else if self.cards.len() < num_players as usize * HAND_SIZE {
            return Err(DeckError::OutOfCards);
        }
        let n = num_players as usize;
        let mut dealt = vec![Vec::with_capacity(HAND_SIZE); n];
        for i in 0..n * HAND_SIZE {
            dealt[i % n].push(self.draw()?);
        }
        Ok(dealt
            .into_iter()
            .map(|v| [v[0], v[1], v[2]])
            .collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckSeed([u8; SEED_LEN]);

impl DeckSeed {
    pub fn new(b: [u8; SEED_LEN]) -> Self {
        Self(b)
    }

    /// Take a seed from an existing RNG, e.g. one owned by a game so that every deck in the game
    /// follows from the game's seed.
    pub fn from_rng<R: RngCore>(rng: &mut R) -> Self {
        let mut b = [0u8; SEED_LEN];
        rng.fill_bytes(&mut b);
        Self(b)
    }

    /// A fresh RNG seeded from this seed
    pub fn rng(&self) -> ChaChaRng {
        ChaChaRng::from_seed(self.0)
    }
}

impl Default for DeckSeed {
    fn default() -> Self {
        Self::from_rng(&mut thread_rng())
    }
}

impl std::fmt::Display for DeckSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut b = [0u8; ENCODED_SEED_LEN];
        let s = Base64::encode(&self.0, &mut b).map_err(|_| fmt::Error)?;
        write!(f, "{}", s)
    }
}

impl FromStr for DeckSeed {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b: [u8; SEED_LEN] = [0; SEED_LEN];
        Base64::decode(s, &mut b)?;
        Ok(DeckSeed(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SEED1: DeckSeed = DeckSeed([1; SEED_LEN]);
    const SEED2: DeckSeed = DeckSeed([0; SEED_LEN]);

    #[test]
    fn right_len() {
        let d = Deck::default();
        assert_eq!(d.len(), DECK_LEN);
        let unique: HashSet<Card> = d.cards().iter().copied().collect();
        assert_eq!(unique.len(), DECK_LEN);
    }

    #[test]
    fn draw_all() {
        let mut d = Deck::default();
        for _ in 0..DECK_LEN {
            assert!(d.draw().is_ok());
        }
        assert_eq!(d.draw().unwrap_err(), DeckError::OutOfCards);
    }

    #[test]
    fn is_shuffled() {
        let d1 = Deck::new(&SEED1);
        let d2 = Deck::new(&SEED2);
        let unshuffled = all_cards().to_vec();
        // Either could match the sorted order by chance, but not both. Astronomically unlikely.
        assert!(d1.cards != unshuffled || d2.cards != unshuffled);
        assert_ne!(d1, d2);
    }

    /// Given a specific seed, the order of the cards should always be the same.
    #[test]
    fn deck_is_seedable() {
        let d1 = Deck::new(&SEED1);
        let d2 = Deck::new(&SEED1);
        assert_eq!(d1, d2);
    }

    #[test]
    fn deal_two() {
        let mut d = Deck::new(&SEED1);
        let top: Vec<Card> = d.cards().iter().rev().take(6).copied().collect();
        let hands = d.deal_hands(2).unwrap();
        assert_eq!(hands[0], [top[0], top[2], top[4]]);
        assert_eq!(hands[1], [top[1], top[3], top[5]]);
        assert_eq!(d.len(), DECK_LEN - 6);
    }

    /// Hands are disjoint and together with what's left make up the whole deck
    #[test]
    fn deal_partition() {
        for n in 1..=MAX_PLAYERS {
            let mut d = Deck::default();
            let hands = d.deal_hands(n).unwrap();
            assert_eq!(hands.len(), n as usize);
            let mut seen: HashSet<Card> = HashSet::new();
            for card in hands.iter().flatten() {
                assert!(seen.insert(*card), "{card} dealt twice");
            }
            for card in d.cards() {
                assert!(seen.insert(*card), "{card} dealt and still in deck");
            }
            assert_eq!(seen.len(), DECK_LEN);
        }
    }

    #[test]
    fn deal_bad_counts() {
        let mut d = Deck::default();
        assert_eq!(d.deal_hands(0).unwrap_err(), DeckError::CantDealToNoPlayers);
        assert_eq!(
            d.deal_hands(MAX_PLAYERS + 1).unwrap_err(),
            DeckError::TooManyPlayers
        );
        d.deal_hands(MAX_PLAYERS).unwrap();
        assert_eq!(d.deal_hands(1).unwrap_err(), DeckError::OutOfCards);
    }

    #[test]
    fn seed_to_from_string() {
        let d = DeckSeed::default();
        let s = d.to_string();
        let d2: DeckSeed = s.parse().unwrap();
        assert_eq!(d, d2);
        assert!("not base64!".parse::<DeckSeed>().is_err());
    }
}
