use enum_map::Enum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
pub const CLUB: char = 'c';
pub const HEART: char = 'h';
pub const SPADE: char = 's';
pub const DIAMOND: char = 'd';
pub const ALL_SUITS: [Suit; 4] = [Suit::Club, Suit::Heart, Suit::Spade, Suit::Diamond];
/// Ordered weakest to strongest, ignoring manilhas
pub const ALL_RANKS: [Rank; 10] = [
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Queen,
    Rank::Jack,
    Rank::King,
    Rank::Ace,
    Rank::Two,
    Rank::Three,
];
pub const DECK_LEN: usize = ALL_RANKS.len() * ALL_SUITS.len();

/// 4 of clubs
pub const ZAP: Card = Card::new(Suit::Club, Rank::Four);
/// 7 of hearts
pub const COPETA: Card = Card::new(Suit::Heart, Rank::Seven);
/// Ace of spades
pub const ESPADILHA: Card = Card::new(Suit::Spade, Rank::Ace);
/// 7 of diamonds
pub const OURITO: Card = Card::new(Suit::Diamond, Rank::Seven);
/// The four manilhas, strongest first
pub const MANILHAS: [Card; 4] = [ZAP, COPETA, ESPADILHA, OURITO];

/// Truco is played without 8s, 9s and 10s. The declaration order is the rank ladder, so the
/// derived `Ord` compares ranks the way the game does (manilhas aside).
#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Queen,
    Jack,
    King,
    Ace,
    Two,
    Three,
}

impl Rank {
    /// Position on the rank ladder, 1 (Four) through 10 (Three)
    pub const fn ladder(&self) -> u8 {
        use Rank::*;
        match *self {
            Four => 1,
            Five => 2,
            Six => 3,
            Seven => 4,
            Queen => 5,
            Jack => 6,
            King => 7,
            Ace => 8,
            Two => 9,
            Three => 10,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Four => write!(f, "4"),
            Self::Five => write!(f, "5"),
            Self::Six => write!(f, "6"),
            Self::Seven => write!(f, "7"),
            Self::Queen => write!(f, "Q"),
            Self::Jack => write!(f, "J"),
            Self::King => write!(f, "K"),
            Self::Ace => write!(f, "A"),
            Self::Two => write!(f, "2"),
            Self::Three => write!(f, "3"),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            'Q' => Ok(Rank::Queen),
            'J' => Ok(Rank::Jack),
            'K' => Ok(Rank::King),
            'A' => Ok(Rank::Ace),
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            _ => Err(format!("Bad rank '{c}'")),
        }
    }
}

#[derive(
    Hash, Enum, Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize,
)]
pub enum Suit {
    Club,
    Heart,
    Spade,
    Diamond,
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Club => write!(f, "{}", CLUB),
            Self::Heart => write!(f, "{}", HEART),
            Self::Spade => write!(f, "{}", SPADE),
            Self::Diamond => write!(f, "{}", DIAMOND),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            CLUB => Ok(Self::Club),
            HEART => Ok(Self::Heart),
            SPADE => Ok(Self::Spade),
            DIAMOND => Ok(Self::Diamond),
            _ => Err(format!("Bad suit '{c}'")),
        }
    }
}

/// Card identity. Deliberately not `Ord`: how strong a card is depends on the power table it is
/// looked up in, see [`super::power::PowerTable`].
#[derive(Hash, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = s.chars();
        let (r, s) = match (i.next(), i.next(), i.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err(format!("Failed to parse card '{s}'")),
        };
        Ok(Card::new(Suit::try_from(s)?, Rank::try_from(r)?))
    }
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card { suit, rank }
    }

    pub fn is_manilha(&self) -> bool {
        MANILHAS.contains(self)
    }
}

/// Returns an UNSHUFFLED array of the 40 cards
pub fn all_cards() -> [Card; DECK_LEN] {
    use itertools::Itertools;
    let mut cards: [Card; DECK_LEN] = [ZAP; DECK_LEN];
    let c_iter = ALL_SUITS
        .iter()
        .cartesian_product(ALL_RANKS.iter())
        .map(|x| Card::new(*x.0, *x.1));
    for (i, c) in c_iter.enumerate() {
        cards[i] = c;
    }
    cards
}

#[cfg(test)]
pub(crate) fn cards_from_str(s: &'static str) -> Vec<Card> {
    s.split_whitespace()
        .map(|c| c.parse().expect("bad card in test string"))
        .collect()
}
