pub mod card;
pub mod deck;
pub mod hand;
pub mod power;

pub use card::Card;
pub use deck::{Deck, DeckError, DeckSeed};
pub use hand::Hand;
pub use power::{Power, PowerTable};
