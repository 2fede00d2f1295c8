use crate::cards::{Card, DeckSeed, Hand};
use crate::round::RoundOutcome;
use crate::stake::Stake;
use crate::trick::TrickOutcome;
use crate::{Score, SeqNum, Side};
use enum_map::EnumMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogItem {
    /// Round number, the side leading the first trick, and the hands
    RoundDealt(usize, Side, EnumMap<Side, Hand>),
    CardPlayed(Side, Card),
    TrickResolved(usize, TrickOutcome),
    Called(Side, Stake),
    Accepted(Side, Stake),
    /// The side that declined and the stake awarded to the other side
    Declined(Side, Stake),
    RoundEnded(RoundOutcome, Stake),
    ScoreChanged(EnumMap<Side, Score>, EnumMap<Side, Score>),
    GameOver(Side),
}

impl std::fmt::Display for LogItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogItem::RoundDealt(n, first, hands) => write!(
                f,
                "Round {n} dealt, {first} leads. {}: {}; {}: {}",
                Side::A,
                hands[Side::A],
                Side::B,
                hands[Side::B]
            ),
            LogItem::CardPlayed(side, card) => write!(f, "{side} plays {card}"),
            LogItem::TrickResolved(n, outcome) => write!(f, "Trick {}: {outcome}", n + 1),
            LogItem::Called(side, stake) => write!(f, "{side} raises the stake to {stake}"),
            LogItem::Accepted(side, stake) => write!(f, "{side} accepts, round worth {stake}"),
            LogItem::Declined(side, stake) => {
                write!(f, "{side} declines, {} takes {stake}", side.other())
            }
            LogItem::RoundEnded(outcome, stake) => match outcome {
                RoundOutcome::Won(side) => write!(f, "{side} wins the round for {stake}"),
                RoundOutcome::Tie => write!(f, "Round tied, nobody scores"),
                RoundOutcome::Undetermined => write!(f, "Round abandoned"),
            },
            LogItem::ScoreChanged(old, new) => write!(
                f,
                "Score changed from {}-{} to {}-{}",
                old[Side::A],
                old[Side::B],
                new[Side::A],
                new[Side::B]
            ),
            LogItem::GameOver(winner) => write!(f, "Game over, {winner} wins"),
        }
    }
}

/// Sequenced record of what happened. Items of the round in progress are active; every earlier
/// round's items are kept in the archive.
#[derive(Debug, PartialEq, Eq, Default, Clone, Serialize, Deserialize)]
pub(crate) struct Log {
    active: Vec<(SeqNum, LogItem)>,
    archive: Vec<(SeqNum, LogItem)>,
    last_seq_num: SeqNum,
    /// The seed of the game, so it can be replayed
    seed: Option<String>,
}

impl Log {
    pub(crate) fn new(seed: &DeckSeed) -> Self {
        Self {
            seed: Some(seed.to_string()),
            ..Default::default()
        }
    }

    pub(crate) fn push(&mut self, item: LogItem) {
        ::log::debug!("{item}");
        let seq = self.last_seq_num + 1;
        self.active.push((seq, item));
        self.last_seq_num = seq;
    }

    /// Start a new round: what was active moves to the archive
    pub(crate) fn rotate(&mut self) {
        self.archive.append(&mut self.active);
    }

    pub(crate) fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub(crate) const fn last_seq_num(&self) -> SeqNum {
        self.last_seq_num
    }

    pub(crate) fn items_since(
        &self,
        oldest_seq: SeqNum,
    ) -> impl Iterator<Item = (SeqNum, LogItem)> + '_ {
        let iter1 = self
            .archive
            .iter()
            .skip_while(move |(seq, _item)| *seq <= oldest_seq)
            .cloned();
        let iter2 = self
            .active
            .iter()
            .skip_while(move |(seq, _item)| *seq <= oldest_seq)
            .cloned();
        iter1.chain(iter2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers() {
        let mut l = Log::default();
        l.push(LogItem::GameOver(Side::A));
        l.push(LogItem::Called(Side::B, Stake::Four));
        assert_eq!(l.last_seq_num(), 2);
        let seqs: Vec<SeqNum> = l.items_since(0).map(|(s, _)| s).collect();
        assert_eq!(seqs, vec![1, 2]);
        let since: Vec<LogItem> = l.items_since(1).map(|(_, i)| i).collect();
        assert_eq!(since, vec![LogItem::Called(Side::B, Stake::Four)]);
    }

    #[test]
    fn rotate_keeps_everything() {
        let mut l = Log::default();
        l.push(LogItem::GameOver(Side::A));
        l.rotate();
        l.push(LogItem::GameOver(Side::B));
        l.rotate();
        l.push(LogItem::Called(Side::A, Stake::Four));
        assert_eq!(l.active.len(), 1);
        assert_eq!(l.archive.len(), 2);
        let seqs: Vec<SeqNum> = l.items_since(0).map(|(s, _)| s).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        let seqs: Vec<SeqNum> = l.items_since(2).map(|(s, _)| s).collect();
        assert_eq!(seqs, vec![3]);
    }

    #[test]
    fn display() {
        assert_eq!(
            LogItem::Declined(Side::A, Stake::Four).to_string(),
            "Player 1 declines, Player 2 takes 4"
        );
        assert_eq!(
            LogItem::TrickResolved(0, TrickOutcome::Tie).to_string(),
            "Trick 1: Trick tied"
        );
    }
}
