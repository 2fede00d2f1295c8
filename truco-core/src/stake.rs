//! Truco calls and the stake ladder.
//!
//! A round starts worth 2 points. A call raises it one rung (truco, then six, ten, twelve) and
//! must be answered by the other side before play continues. Accepting keeps the raised stake;
//! declining hands the caller the rung below it and ends the round.
use crate::{ActionError, Score, Side, WINNING_SCORE};
use enum_map::{enum_map, EnumMap};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stake {
    Two,
    Four,
    Six,
    Ten,
    Twelve,
}

impl Default for Stake {
    fn default() -> Self {
        Self::Two
    }
}

impl Stake {
    pub const fn points(self) -> Score {
        match self {
            Stake::Two => 2,
            Stake::Four => 4,
            Stake::Six => 6,
            Stake::Ten => 10,
            Stake::Twelve => 12,
        }
    }

    /// Position on the ladder, 0 through 4
    pub const fn rung(self) -> usize {
        self as usize
    }

    /// The next rung up, or None at the top of the ladder
    pub const fn raised(self) -> Option<Self> {
        match self {
            Stake::Two => Some(Stake::Four),
            Stake::Four => Some(Stake::Six),
            Stake::Six => Some(Stake::Ten),
            Stake::Ten => Some(Stake::Twelve),
            Stake::Twelve => None,
        }
    }

    /// The rung below. Two is the floor and stays put.
    pub const fn lowered(self) -> Self {
        match self {
            Stake::Two | Stake::Four => Stake::Two,
            Stake::Six => Stake::Four,
            Stake::Ten => Stake::Six,
            Stake::Twelve => Stake::Ten,
        }
    }
}

impl std::fmt::Display for Stake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Betting state of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Betting {
    stake: Stake,
    /// Whether each side may call right now
    trucable: EnumMap<Side, bool>,
    /// The side whose call is waiting for an answer
    caller: Option<Side>,
}

impl Default for Betting {
    fn default() -> Self {
        Self {
            stake: Stake::Two,
            trucable: enum_map! { _ => true },
            caller: None,
        }
    }
}

impl Betting {
    pub const fn stake(&self) -> Stake {
        self.stake
    }

    pub fn trucable(&self, side: Side) -> bool {
        self.trucable[side]
    }

    /// True while a call waits for accept or decline
    pub const fn respond(&self) -> bool {
        self.caller.is_some()
    }

    pub const fn caller(&self) -> Option<Side> {
        self.caller
    }

    pub fn can_call(&self, side: Side) -> bool {
        !self.respond() && self.trucable[side] && self.stake.raised().is_some()
    }

    /// `caller` asks to raise the stake. Returns the raised stake.
    ///
    /// The other side gets the right to raise again, unless the raised stake would end the game
    /// whoever wins it, in which case nobody may call any more this round.
    pub fn call(
        &mut self,
        caller: Side,
        scores: &EnumMap<Side, Score>,
    ) -> Result<Stake, ActionError> {
        if self.respond() {
            return Err(ActionError::MustRespond);
        } else if !self.trucable[caller] {
            return Err(ActionError::NotTrucable);
        }
        let raised = self.stake.raised().ok_or(ActionError::StakeAtMaximum)?;
        // this is the only place the stake goes up
        self.stake = raised;
        self.caller = Some(caller);
        let clinches = scores
            .values()
            .all(|s| s.saturating_add(raised.points()) >= WINNING_SCORE);
        let closed = clinches || raised.raised().is_none();
        self.trucable[caller] = false;
        self.trucable[caller.other()] = !closed;
        Ok(raised)
    }

    /// Answer the pending call with yes. Returns the side that called.
    pub fn accept(&mut self) -> Result<Side, ActionError> {
        self.caller.take().ok_or(ActionError::NoCallPending)
    }

    /// Answer the pending call with no. Returns the side that called, who takes the round, and
    /// what the round is worth to them.
    pub fn decline(&mut self) -> Result<(Side, Stake), ActionError> {
        let caller = self.caller.take().ok_or(ActionError::NoCallPending)?;
        self.stake = self.stake.lowered();
        Ok((caller, self.stake))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Side = Side::A;
    const B: Side = Side::B;

    fn scores(a: Score, b: Score) -> EnumMap<Side, Score> {
        enum_map! { Side::A => a, Side::B => b }
    }

    #[test]
    fn ladder() {
        let mut s = Stake::Two;
        let mut seen = vec![s.points()];
        while let Some(next) = s.raised() {
            assert_eq!(next.lowered(), s);
            assert_eq!(next.rung(), s.rung() + 1);
            s = next;
            seen.push(s.points());
        }
        assert_eq!(seen, vec![2, 4, 6, 10, 12]);
        assert_eq!(Stake::Two.lowered(), Stake::Two);
    }

    #[test]
    fn call_passes_the_right_to_raise() {
        let mut b = Betting::default();
        assert!(b.can_call(A) && b.can_call(B));
        assert_eq!(b.call(A, &scores(0, 0)).unwrap(), Stake::Four);
        assert!(b.respond());
        assert!(!b.trucable(A));
        assert!(b.trucable(B));
        // nobody calls while a call is pending
        assert!(!b.can_call(B));
        assert_eq!(b.call(B, &scores(0, 0)).unwrap_err(), ActionError::MustRespond);
        assert_eq!(b.accept().unwrap(), A);
        assert!(!b.respond());
        assert_eq!(b.call(A, &scores(0, 0)).unwrap_err(), ActionError::NotTrucable);
        assert_eq!(b.call(B, &scores(0, 0)).unwrap(), Stake::Six);
        assert!(b.trucable(A) && !b.trucable(B));
    }

    #[test]
    fn all_the_way_up() {
        let mut b = Betting::default();
        let mut side = A;
        for expected in [Stake::Four, Stake::Six, Stake::Ten, Stake::Twelve] {
            assert_eq!(b.call(side, &scores(0, 0)).unwrap(), expected);
            b.accept().unwrap();
            side = side.other();
        }
        assert_eq!(b.stake(), Stake::Twelve);
        // top of the ladder closes calling for both
        assert!(!b.trucable(A) && !b.trucable(B));
        assert!(!b.can_call(A) && !b.can_call(B));
        assert_eq!(b.call(side, &scores(0, 0)).unwrap_err(), ActionError::NotTrucable);
    }

    #[test]
    fn at_maximum() {
        let mut b = Betting {
            stake: Stake::Twelve,
            trucable: enum_map! { _ => true },
            caller: None,
        };
        assert_eq!(b.call(A, &scores(0, 0)).unwrap_err(), ActionError::StakeAtMaximum);
        assert_eq!(b.stake(), Stake::Twelve);
        assert!(b.trucable(A));
    }

    /// When either side winning the round would end the game, raising further is pointless
    #[test]
    fn clinching_closes_calls() {
        let mut b = Betting::default();
        b.call(A, &scores(8, 9)).unwrap();
        assert!(!b.trucable(A) && !b.trucable(B));
        // only one side would clinch, so it stays open
        let mut b = Betting::default();
        b.call(A, &scores(8, 2)).unwrap();
        assert!(b.trucable(B));
    }

    #[test]
    fn decline_steps_down() {
        for (calls, awarded) in [(1, 2), (2, 4), (3, 6), (4, 10)] {
            let mut b = Betting::default();
            let mut side = A;
            for i in 0..calls {
                b.call(side, &scores(0, 0)).unwrap();
                if i + 1 < calls {
                    b.accept().unwrap();
                    side = side.other();
                }
            }
            let (winner, stake) = b.decline().unwrap();
            assert_eq!(winner, side);
            assert_eq!(stake.points(), awarded);
            assert!(!b.respond());
        }
    }

    #[test]
    fn nothing_to_answer() {
        let mut b = Betting::default();
        assert_eq!(b.accept().unwrap_err(), ActionError::NoCallPending);
        assert_eq!(b.decline().unwrap_err(), ActionError::NoCallPending);
        assert_eq!(b, Betting::default());
    }
}
