use crate::action::Action;
use crate::cards::card::all_cards;
use crate::cards::{Deck, DeckError, DeckSeed, Hand, PowerTable};
use crate::log::{Log, LogItem};
use crate::observation::Observation;
use crate::round::{Round, RoundOutcome};
use crate::stake::{Betting, Stake};
use crate::trick::TrickOutcome;
use crate::{ActionError, GameError, Score, SeqNum, Side, WINNING_SCORE};
use ::log::{debug, info};
use enum_map::{enum_map, EnumMap};
use rand::{Rng, RngCore};
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

/// The engine is played 1v1
const NUM_PLAYERS: u8 = 2;

/// Result of applying one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// What the side to act next sees
    pub observation: Observation,
    /// Points won (positive) or lost (negative) by `actor` with this action
    pub reward: i32,
    pub game_over: bool,
    /// Whether this action ended a round. If the game isn't over, a new round has been dealt.
    pub round_over: bool,
    pub legal_actions: Vec<Action>,
    /// The side that took the action
    pub actor: Side,
}

/// All the state constituting a game in progress.
///
/// The game owns a seeded RNG and takes every deck's seed from it, so two games created from the
/// same seed and fed the same actions are identical.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Card powers, built once for the whole game
    table: PowerTable,
    rng: ChaChaRng,
    round: Round,
    betting: Betting,
    scores: EnumMap<Side, Score>,
    /// Side to act
    current: Side,
    /// Side that led the first trick of the current round. Alternates every round.
    round_starter: Side,
    /// 1-based count of rounds dealt since the score was last reset
    round_number: usize,
    /// Set once a side reaches `WINNING_SCORE`. Nothing changes after that.
    winner: Option<Side>,
    logs: Log,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&DeckSeed::default())
    }
}

fn deal_round<R: RngCore>(rng: &mut R, table: &PowerTable) -> Result<Round, DeckError> {
    let mut deck = Deck::new(&DeckSeed::from_rng(rng));
    let mut hands = deck.deal_hands(NUM_PLAYERS)?;
    let b = hands.pop().ok_or(DeckError::OutOfCards)?;
    let a = hands.pop().ok_or(DeckError::OutOfCards)?;
    Ok(Round::new(enum_map! {
        Side::A => Hand::new(a, table),
        Side::B => Hand::new(b, table),
    }))
}

impl GameState {
    /// Start a game with the first round already dealt
    pub fn new(seed: &DeckSeed) -> Self {
        let mut rng = seed.rng();
        let table = PowerTable::new(all_cards().iter());
        let starter = if rng.gen::<bool>() { Side::A } else { Side::B };
        let round = deal_round(&mut rng, &table)
            .expect("A fresh deck always has enough cards for two hands");
        let mut gs = Self {
            table,
            rng,
            round,
            betting: Betting::default(),
            scores: EnumMap::default(),
            current: starter,
            round_starter: starter,
            round_number: 1,
            winner: None,
            logs: Log::new(seed),
        };
        gs.logs
            .push(LogItem::RoundDealt(gs.round_number, starter, gs.round.hands));
        gs
    }

    /// Throw away the current round and deal a new one. Unless `keep_game_score`, the game
    /// starts over from 0-0.
    ///
    /// A finished game can only be reset from 0-0. Keeping its score returns
    /// [`ActionError::GameOver`] and leaves the state untouched.
    pub fn reset(
        &mut self,
        keep_game_score: bool,
    ) -> Result<(Observation, Vec<Action>), GameError> {
        if keep_game_score && self.is_game_over() {
            return Err(ActionError::GameOver.into());
        }
        if !keep_game_score {
            self.scores = EnumMap::default();
            self.winner = None;
            self.round_number = 0;
        }
        self.start_round()?;
        Ok((self.observation(), self.legal_actions()))
    }

    /// Apply `action` for the side to act.
    ///
    /// An illegal action returns an error and leaves the state exactly as it was.
    pub fn apply(&mut self, action: Action) -> Result<Step, GameError> {
        if self.is_game_over() {
            return Err(ActionError::GameOver.into());
        }
        let actor = self.current;
        let (reward, round_over) = match action {
            Action::Play(slot) => self.play_card(slot)?,
            Action::Call => self.call()?,
            Action::Accept => self.accept()?,
            Action::Decline => self.decline()?,
        };
        Ok(Step {
            observation: self.observation(),
            reward,
            game_over: self.is_game_over(),
            round_over,
            legal_actions: self.legal_actions(),
            actor,
        })
    }

    /// Like [`Self::apply`] but with the integer encoding of the action
    pub fn apply_index(&mut self, action: usize) -> Result<Step, GameError> {
        self.apply(Action::try_from(action)?)
    }

    /// Every action the side to act may take right now. Empty once the game is over.
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_game_over() {
            return vec![];
        }
        if self.betting.respond() {
            return vec![Action::Accept, Action::Decline];
        }
        let mut v: Vec<Action> = (0..self.round.hand(self.current).len())
            .map(Action::Play)
            .collect();
        if self.betting.can_call(self.current) {
            v.push(Action::Call);
        }
        v
    }

    /// What the side to act can see
    pub fn observation(&self) -> Observation {
        let me = self.current;
        Observation {
            hand: self.round.hand(me).powers(&self.table),
            other_card: self.round.played(me.other()).map(|c| self.table.power(c)),
            first_trick: self.round.first_trick(),
            my_score: self.scores[me],
            other_score: self.scores[me.other()],
            stake_rung: self.betting.stake().rung(),
            trucable: self.betting.trucable(me),
            respond: self.betting.respond(),
            card_frequency: *self.round.card_frequency(),
        }
    }

    fn play_card(&mut self, slot: usize) -> Result<(i32, bool), GameError> {
        if self.betting.respond() {
            return Err(ActionError::MustRespond.into());
        }
        let side = self.current;
        let (card, trick) = self.round.play(side, slot, &self.table)?;
        self.logs.push(LogItem::CardPlayed(side, card));
        let trick = match trick {
            Some(trick) => trick,
            None => {
                // other side still has to answer this trick
                self.current = side.other();
                return Ok((0, false));
            }
        };
        self.logs
            .push(LogItem::TrickResolved(self.round.trick_number(), trick));
        let outcome = self.round.finish_trick(trick);
        // the winner leads the next trick. On a tie, whoever led this one leads again.
        self.current = match trick {
            TrickOutcome::Won(winner) => winner,
            TrickOutcome::Tie => side.other(),
        };
        if outcome.is_over() {
            let reward = self.finish_round(outcome, side)?;
            Ok((reward, true))
        } else {
            Ok((0, false))
        }
    }

    fn call(&mut self) -> Result<(i32, bool), GameError> {
        let side = self.current;
        let stake = self.betting.call(side, &self.scores)?;
        self.logs.push(LogItem::Called(side, stake));
        self.current = side.other();
        Ok((0, false))
    }

    fn accept(&mut self) -> Result<(i32, bool), GameError> {
        let caller = self.betting.accept()?;
        self.logs
            .push(LogItem::Accepted(self.current, self.betting.stake()));
        // play picks up where the call interrupted it
        self.current = caller;
        Ok((0, false))
    }

    fn decline(&mut self) -> Result<(i32, bool), GameError> {
        let decliner = self.current;
        let (winner, stake) = self.betting.decline()?;
        self.logs.push(LogItem::Declined(decliner, stake));
        let reward = self.finish_round(RoundOutcome::Won(winner), decliner)?;
        Ok((reward, true))
    }

    /// Pay out the round at the current stake and deal the next one, unless the game is over.
    /// Returns the reward from `actor`'s point of view.
    fn finish_round(&mut self, outcome: RoundOutcome, actor: Side) -> Result<i32, GameError> {
        let stake = self.betting.stake();
        self.logs.push(LogItem::RoundEnded(outcome, stake));
        let reward = match outcome {
            RoundOutcome::Won(winner) => {
                self.award(winner, stake);
                let points = stake.points() as i32;
                if winner == actor {
                    points
                } else {
                    -points
                }
            }
            RoundOutcome::Tie | RoundOutcome::Undetermined => 0,
        };
        info!(
            "Round {} over ({:?}), score {}-{}",
            self.round_number,
            outcome,
            self.scores[Side::A],
            self.scores[Side::B]
        );
        if !self.is_game_over() {
            self.start_round()?;
        }
        Ok(reward)
    }

    fn award(&mut self, side: Side, stake: Stake) {
        let old = self.scores;
        // this is the only place the score should ever change
        self.scores[side] = self.scores[side].saturating_add(stake.points());
        self.logs.push(LogItem::ScoreChanged(old, self.scores));
        if self.scores[side] >= WINNING_SCORE {
            self.winner = Some(side);
            self.logs.push(LogItem::GameOver(side));
            info!("{side} wins the game after {} rounds", self.round_number);
        }
    }

    fn start_round(&mut self) -> Result<(), GameError> {
        self.logs.rotate();
        self.round = deal_round(&mut self.rng, &self.table)?;
        self.betting = Betting::default();
        self.round_starter = self.round_starter.other();
        self.current = self.round_starter;
        self.round_number += 1;
        debug!("Dealing round {}", self.round_number);
        self.logs.push(LogItem::RoundDealt(
            self.round_number,
            self.current,
            self.round.hands,
        ));
        Ok(())
    }
}

impl GameState {
    pub const fn current_side(&self) -> Side {
        self.current
    }

    pub fn score(&self, side: Side) -> Score {
        self.scores[side]
    }

    pub const fn scores(&self) -> &EnumMap<Side, Score> {
        &self.scores
    }

    pub const fn stake(&self) -> Stake {
        self.betting.stake()
    }

    pub const fn betting(&self) -> &Betting {
        &self.betting
    }

    pub const fn round(&self) -> &Round {
        &self.round
    }

    pub const fn table(&self) -> &PowerTable {
        &self.table
    }

    pub const fn round_number(&self) -> usize {
        self.round_number
    }

    pub const fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub const fn is_game_over(&self) -> bool {
        self.winner.is_some()
    }

    /// The seed this game was created with, in its text form
    pub fn seed(&self) -> Option<&str> {
        self.logs.seed()
    }

    pub const fn last_seq_num(&self) -> SeqNum {
        self.logs.last_seq_num()
    }

    /// Log items newer than `seq`, from any round of this game
    pub fn changes_since(&self, seq: SeqNum) -> impl Iterator<Item = (SeqNum, LogItem)> + '_ {
        self.logs.items_since(seq)
    }
}
