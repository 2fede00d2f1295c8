//! Whatever picks the actions. The engine never looks at what kind of agent it is dealing with.
use crate::action::{Action, NUM_ACTIONS};
use crate::cards::DeckSeed;
use crate::observation::{Observation, NUM_FEATURES};
use crate::state::GameState;
use crate::{GameError, Score, Side};
use enum_map::EnumMap;
use rand::seq::SliceRandom;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

pub trait Agent {
    /// Pick one of `legal`, which is never empty
    fn choose_action(&mut self, obs: &Observation, legal: &[Action]) -> Action;
}

/// Picks uniformly among the legal actions
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: ChaChaRng,
}

impl RandomAgent {
    pub fn new(seed: &DeckSeed) -> Self {
        Self { rng: seed.rng() }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new(&DeckSeed::default())
    }
}

impl Agent for RandomAgent {
    fn choose_action(&mut self, _obs: &Observation, legal: &[Action]) -> Action {
        *legal
            .choose(&mut self.rng)
            .expect("Asked to choose from no legal actions")
    }
}

/// Scores every encoded action from the observation's features and plays the best legal one.
/// The scoring function is typically a trained network.
pub struct ScoringAgent<F> {
    score: F,
}

impl<F> ScoringAgent<F>
where
    F: FnMut(&[i64; NUM_FEATURES]) -> [f32; NUM_ACTIONS],
{
    pub fn new(score: F) -> Self {
        Self { score }
    }
}

impl<F> Agent for ScoringAgent<F>
where
    F: FnMut(&[i64; NUM_FEATURES]) -> [f32; NUM_ACTIONS],
{
    fn choose_action(&mut self, obs: &Observation, legal: &[Action]) -> Action {
        let (first, rest) = legal
            .split_first()
            .expect("Asked to choose from no legal actions");
        let values = (self.score)(&obs.features());
        // first one wins ties
        let mut best = *first;
        for a in rest {
            if values[a.index()] > values[best.index()] {
                best = *a;
            }
        }
        best
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub winner: Side,
    pub scores: EnumMap<Side, Score>,
    pub rounds: usize,
    pub actions: usize,
    /// Sum of every step's reward, credited to each side
    pub rewards: EnumMap<Side, i64>,
}

/// Play one game from 0-0 to the end, asking `agents` for every action.
///
/// An agent that picks an illegal action stops the game with the error.
pub fn play_game(
    state: &mut GameState,
    agents: &mut EnumMap<Side, Box<dyn Agent>>,
) -> Result<GameSummary, GameError> {
    let (mut obs, mut legal) = state.reset(false)?;
    let mut rewards: EnumMap<Side, i64> = EnumMap::default();
    let mut actions = 0;
    loop {
        let side = state.current_side();
        let action = agents[side].choose_action(&obs, &legal);
        let step = state.apply(action)?;
        actions += 1;
        rewards[step.actor] += step.reward as i64;
        rewards[step.actor.other()] -= step.reward as i64;
        if step.game_over {
            break;
        }
        obs = step.observation;
        legal = step.legal_actions;
    }
    let winner = state
        .winner()
        .expect("Game loop only ends once there is a winner");
    Ok(GameSummary {
        winner,
        scores: *state.scores(),
        rounds: state.round_number(),
        actions,
        rewards,
    })
}
