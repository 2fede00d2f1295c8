use std::error::Error;

use enum_map::EnumMap;
use structopt::StructOpt;
use truco_core::agent::{play_game, Agent, RandomAgent};
use truco_core::deck::DeckSeed;
use truco_core::{GameState, Side};

/// Pit two random agents against each other for a number of games
#[derive(StructOpt)]
struct Opt {
    #[structopt(short, long, default_value = "1000")]
    games: usize,
    #[structopt(long, default_value)]
    seed: DeckSeed,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();
    log::info!("Simulating {} games with seed {}", opt.games, opt.seed);
    // one rng drives everything, so a seed reproduces the whole run
    let mut rng = opt.seed.rng();
    let a: Box<dyn Agent> = Box::new(RandomAgent::new(&DeckSeed::from_rng(&mut rng)));
    let b: Box<dyn Agent> = Box::new(RandomAgent::new(&DeckSeed::from_rng(&mut rng)));
    let mut agents: EnumMap<Side, Box<dyn Agent>> = EnumMap::from_array([a, b]);
    let mut wins: EnumMap<Side, usize> = EnumMap::default();
    let mut rewards: EnumMap<Side, i64> = EnumMap::default();
    let mut rounds = 0;
    let mut actions = 0;
    for i in 0..opt.games {
        let mut gs = GameState::new(&DeckSeed::from_rng(&mut rng));
        let summary = play_game(&mut gs, &mut agents)?;
        log::debug!(
            "Game {}: {} wins {}-{}",
            i + 1,
            summary.winner,
            summary.scores[Side::A],
            summary.scores[Side::B]
        );
        wins[summary.winner] += 1;
        for side in [Side::A, Side::B] {
            rewards[side] += summary.rewards[side];
        }
        rounds += summary.rounds;
        actions += summary.actions;
    }
    let games = opt.games.max(1) as f64;
    for side in [Side::A, Side::B] {
        println!(
            "{} wins {:>6} ({:5.1}%), total reward {:>8}",
            side,
            wins[side],
            100.0 * wins[side] as f64 / games,
            rewards[side]
        );
    }
    println!("Average rounds per game  {:.2}", rounds as f64 / games);
    println!("Average actions per game {:.2}", actions as f64 / games);
    Ok(())
}
