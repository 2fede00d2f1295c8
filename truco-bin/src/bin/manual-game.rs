use std::error::Error;
use std::io::{stdin, stdout, BufRead, Write};
use std::str::FromStr;

use itertools::Itertools;
use structopt::StructOpt;
use truco_core::agent::{Agent, RandomAgent};
use truco_core::deck::DeckSeed;
use truco_core::{Action, GameState, Side};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Opponent {
    Human,
    Random,
}

impl FromStr for Opponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "human" => Ok(Self::Human),
            "random" => Ok(Self::Random),
            _ => Err(format!("Unknown opponent '{s}', expected human or random")),
        }
    }
}

#[derive(StructOpt)]
struct Opt {
    #[structopt(long, default_value)]
    seed: DeckSeed,
    #[structopt(
        long,
        default_value = "random",
        help = "Who plays Player 2: human or random"
    )]
    opponent: Opponent,
    #[structopt(
        long,
        help = "Silence game prompts (useful for tests with set input)"
    )]
    no_prompts: bool,
    #[structopt(
        long,
        help = "Silence post-game info dump (useful when not doing tests)"
    )]
    no_summary: bool,
}

#[derive(Debug, Copy, Clone)]
enum Command {
    Action(Action),
    Info,
    Quit,
    Help,
}

fn print_help() {
    println!("Known commands are:");
    for (cmds, desc) in [
        ("(h)elp", "This output."),
        ("(i)nfo", "Get info on the current state of the round."),
        ("(q)uit", "Stop playing."),
        ("(p)lay N", "Play the card in slot N (0, 1 or 2). A bare N works too."),
        ("(t)ruco", "Call truco, or raise the stake if truco was called already."),
        ("(a)ccept", "Accept the truco or raise."),
        ("(d)ecline", "Decline the truco or raise, giving up the round."),
    ] {
        println!("  {:10}: {}", cmds, desc);
    }
    println!("Slots are numbered left to right, strongest card first.");
}

fn try_parse_action(buf: &str) -> Result<Action, Box<dyn Error>> {
    let words: Vec<&str> = buf.split_whitespace().collect();
    if words.is_empty() {
        return Err("Empty input".into());
    } else if words.len() != 1 && words.len() != 2 {
        return Err("Wrong number of words".into());
    }
    let a = match words[0] {
        "truco" | "t" | "raise" | "r" => Action::Call,
        "accept" | "a" => Action::Accept,
        "decline" | "d" => Action::Decline,
        "play" | "p" => {
            if words.len() != 2 {
                return Err("No slot given".into());
            }
            Action::Play(words[1].parse::<usize>()?)
        }
        w => Action::Play(w.parse::<usize>().map_err(|_| "Unable to parse first word as action")?),
    };
    Ok(a)
}

fn try_parse_command(stream: &mut dyn BufRead) -> Result<Command, Box<dyn Error>> {
    let mut s = String::new();
    let n = stream.read_line(&mut s)?;
    let words: Vec<&str> = s.split_whitespace().collect();
    if n == 0 {
        return Ok(Command::Quit);
    } else if s.starts_with('#') {
        return Err("Comment line".into());
    } else if words.is_empty() {
        return Err("Empty input".into());
    } else if words.len() == 1 {
        match words[0] {
            "info" | "i" => return Ok(Command::Info),
            "quit" | "q" => return Ok(Command::Quit),
            "help" | "h" => return Ok(Command::Help),
            _ => {}
        }
    }
    Ok(Command::Action(try_parse_action(&s)?))
}

fn prompt(q: &str, display_prompts: bool) -> Result<Command, Box<dyn Error>> {
    if display_prompts {
        println!("{}", q);
    }
    let c = loop {
        if display_prompts {
            print!("> ");
            stdout().flush()?;
        }
        match try_parse_command(&mut stdin().lock()) {
            Ok(c) => break c,
            Err(e) => println!("{}", e),
        }
    };
    Ok(c)
}

fn print_round_info(gs: &GameState) {
    let round = gs.round();
    println!(
        "Round {:>2}, trick {} of 3, worth {}",
        gs.round_number(),
        round.trick_number() + 1,
        gs.stake()
    );
    for side in [Side::A, Side::B] {
        println!(
            "  {} [{:>2} points] {} trick(s) won{}",
            side,
            gs.score(side),
            round.tricks_won(side),
            if gs.betting().trucable(side) {
                ", may call"
            } else {
                ""
            }
        );
    }
}

fn print_test_info(seed: &DeckSeed, gs: &GameState) {
    println!("seed {}", seed);
    println!("rounds {}", gs.round_number());
    for side in [Side::A, Side::B] {
        println!("{} score {}", side, gs.score(side));
    }
    match gs.winner() {
        Some(w) => println!("winner {}", w),
        None => println!("winner None"),
    }
}

/// Play until the game ends. Returns true if the player gave the quit command.
fn play(
    gs: &mut GameState,
    opponent: &mut Option<RandomAgent>,
    display_prompts: bool,
) -> Result<bool, Box<dyn Error>> {
    let mut seen = gs.last_seq_num();
    loop {
        if display_prompts {
            for (seq, item) in gs.changes_since(seen) {
                // dealt hands are shown at the prompt, only to the side holding them
                if !matches!(item, truco_core::log::LogItem::RoundDealt(..)) {
                    println!("  {}", item);
                }
                seen = seq;
            }
        }
        if gs.is_game_over() {
            return Ok(false);
        }
        let side = gs.current_side();
        if let (Side::B, Some(bot)) = (side, opponent.as_mut()) {
            let action = bot.choose_action(&gs.observation(), &gs.legal_actions());
            gs.apply(action)?;
            continue;
        }
        let round = gs.round();
        let q = format!(
            "{}'s action? Hand: {}  Table: {}  Legal: {}",
            side,
            round.hand(side),
            match round.played(side.other()) {
                None => "--".to_string(),
                Some(c) => c.to_string(),
            },
            gs.legal_actions().iter().join(" "),
        );
        match prompt(&q, display_prompts)? {
            Command::Info => {
                if display_prompts {
                    print_round_info(gs);
                }
            }
            Command::Quit => return Ok(true),
            Command::Help => {
                if display_prompts {
                    print_help();
                }
            }
            Command::Action(a) => match gs.apply(a) {
                Ok(_) => {}
                Err(e) => println!("{}", e),
            },
        }
        if display_prompts {
            println!();
        }
    }
}

/// Build the game and the opponent from the one seed, so `--seed` replays both
fn setup(seed: &DeckSeed, opponent: Opponent) -> (GameState, Option<RandomAgent>) {
    let mut rng = seed.rng();
    let gs = GameState::new(&DeckSeed::from_rng(&mut rng));
    let bot_seed = DeckSeed::from_rng(&mut rng);
    let bot = match opponent {
        Opponent::Human => None,
        Opponent::Random => Some(RandomAgent::new(&bot_seed)),
    };
    (gs, bot)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let opt = Opt::from_args();
    let (mut gs, mut opponent) = setup(&opt.seed, opt.opponent);
    if !opt.no_prompts {
        println!("Seed: {}", opt.seed);
        println!("First to {} points wins. Type 'help' for commands.", truco_core::WINNING_SCORE);
    }
    let quit = play(&mut gs, &mut opponent, !opt.no_prompts)?;
    log::info!("Game ended (quit={quit})");
    if !opt.no_summary {
        print_test_info(&opt.seed, &gs);
    }
    Ok(())
}
