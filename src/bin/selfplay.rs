use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use connect_four::ai::{Agent, NegamaxAgent, RandomAgent};
use connect_four::config::AppConfig;
use connect_four::game::{GameOutcome, GameState, Player};
use connect_four::logging;

/// Run headless matches between the negamax AI and an opponent.
#[derive(Parser)]
#[command(name = "selfplay", about = "Headless Connect Four AI matches")]
struct Cli {
    /// Opponent: negamax or random
    #[arg(long, default_value = "random")]
    opponent: String,

    /// Number of games; seats alternate every game
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Seed for the random opponent
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Default)]
struct Tally {
    wins: usize,
    losses: usize,
    draws: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.opponent.as_str() {
        "negamax" | "random" => {}
        other => bail!("unknown opponent '{}' (expected 'negamax' or 'random')", other),
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(depth) = cli.depth {
        config.ai.max_depth = depth;
    }
    config.validate().context("invalid configuration")?;
    logging::init(&config.logging).context("installing logger")?;

    let mut tally = Tally::default();
    let started = Instant::now();

    for game in 0..cli.games {
        let mut ai = NegamaxAgent::new(config.ai.clone());
        let mut opponent: Box<dyn Agent> = match cli.opponent.as_str() {
            "negamax" => Box::new(NegamaxAgent::new(config.ai.clone())),
            _ => match cli.seed {
                Some(seed) => Box::new(RandomAgent::with_seed(seed.wrapping_add(game as u64))),
                None => Box::new(RandomAgent::new()),
            },
        };
        let ai_seat = if game % 2 == 0 { Player::Red } else { Player::Yellow };

        let mut state = GameState::initial();
        while !state.is_terminal() {
            let agent: &mut dyn Agent = if state.current_player() == ai_seat {
                &mut ai
            } else {
                opponent.as_mut()
            };
            let column = agent
                .select_action(&state)
                .with_context(|| format!("{} found no move", agent.name()))?;
            state.apply_move_mut(column)?;
        }

        let result = match state.outcome() {
            GameOutcome::Winner(p) if p == ai_seat => {
                tally.wins += 1;
                "win"
            }
            GameOutcome::Winner(_) => {
                tally.losses += 1;
                "loss"
            }
            _ => {
                tally.draws += 1;
                "draw"
            }
        };
        println!(
            "game {:>3}: negamax as {:<6} {} in {} moves",
            game + 1,
            ai_seat.name(),
            result,
            state.turn()
        );
    }

    println!(
        "negamax vs {}: {} wins, {} losses, {} draws ({:.1}s)",
        cli.opponent,
        tally.wins,
        tally.losses,
        tally.draws,
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
