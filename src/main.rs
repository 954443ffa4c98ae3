use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use connect_four::config::AppConfig;
use connect_four::game::{winning_line, Board, GameOutcome, Player};
use connect_four::logging;
use connect_four::session::{GameMode, Session};

/// Play Connect Four in the terminal, optionally against the negamax AI.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four against a negamax AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Who controls each seat
    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// Override the search depth
    #[arg(long)]
    depth: Option<usize>,

    /// Search without alpha-beta pruning
    #[arg(long)]
    no_pruning: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Reported once the logger is installed.
    let missing = missing_config_notice(&cli.config);
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(mode) = cli.mode {
        config.session.mode = mode;
    }
    if let Some(depth) = cli.depth {
        config.ai.max_depth = depth;
    }
    if cli.no_pruning {
        config.ai.alpha_beta = false;
    }
    config.validate().context("invalid configuration")?;

    logging::init(&config.logging).context("installing logger")?;
    if let Some(notice) = missing {
        log::warn!("{notice}");
    }

    let mut session = Session::with_search(config.session.mode, config.ai.clone());
    run(&mut session)
}

fn run(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        let board = session.state().board();
        println!("\n{board}");
        println!("state: {}", board.to_code(Player::Red));

        match session.outcome() {
            GameOutcome::Winner(player) => {
                println!("{} wins!", player.name());
                if let Some(cells) = describe_winning_line(board) {
                    println!("line: {cells}");
                }
            }
            GameOutcome::Draw => println!("Draw!"),
            GameOutcome::InProgress if session.ai_to_move() => {
                let (column, _) = session.step_ai().context("AI move")?;
                println!(
                    "AI ({}) plays column {column}",
                    session.state().current_player().other().name()
                );
                continue;
            }
            GameOutcome::InProgress => {}
        }

        if session.outcome().is_over() {
            print!("[r]eset or [q]uit: ");
        } else {
            print!(
                "{} to move, column 0-6 ([r]eset, [q]uit): ",
                session.state().current_player().name()
            );
        }
        stdout.flush().context("flushing stdout")?;

        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading stdin")?;
        match line.trim() {
            "q" | "quit" => return Ok(()),
            "r" | "reset" => session.reset(),
            input => match input.parse::<usize>() {
                Ok(column) => {
                    // Illegal clicks change nothing; just say why.
                    if let Err(err) = session.play_column(column) {
                        println!("{err}");
                    }
                }
                Err(_) => println!("not a column: {input:?}"),
            },
        }
    }
}

/// Notice for a config path that falls back to defaults.
fn missing_config_notice(path: &Path) -> Option<String> {
    (!path.exists())
        .then(|| format!("config file '{}' not found, using defaults", path.display()))
}

/// The winning four as `(row, col)` pairs.
fn describe_winning_line(board: &Board) -> Option<String> {
    let line = winning_line(board)?;
    let cells: Vec<String> = line
        .iter()
        .map(|(row, col)| format!("({row}, {col})"))
        .collect();
    Some(cells.join(" "))
}
