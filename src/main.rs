//! Reversi-MCTS: play Reversi against the computer, or watch two computer
//! players compete.
//!
//! ## Usage
//!
//! - `reversi-mcts` - Show a demo game (greedy vs random)
//! - `reversi-mcts play --opponent mcts` - Play Black against the computer
//! - `reversi-mcts watch --p1 greedy --p2 mcts-combined --games 10` - Watch a match

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use fastrand::Rng;
use log::LevelFilter;

use reversi_mcts::GameError;
use reversi_mcts::game::{Game, GameOutcome, play_computer_game, run_match};
use reversi_mcts::mcts::{SearchConfig, dump_candidates, search};
use reversi_mcts::player::{Controller, Player, Strategy};
use reversi_mcts::position::{Color, Location, Position, parse_coord};

/// Reversi-MCTS: Reversi with heuristic and Monte Carlo players
#[derive(Parser)]
#[command(name = "reversi-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for the random number generator (reproducible games)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Total search time per Monte Carlo decision, in milliseconds
    #[arg(long, global = true, default_value_t = reversi_mcts::constants::SEARCH_BUDGET_MS)]
    budget_ms: u64,

    /// Maximum playouts per candidate move
    #[arg(long, global = true, default_value_t = reversi_mcts::constants::MAX_PLAYOUTS)]
    playouts: u32,

    /// Log search details to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play as Black (moving first) against a computer opponent
    Play {
        /// Computer strategy: random, greedy, mcts, mcts-combined (or 1-4)
        #[arg(long, default_value = "mcts-combined")]
        opponent: Strategy,
    },
    /// Watch two computer players play one or more games
    Watch {
        /// Strategy for the first player (Black)
        #[arg(long, default_value = "greedy")]
        p1: Strategy,
        /// Strategy for the second player (White)
        #[arg(long, default_value = "mcts")]
        p2: Strategy,
        /// Number of games to play
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=10_000))]
        games: u32,
    },
}

/// Minimal stderr sink for the `log` facade.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => return Ok(()),
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    log::set_logger(&LOGGER).map_err(|e| anyhow::anyhow!("failed to install logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = SearchConfig {
        budget: Duration::from_millis(cli.budget_ms),
        max_playouts: cli.playouts,
    };
    let mut rng = match cli.seed {
        Some(seed) => Rng::with_seed(seed),
        None => Rng::new(),
    };
    let verbose = cli.verbose > 0;

    match cli.command {
        Some(Commands::Play { opponent }) => run_play(opponent, &config, &mut rng, verbose),
        Some(Commands::Watch { p1, p2, games }) => run_watch(p1, p2, games, &config, &mut rng),
        None => run_demo(&config, &mut rng),
    }
}

/// Pick a computer move, dumping search statistics when verbose.
fn computer_move(
    strategy: Strategy,
    pos: &Position,
    color: Color,
    config: &SearchConfig,
    rng: &mut Rng,
    verbose: bool,
) -> Result<Location, GameError> {
    match strategy.playout_policy() {
        Some(policy) if verbose => {
            let result = search(pos, color, policy, config, rng)?;
            dump_candidates(&result);
            Ok(result.best)
        }
        _ => strategy.choose_move(pos, color, config, rng),
    }
}

fn print_results(outcome: &GameOutcome) {
    println!("The game is over as no one can make a move.");
    match outcome.winner {
        Some(Color::Black) => println!(
            "Player 1 wins by a score of {} to {}.",
            outcome.black, outcome.white
        ),
        Some(Color::White) => println!(
            "Player 2 wins by a score of {} to {}.",
            outcome.white, outcome.black
        ),
        None => println!("It's a tie as both players scored: {} points.", outcome.black),
    }
}

fn run_play(opponent: Strategy, config: &SearchConfig, rng: &mut Rng, verbose: bool) -> Result<()> {
    println!("You are Black (o) and move first. Enter moves as a column letter");
    println!("followed by a row number, e.g. \"g6\".\n");

    let human = Player::human(Color::Black);
    let cpu = Player::computer(Color::White, opponent);
    let mut game = Game::new();
    let mut lines = io::stdin().lock().lines();

    println!("{}", game.position());
    while !game.is_over() {
        let player = if game.to_move() == human.id() { human } else { cpu };
        if game.skip_if_stuck() {
            println!("{}", player.skip_turn());
            continue;
        }

        println!("{}", player.start_turn());
        match player.controller() {
            Controller::Human => loop {
                print!("> ");
                io::stdout().flush().context("failed to flush stdout")?;
                let Some(line) = lines.next() else {
                    bail!("input closed before the game ended");
                };
                let line = line.context("failed to read move")?;
                match parse_coord(&line).and_then(|loc| game.play(loc)) {
                    Ok(_) => break,
                    Err(e) => println!("Invalid move: {e}. Please re-enter."),
                }
            },
            Controller::Computer(strategy) => {
                let color = player.id();
                let mv = computer_move(strategy, game.position(), color, config, rng, verbose)?;
                println!("{} is making a move on square: {mv}", color.glyph());
                game.play(mv)?;
            }
        }
        println!("{}", game.position());
    }

    print_results(&game.outcome());
    println!("Player 2 played using {}.", opponent.describe());
    println!("\nThank you for playing!");
    Ok(())
}

fn run_watch(
    p1: Strategy,
    p2: Strategy,
    games: u32,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<()> {
    let tally = run_match(p1, p2, games, config, rng, |n, game| {
        println!("Game Number: {n}");
        println!("{}", game.position());
        print_results(&game.outcome());
        println!();
    })?;

    println!("Thank you for playing {} games!\n", tally.games());
    println!(
        "Player 2 won {} times, tied {} times, and lost {} times during {} games.\n",
        tally.wins,
        tally.draws,
        tally.losses,
        tally.games()
    );
    println!("Player 1 played using {}.", p1.describe());
    println!("Player 2 played using {}.", p2.describe());
    Ok(())
}

fn run_demo(config: &SearchConfig, rng: &mut Rng) -> Result<()> {
    println!("Reversi-MCTS: greedy (Black) vs random (White)\n");

    let game = play_computer_game(Strategy::Greedy, Strategy::Random, config, rng, |_| {})?;
    let moves: Vec<String> = game
        .history()
        .iter()
        .map(|(color, turn)| format!("{}:{turn}", color.glyph()))
        .collect();
    println!("Moves: {}\n", moves.join(" "));
    println!("{}", game.position());
    print_results(&game.outcome());
    Ok(())
}
