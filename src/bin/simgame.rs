//! simgame - pit strategies against each other over a series of games.
//!
//! ```text
//! simgame --game tictactoe --player mcts1000 --player perfect --runs 20
//! ```
//!
//! Players: `random`, `mctsN` (N trials per move), `perfect` (tic-tac-toe only).
//! After each run the cumulative tally is printed as `draw,<players>` then
//! counts and rates.

use anyhow::Result;
use clap::Parser;
use rand::RngCore;
use tracing::info;

use rust_mcts::agents::{Player, RandomPlayer};
use rust_mcts::driver::{play_game, MatchTally};
use rust_mcts::games::{Backgammon, Checkers, ConnectFour, PerfectPlayer, TicTacToe};
use rust_mcts::mcts::{MctsConfig, MctsPlayer};
use rust_mcts::rules::Game;
use rust_mcts::{GameRng, MctsError};

#[derive(Parser, Debug)]
#[command(name = "simgame")]
#[command(about = "Play turn-based games between random, MCTS and rule-based players")]
struct Args {
    /// Game to play: tictactoe, connectfour, checkers, backgammon
    #[arg(long, short, default_value = "tictactoe")]
    game: String,

    /// Player for the next seat (repeat once per seat)
    #[arg(long = "player", short = 'p', required = true)]
    players: Vec<String>,

    /// Number of games
    #[arg(long = "runs", short = 'n', default_value_t = 1)]
    runs: u32,

    /// Seed for every generator in the run
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().without_time())
        .with(filter)
        .init();
}

type Perfect<G> = fn(GameRng) -> Box<dyn Player<G>>;

/// Build the strategy named `name`. `perfect` is offered only by games that
/// have a rule-based player.
fn build_player<G: Game + 'static>(
    name: &str,
    rng: &mut GameRng,
    perfect: Option<Perfect<G>>,
) -> Result<Box<dyn Player<G>>, MctsError> {
    if name == "random" {
        return Ok(Box::new(RandomPlayer::new(rng.fork())));
    }
    if name == "perfect" {
        if let Some(make) = perfect {
            return Ok(make(rng.fork()));
        }
    }
    if let Some(trials) = name.strip_prefix("mcts").and_then(|n| n.parse::<u32>().ok()) {
        let config = MctsConfig::default()
            .with_trials(trials)
            .with_seed(rng.next_u64());
        return Ok(Box::new(MctsPlayer::new(config).with_logging()));
    }
    Err(MctsError::UnknownPlayer(name.to_string()))
}

fn run_series<G: Game + 'static>(
    args: &Args,
    new_game: impl Fn(&mut GameRng) -> G,
    perfect: Option<Perfect<G>>,
) -> Result<()> {
    let mut rng = GameRng::new(args.seed);
    let mut tally = MatchTally::new(args.players.len());

    for run in 1..=args.runs {
        let mut game = new_game(&mut rng);
        if game.player_count() != args.players.len() {
            return Err(MctsError::PlayerCount {
                expected: game.player_count(),
                actual: args.players.len(),
            }
            .into());
        }
        let mut players = args
            .players
            .iter()
            .map(|name| build_player(name, &mut rng, perfect))
            .collect::<Result<Vec<_>, _>>()?;

        info!(run, "starting game");
        let result = play_game(&mut game, &mut players)?;
        tally.record(&result);

        println!("\nrun {run}\ndraw,{}\n{tally}", args.players.join(","));
    }
    Ok(())
}

fn perfect_tictactoe(rng: GameRng) -> Box<dyn Player<TicTacToe>> {
    Box::new(PerfectPlayer::new(rng))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);
    info!(game = %args.game, players = ?args.players, runs = args.runs, seed = args.seed, "simgame");

    match args.game.as_str() {
        "tictactoe" => run_series(
            &args,
            |_| TicTacToe::new(),
            Some(perfect_tictactoe),
        ),
        "connectfour" => run_series(&args, |_| ConnectFour::new(), None),
        "checkers" => run_series(&args, |_| Checkers::new(), None),
        "backgammon" => run_series(&args, |rng| Backgammon::new(rng.fork()), None),
        other => Err(MctsError::UnknownGame(other.to_string()).into()),
    }
}
