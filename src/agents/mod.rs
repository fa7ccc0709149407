//! Player strategies.
//!
//! Every strategy sits behind the single `Player` contract so a driver can
//! pair any of them against each other:
//! - `RandomPlayer`: uniform over legal actions
//! - `MctsPlayer` (in `crate::mcts`): tree search
//! - game-specific rule-based players (e.g. `games::tictactoe::PerfectPlayer`)

use crate::core::GameRng;
use crate::error::MctsError;
use crate::rules::Game;

/// A strategy that picks a move for the player to move.
pub trait Player<G: Game> {
    /// Choose an action for `game.current_player()`.
    fn get_action(&mut self, game: &G) -> Result<G::Action, MctsError>;
}

/// Uniform random player.
///
/// Selects uniformly from legal actions.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    /// Create a random player with its own generator.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Create a random player from an integer seed.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }
}

impl<G: Game> Player<G> for RandomPlayer {
    fn get_action(&mut self, game: &G) -> Result<G::Action, MctsError> {
        let actions = game.all_actions();
        self.rng
            .choose(&actions)
            .cloned()
            .ok_or(MctsError::NoActionAvailable)
    }
}
