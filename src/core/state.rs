//! Turn bookkeeping shared by every game.
//!
//! ## TurnState
//!
//! Observable progression information:
//! - Turn number (starts at 1)
//! - Active player (1-based)
//! - Player count
//! - Terminal outcome, unset while the game is running
//!
//! Games embed a `TurnState` and delegate the `Game` progression queries to
//! it, keeping only their board/position data alongside.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::rules::GameResult;

/// Progression state of a game in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    player_count: usize,

    /// Turn number (starts at 1).
    turn: u32,

    /// Active player (whose turn it is).
    player: PlayerId,

    /// Set once the game has ended.
    outcome: Option<GameResult>,
}

impl TurnState {
    /// Create a new turn state.
    ///
    /// ## Defaults
    ///
    /// - `player`: Player 1
    /// - `turn`: 1
    /// - `outcome`: unset
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            turn: 1,
            player: PlayerId::new(1),
            outcome: None,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Current turn number.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Player to move.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Terminal outcome, if the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameResult> {
        self.outcome.as_ref()
    }

    /// Check if the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Set the active player.
    pub fn set_player(&mut self, player: PlayerId) {
        self.player = player;
    }

    /// Advance to the next turn and hand the move to the next player.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.player = self.player.next(self.player_count);
    }

    /// Record the terminal outcome.
    pub fn finish(&mut self, result: GameResult) {
        self.outcome = Some(result);
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.outcome {
            None => write!(f, "currentTurn {} currentPlayer {}", self.turn, self.player.0),
            Some(GameResult::Draw) => write!(f, "draw"),
            Some(GameResult::Winner(p)) => write!(f, "winner {}", p.0),
        }
    }
}
