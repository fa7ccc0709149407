//! Game trait for rule implementations.
//!
//! Games implement `Game` to define their rules:
//! - What actions are legal
//! - How actions modify state
//! - Win/draw conditions
//!
//! The search engine calls into `Game` but never interprets game-specific
//! concepts directly.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlayerId};
use crate::error::MctsError;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner. The id is whatever the game reports and may fall
    /// outside the seat range.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

/// A game-specific move descriptor.
///
/// The `Display` output is the move's label. Nothing else is required: the
/// engine never compares actions, it only stores and replays them.
pub trait Action: Clone + fmt::Debug + fmt::Display {}

impl<T: Clone + fmt::Debug + fmt::Display> Action for T {}

/// Game trait.
///
/// ## Implementation Notes
///
/// - `Clone` must be a deep, independent copy: trials never alias the live game
/// - `all_actions`: non-empty while the game is running; emit an explicit
///   pass action when the player to move has no real move
/// - `apply`: mutates in place, advances turn/player, and sets the outcome
///   when the move ends the game
/// - `Display`: diagnostic rendering of the position
pub trait Game: Clone + fmt::Display {
    /// Move descriptor type.
    type Action: Action;

    /// Number of seats.
    fn player_count(&self) -> usize;

    /// Turn counter, starting at 1.
    fn current_turn(&self) -> u32;

    /// Player to move (1-based).
    fn current_player(&self) -> PlayerId;

    /// Terminal outcome, `None` while the game continues.
    fn outcome(&self) -> Option<GameResult>;

    /// Legal actions for the player to move, in a stable order.
    fn all_actions(&self) -> Vec<Self::Action>;

    /// Apply an action to the game.
    fn apply(&mut self, action: &Self::Action);

    /// Check if the game is over.
    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Whether the game consumes randomness (dice, shuffles) after setup.
    ///
    /// Nondeterministic games are searched with determinization and must
    /// provide [`Game::clone_with_rng`].
    fn is_nondeterministic(&self) -> bool {
        false
    }

    /// Independent copy with `rng` attached for all future chance events.
    fn clone_with_rng(&self, _rng: GameRng) -> Result<Self, MctsError> {
        if self.is_nondeterministic() {
            Err(MctsError::NotImplemented("Game::clone_with_rng"))
        } else {
            Ok(self.clone())
        }
    }
}
