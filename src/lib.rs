//! # rust-mcts
//!
//! A general-purpose Monte Carlo Tree Search engine for turn-based games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: the engine only sees the `Game` trait: turn, player,
//!    legal actions, apply, outcome. Rules stay in the game.
//!
//! 2. **N-Player First**: rewards are per-player vectors and players are
//!    1-based ids; nothing assumes two seats.
//!
//! 3. **Deterministic**: every random choice flows through a seeded
//!    [`GameRng`], so equal seeds give equal searches.
//!
//! ## Architecture
//!
//! - **UCT search**: selection, expansion, random rollout, backpropagation,
//!   run incrementally through `start_thinking` / `continue_thinking` /
//!   `stop_thinking`.
//!
//! - **Determinization**: games with chance events are cloned with a fixed
//!   generator, reseeded every `trials_per_seed` trials, and the stale
//!   subtrees below the root's children are discarded.
//!
//! ## Modules
//!
//! - `core`: Players, turn state, RNG
//! - `rules`: `Game` trait for game implementations
//! - `agents`: `Player` trait and the random strategy
//! - `mcts`: Monte Carlo Tree Search
//! - `games`: Tic-tac-toe, connect four, checkers, backgammon
//! - `driver`: Game loop and match scoring

pub mod agents;
pub mod core;
pub mod driver;
pub mod error;
pub mod games;
pub mod mcts;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, PlayerId, PlayerMap, RngSeed, TurnState};

pub use crate::rules::{Action, Game, GameResult};

pub use crate::agents::{Player, RandomPlayer};

pub use crate::mcts::{MctsConfig, MctsPlayer, SearchSession, SearchStats};

pub use crate::driver::{play_game, MatchTally};

pub use crate::error::MctsError;
