//! Monte Carlo Tree Search for rust-mcts.
//!
//! ## Overview
//!
//! - **UCT selection**: exploit mean reward, explore under-visited children,
//!   break exact ties with a tiny random term
//! - **Incremental**: `start_thinking` / `continue_thinking` /
//!   `stop_thinking` so a host can interleave search with other work
//! - **Determinization**: games with chance events are searched over a
//!   fixed resolution of their randomness, reseeded every
//!   `trials_per_seed` trials
//! - **N-Player Support**: rewards are per-player vectors
//! - **Configurable**: reward policy and progress hook are pluggable
//!
//! ## Usage
//!
//! ```rust
//! use rust_mcts::agents::Player;
//! use rust_mcts::games::tictactoe::TicTacToe;
//! use rust_mcts::mcts::{MctsConfig, MctsPlayer};
//! use rust_mcts::rules::Game;
//!
//! let mut game = TicTacToe::new();
//! let mut player = MctsPlayer::new(MctsConfig::default().with_trials(200));
//!
//! // Incremental: a few trials at a time
//! let mut session = player.start_thinking(&game);
//! while player.continue_thinking(&mut session, 50).unwrap() {}
//! let action = player.stop_thinking(&mut session).unwrap();
//!
//! // Or all at once through the Player contract
//! let same_kind = player.get_action(&game).unwrap();
//! # let _ = same_kind;
//!
//! game.apply(&action);
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod session;
pub mod stats;

// Re-export main types
pub use config::MctsConfig;
pub use node::SearchNode;
pub use policy::{result_to_rewards, RewardPolicy, WinLossDraw};
pub use search::{log_search_progress, MctsPlayer, SearchCallback};
pub use session::SearchSession;
pub use stats::SearchStats;
