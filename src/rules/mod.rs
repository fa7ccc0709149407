//! Game contract for rule implementations.
//!
//! Games implement `Game` to define:
//! - Legal actions for each position
//! - How actions modify the position
//! - Win/draw conditions
//!
//! The search engine calls into `Game` but never interprets
//! game-specific concepts directly.

pub mod game;

pub use game::{Action, Game, GameResult};
