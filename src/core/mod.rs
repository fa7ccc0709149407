//! Core engine types: players, turn state, RNG.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games embed these rather than re-implementing turn and seat bookkeeping.

pub mod player;
pub mod rng;
pub mod state;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState, RngSeed};
pub use state::TurnState;
