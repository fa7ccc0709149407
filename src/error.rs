//! Error type shared by the engine, strategies and driver.

use thiserror::Error;

/// Errors surfaced by the search engine and its collaborators.
///
/// Game outcomes are never errors; these cover unimplemented capabilities
/// and malformed setups.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MctsError {
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("no action available")]
    NoActionAvailable,

    #[error("need {expected} players, {actual} specified")]
    PlayerCount { expected: usize, actual: usize },

    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    #[error("unknown game: {0}")]
    UnknownGame(String),
}
