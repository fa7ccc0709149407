//! Game implementations.
//!
//! - `tictactoe`: 3x3, with a rule-based perfect player
//! - `connect_four`: 7x6 gravity board
//! - `checkers`: forced jumps, multi-jumps, 40-turn quiet draw
//! - `backgammon`: dice, so searched by determinization

pub mod backgammon;
pub mod checkers;
pub mod connect_four;
pub mod tictactoe;

pub use backgammon::{Backgammon, Checker, StartRule};
pub use checkers::{Checkers, CheckersMove};
pub use connect_four::{ConnectFour, DiscDrop};
pub use tictactoe::{Mark, PerfectPlayer, TicTacToe};
