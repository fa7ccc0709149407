//! Match driver: plays strategies against each other and keeps score.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agents::Player;
use crate::core::{PlayerId, PlayerMap};
use crate::error::MctsError;
use crate::rules::{Game, GameResult};

/// Play `game` to completion, seat `i` being `players[i]` (player `i + 1`).
///
/// Each strategy sees the live game and returns a move; the driver applies
/// it. Returns the final outcome.
pub fn play_game<G: Game>(
    game: &mut G,
    players: &mut [Box<dyn Player<G>>],
) -> Result<GameResult, MctsError> {
    if players.len() != game.player_count() {
        return Err(MctsError::PlayerCount {
            expected: game.player_count(),
            actual: players.len(),
        });
    }

    while !game.is_terminal() {
        debug!("\n{game}");
        let seat = game.current_player();
        let player = players
            .get_mut(seat.index())
            .ok_or_else(|| MctsError::UnknownPlayer(seat.to_string()))?;
        let action = player.get_action(game)?;
        debug!(player = %seat, action = %action, "move");
        game.apply(&action);
    }
    debug!("\n{game}");

    game.outcome().ok_or(MctsError::NoActionAvailable)
}

/// Running score over a series of games.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchTally {
    draws: u32,
    wins: PlayerMap<u32>,
}

impl MatchTally {
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            draws: 0,
            wins: PlayerMap::with_value(player_count, 0),
        }
    }

    /// Count one finished game. A winner outside the seat range counts as a
    /// draw, matching how rewards treat it.
    pub fn record(&mut self, result: &GameResult) {
        match result {
            GameResult::Winner(p) if p.is_valid(self.wins.player_count()) => self.wins[*p] += 1,
            _ => self.draws += 1,
        }
    }

    #[must_use]
    pub fn games(&self) -> u32 {
        self.draws + self.wins.as_slice().iter().sum::<u32>()
    }

    #[must_use]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    #[must_use]
    pub fn wins(&self, player: PlayerId) -> u32 {
        self.wins.get(player).copied().unwrap_or(0)
    }

    /// Draw rate followed by each player's win rate.
    #[must_use]
    pub fn rates(&self) -> Vec<f64> {
        let games = f64::from(self.games().max(1));
        std::iter::once(self.draws)
            .chain(self.wins.as_slice().iter().copied())
            .map(|n| f64::from(n) / games)
            .collect()
    }
}

impl fmt::Display for MatchTally {
    /// Two lines: raw counts, then rates, each as `draws,p1,p2,...`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: Vec<String> = std::iter::once(self.draws)
            .chain(self.wins.as_slice().iter().copied())
            .map(|n| n.to_string())
            .collect();
        let rates: Vec<String> = self.rates().iter().map(|r| format!("{r:.2}")).collect();
        write!(f, "{}\n{}", counts.join(","), rates.join(","))
    }
}
