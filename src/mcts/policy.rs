//! Reward policies: terminal position to per-player reward vector.
//!
//! The engine only requires that the vector has one entry per player; the
//! values are summed into every node on a trial's path and averaged by
//! visit count.

use crate::core::{PlayerId, PlayerMap};
use crate::rules::{Game, GameResult};

/// Policy for scoring a finished trial.
pub trait RewardPolicy<G: Game> {
    /// Rewards per player for the terminal `game`.
    fn rewards(&self, game: &G) -> PlayerMap<f64>;
}

impl<G, F> RewardPolicy<G> for F
where
    G: Game,
    F: Fn(&G) -> PlayerMap<f64>,
{
    fn rewards(&self, game: &G) -> PlayerMap<f64> {
        self(game)
    }
}

/// Win = 1, loss = 0, anything else = 0.5 for everyone.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinLossDraw;

impl<G: Game> RewardPolicy<G> for WinLossDraw {
    fn rewards(&self, game: &G) -> PlayerMap<f64> {
        result_to_rewards(game.outcome().as_ref(), game.player_count())
    }
}

/// Convert a game result to per-player rewards.
///
/// A winner outside `1..=player_count` (or no result at all) is scored as a
/// draw.
pub fn result_to_rewards(result: Option<&GameResult>, player_count: usize) -> PlayerMap<f64> {
    match result {
        Some(outcome @ GameResult::Winner(winner)) if winner.is_valid(player_count) => {
            PlayerMap::new(player_count, |player: PlayerId| {
                if outcome.is_winner(player) {
                    1.0
                } else {
                    0.0
                }
            })
        }
        _ => PlayerMap::with_value(player_count, 0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, TicTacToe};

    #[test]
    fn test_result_to_rewards_winner() {
        let result = GameResult::Winner(PlayerId::new(2));
        let rewards = result_to_rewards(Some(&result), 3);

        assert_eq!(rewards[PlayerId::new(1)], 0.0);
        assert_eq!(rewards[PlayerId::new(2)], 1.0);
        assert_eq!(rewards[PlayerId::new(3)], 0.0);
    }

    #[test]
    fn test_result_to_rewards_draw() {
        let rewards = result_to_rewards(Some(&GameResult::Draw), 2);

        assert_eq!(rewards[PlayerId::new(1)], 0.5);
        assert_eq!(rewards[PlayerId::new(2)], 0.5);
    }

    #[test]
    fn test_out_of_range_winner_is_a_draw() {
        for code in [0, 3, 200] {
            let result = GameResult::Winner(PlayerId::new(code));
            let rewards = result_to_rewards(Some(&result), 2);
            assert_eq!(rewards.as_slice(), &[0.5, 0.5]);
        }
    }

    #[test]
    fn test_win_loss_draw_policy() {
        let mut game = TicTacToe::new();
        for cell in [0, 3, 1, 4, 2] {
            game.apply(&Mark::new(cell));
        }

        let rewards = WinLossDraw.rewards(&game);
        assert_eq!(rewards.as_slice(), &[1.0, 0.0]);
    }

    #[test]
    fn test_closure_policy() {
        let always_second = |game: &TicTacToe| {
            let mut map = PlayerMap::with_value(game.player_count(), 0.0);
            map[PlayerId::new(2)] = 1.0;
            map
        };

        let rewards = always_second.rewards(&TicTacToe::new());
        assert_eq!(rewards.as_slice(), &[0.0, 1.0]);
    }
}
