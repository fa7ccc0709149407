//! MCTS search statistics for diagnostics and tuning.
//!
//! Depths are measured in game turns relative to the turn the search started
//! on, so a trial that ends on the starting turn has depth 1.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Aggregates collected at the root of a search session.
///
/// Reporting only: nothing here feeds back into action selection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Sum over trials of the turn reached at the end of selection/expansion.
    pub cum_search_depth: u64,

    /// Sum over trials of the turn reached at the end of the rollout.
    pub cum_game_depth: u64,

    /// Positions whose legal-action count was sampled.
    pub branch_samples: u64,

    /// Sum of sampled legal-action counts.
    pub branch_total: u64,

    /// Determinization seeds drawn.
    pub seeds_drawn: u32,

    /// Wall-clock time spent in `continue_thinking`.
    pub elapsed: Duration,

    /// Mean tree depth per trial, in turns.
    pub avg_search_depth: f64,

    /// Mean game length per trial, in turns.
    pub avg_game_depth: f64,

    /// Mean number of legal actions per sampled position.
    pub avg_branching_factor: f64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one position with `actions` legal moves.
    pub fn sample_branching(&mut self, actions: usize) {
        self.branch_samples += 1;
        self.branch_total += actions as u64;
    }

    /// Recompute the derived averages. `start_turn` is the live game's turn
    /// and `trials` the root visit count.
    pub fn refresh(&mut self, start_turn: u32, trials: u32) {
        if trials > 0 {
            let offset = f64::from(start_turn) - 1.0;
            let trials = f64::from(trials);
            self.avg_search_depth = self.cum_search_depth as f64 / trials - offset;
            self.avg_game_depth = self.cum_game_depth as f64 / trials - offset;
        }
        if self.branch_samples > 0 {
            self.avg_branching_factor = self.branch_total as f64 / self.branch_samples as f64;
        }
    }

    /// Calculate trials per second.
    #[must_use]
    pub fn trials_per_second(&self, trials: u32) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            f64::from(trials) / secs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_default() {
        let stats = SearchStats::new();
        assert_eq!(stats.cum_search_depth, 0);
        assert_eq!(stats.avg_branching_factor, 0.0);
    }

    #[test]
    fn test_refresh_depths_relative_to_start_turn() {
        let mut stats = SearchStats::new();
        stats.cum_search_depth = 4 * 6;
        stats.cum_game_depth = 4 * 9;

        stats.refresh(5, 4);

        assert_eq!(stats.avg_search_depth, 2.0);
        assert_eq!(stats.avg_game_depth, 5.0);
    }

    #[test]
    fn test_branching_factor() {
        let mut stats = SearchStats::new();
        stats.sample_branching(9);
        stats.sample_branching(7);
        stats.refresh(1, 1);
        assert_eq!(stats.avg_branching_factor, 8.0);
    }

    #[test]
    fn test_trials_per_second() {
        let mut stats = SearchStats::new();
        assert_eq!(stats.trials_per_second(10), 0.0);

        stats.elapsed = Duration::from_secs(2);
        assert_eq!(stats.trials_per_second(1000), 500.0);
    }

    #[test]
    fn test_stats_serialization() {
        let mut stats = SearchStats::new();
        stats.cum_game_depth = 42;

        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: SearchStats = serde_json::from_str(&json).unwrap();

        assert_eq!(stats.cum_game_depth, deserialized.cum_game_depth);
    }
}
