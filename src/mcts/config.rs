//! MCTS configuration parameters.

use serde::{Deserialize, Serialize};

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Total trials per decision. `continue_thinking` never runs past this.
    pub n_trials: u32,

    /// UCT exploration constant `c` (default: 1.0).
    /// With rewards in [0, 1], `c = 2 * Cp / sqrt(2)` and `Cp = 1/sqrt(2)`.
    pub exploration_constant: f64,

    /// Trials sharing one determinization seed (nondeterministic games).
    /// Values below 1 are treated as 1.
    pub trials_per_seed: u32,

    /// Seed for the search generator (rollouts, tie-breaks, determinization).
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            n_trials: 1000,
            exploration_constant: 1.0,
            trials_per_seed: 10,
            seed: 42,
        }
    }
}

impl MctsConfig {
    /// Create a new config with a custom trial limit.
    pub fn with_trials(mut self, n_trials: u32) -> Self {
        self.n_trials = n_trials;
        self
    }

    /// Create a new config with custom exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Create a new config with a custom determinization period.
    pub fn with_trials_per_seed(mut self, trials: u32) -> Self {
        self.trials_per_seed = trials;
        self
    }

    /// Create a new config with custom seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
