//! Incremental MCTS search: start, continue, stop.
//!
//! The search is a resumable state machine rather than one blocking call, so
//! a host can interleave it with other work. Each `continue_thinking` call
//! runs a bounded batch of trials; a trial always runs to completion:
//!
//! 1. Determinization (nondeterministic games only)
//! 2. Selection: UCT down to the frontier of the tree
//! 3. Expansion: materialize the frontier node's children, step into one
//! 4. Rollout: uniformly random moves until the game ends
//! 5. Backpropagation: add the reward vector along the path

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::agents::Player;
use crate::core::{GameRng, RngSeed};
use crate::error::MctsError;
use crate::rules::Game;

use super::config::MctsConfig;
use super::policy::{RewardPolicy, WinLossDraw};
use super::session::SearchSession;

/// Progress hook invoked after each phase of the search.
pub type SearchCallback<G> = Box<dyn FnMut(&SearchSession<'_, G>)>;

/// MCTS strategy.
///
/// Owns its configuration, generator, reward policy and optional progress
/// hook. Sessions are created per decision and discarded afterwards.
pub struct MctsPlayer<G: Game> {
    /// Search configuration.
    config: MctsConfig,

    /// Generator for rollouts, tie-breaking and determinization seeds.
    rng: GameRng,

    /// Terminal position to reward vector.
    reward_policy: Box<dyn RewardPolicy<G>>,

    /// Optional progress reporting.
    callback: Option<SearchCallback<G>>,
}

impl<G: Game> MctsPlayer<G> {
    /// Create a new MCTS player.
    pub fn new(config: MctsConfig) -> Self {
        let rng = GameRng::new(config.seed);

        Self {
            config,
            rng,
            reward_policy: Box::new(WinLossDraw),
            callback: None,
        }
    }

    /// Set a custom reward policy.
    pub fn with_reward_policy<P: RewardPolicy<G> + 'static>(mut self, policy: P) -> Self {
        self.reward_policy = Box::new(policy);
        self
    }

    /// Set a progress hook.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SearchSession<'_, G>) + 'static,
    {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Report finished searches through `tracing`.
    pub fn with_logging(self) -> Self
    where
        G: 'static,
    {
        self.with_callback(log_search_progress::<G>)
    }

    /// Get the configuration.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Open a session for a decision in the live `game`.
    pub fn start_thinking<'g>(&mut self, game: &'g G) -> SearchSession<'g, G> {
        let session = SearchSession::new(game);
        debug!(
            turn = game.current_turn(),
            player = game.current_player().0,
            actions = session.root.children().len(),
            "search started"
        );
        self.notify(&session);
        session
    }

    /// Run up to `budget` more trials. Returns whether trials remain before
    /// the configured limit.
    ///
    /// Does nothing when the root offers no real choice (0 or 1 actions) or
    /// the limit has been reached.
    pub fn continue_thinking(
        &mut self,
        session: &mut SearchSession<'_, G>,
        budget: u32,
    ) -> Result<bool, MctsError> {
        let limit = self.config.n_trials;
        if session.root.children().len() <= 1 || session.root.visits() >= limit {
            return Ok(false);
        }

        let first = session.root.visits();
        let last = limit.min(first.saturating_add(budget));
        let started = Instant::now();

        for _ in first..last {
            self.run_trial(session)?;
        }

        session.stats.elapsed += started.elapsed();
        session.stats.refresh(session.start_turn, session.root.visits());
        trace!(
            trials = session.root.visits(),
            batch = last - first,
            nodes = session.root.node_count(),
            avg_search_depth = session.stats.avg_search_depth,
            "search batch finished"
        );
        self.notify(session);

        Ok(session.root.visits() < limit)
    }

    /// Pick the best root action by pure exploitation.
    ///
    /// Returns `None` when the root has no children (terminal or malformed
    /// position).
    pub fn stop_thinking(&mut self, session: &mut SearchSession<'_, G>) -> Option<G::Action> {
        session.best = session.root.select_child(0.0, &mut self.rng);
        self.notify(session);
        session.best().and_then(|node| node.action()).cloned()
    }

    fn notify(&mut self, session: &SearchSession<'_, G>) {
        if let Some(callback) = self.callback.as_mut() {
            callback(session);
        }
    }

    /// Clone the live game for one trial, attaching the active seed's
    /// generator for nondeterministic games.
    ///
    /// A new seed is drawn every `trials_per_seed` trials counted from the
    /// root's visits. Each reseed clears the subtrees below the root's
    /// children; root children keep their statistics.
    fn determinize(&mut self, session: &mut SearchSession<'_, G>) -> Result<G, MctsError> {
        let game = session.game;
        if !game.is_nondeterministic() {
            return Ok(game.clone());
        }

        let period = self.config.trials_per_seed.max(1);
        let seed = match session.seed {
            Some(seed) if session.root.visits() % period != 0 => seed,
            _ => {
                let seed = RngSeed::from_rng(&mut self.rng);
                session.seed = Some(seed);
                session.stats.seeds_drawn += 1;
                for child in session.root.children_mut() {
                    child.clear_children();
                }
                seed
            }
        };

        game.clone_with_rng(GameRng::from_seed(seed))
    }

    fn run_trial(&mut self, session: &mut SearchSession<'_, G>) -> Result<(), MctsError> {
        let c = self.config.exploration_constant;
        let mut sim = self.determinize(session)?;
        let mut path: Vec<usize> = Vec::new();

        // === SELECTION ===
        let mut node = &mut session.root;
        while !sim.is_terminal() && !node.is_frontier() {
            let Some(idx) = node.select_child(c, &mut self.rng) else {
                break;
            };
            node = &mut node.children_mut()[idx];
            if let Some(action) = node.action() {
                sim.apply(action);
            }
            path.push(idx);
        }

        // === EXPANSION ===
        if !sim.is_terminal() {
            let created = node.expand(&sim);
            session.stats.sample_branching(created);
            if let Some(idx) = node.select_child(c, &mut self.rng) {
                if let Some(action) = node.children()[idx].action() {
                    sim.apply(action);
                }
                path.push(idx);
            }
        }
        let search_depth = sim.current_turn();

        // === ROLLOUT ===
        while !sim.is_terminal() {
            let actions = sim.all_actions();
            session.stats.sample_branching(actions.len());
            // A running game must always offer a move.
            let action = self.rng.choose(&actions).ok_or(MctsError::NoActionAvailable)?;
            sim.apply(action);
        }

        // === BACKPROPAGATION ===
        let rewards = self.reward_policy.rewards(&sim);
        let mut node = &mut session.root;
        node.update(&rewards);
        for &idx in &path {
            node = &mut node.children_mut()[idx];
            node.update(&rewards);
        }

        session.stats.cum_search_depth += u64::from(search_depth);
        session.stats.cum_game_depth += u64::from(sim.current_turn());

        Ok(())
    }
}

impl<G: Game> Player<G> for MctsPlayer<G> {
    /// Synchronous search: start, run every configured trial, stop.
    fn get_action(&mut self, game: &G) -> Result<G::Action, MctsError> {
        let mut session = self.start_thinking(game);
        let budget = self.config.n_trials;
        self.continue_thinking(&mut session, budget)?;
        self.stop_thinking(&mut session)
            .ok_or(MctsError::NoActionAvailable)
    }
}

/// Progress hook logging the root children once a best action is chosen.
///
/// The chosen child is marked with `*`.
pub fn log_search_progress<G: Game>(session: &SearchSession<'_, G>) {
    let Some(best) = session.best else {
        return;
    };

    info!(
        trials = session.trials(),
        elapsed_ms = session.elapsed().as_millis() as u64,
        trials_per_sec = session.stats().trials_per_second(session.trials()),
        "search finished"
    );
    for (i, child) in session.root().children().iter().enumerate() {
        let marker = if i == best { '*' } else { ' ' };
        info!("{marker} {child}");
    }
    info!(
        avg_search_depth = session.stats().avg_search_depth,
        avg_game_depth = session.stats().avg_game_depth,
        avg_branching_factor = session.stats().avg_branching_factor,
        "search depth"
    );
}
