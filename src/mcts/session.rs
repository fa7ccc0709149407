//! Per-decision search state.

use std::time::Duration;

use crate::core::RngSeed;
use crate::rules::Game;

use super::node::SearchNode;
use super::stats::SearchStats;

/// Transient state of one real-game decision.
///
/// Created by `MctsPlayer::start_thinking`, advanced by
/// `continue_thinking` and closed by `stop_thinking`. Borrows the live game
/// for its whole life; trials always work on clones.
#[derive(Debug)]
pub struct SearchSession<'g, G: Game> {
    pub(crate) game: &'g G,
    pub(crate) start_turn: u32,
    pub(crate) root: SearchNode<G::Action>,
    pub(crate) best: Option<usize>,
    pub(crate) stats: SearchStats,
    pub(crate) seed: Option<RngSeed>,
}

impl<'g, G: Game> SearchSession<'g, G> {
    pub(crate) fn new(game: &'g G) -> Self {
        let mut root = SearchNode::root(game);
        if !game.is_terminal() {
            root.expand(game);
        }

        Self {
            game,
            start_turn: game.current_turn(),
            root,
            best: None,
            stats: SearchStats::new(),
            seed: None,
        }
    }

    /// The live game this decision is for.
    #[must_use]
    pub fn game(&self) -> &'g G {
        self.game
    }

    /// Root of the search tree.
    #[must_use]
    pub fn root(&self) -> &SearchNode<G::Action> {
        &self.root
    }

    /// Completed trials.
    #[must_use]
    pub fn trials(&self) -> u32 {
        self.root.visits()
    }

    /// Root child chosen by `stop_thinking`, once called.
    #[must_use]
    pub fn best(&self) -> Option<&SearchNode<G::Action>> {
        self.best.and_then(|i| self.root.children().get(i))
    }

    /// Aggregate statistics and derived averages.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Time spent running trials so far.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.stats.elapsed
    }

    /// Active determinization seed, if one has been drawn.
    #[must_use]
    pub fn seed(&self) -> Option<RngSeed> {
        self.seed
    }
}
