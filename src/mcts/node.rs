//! MCTS search node and the UCT selection rule.
//!
//! The tree is an owned hierarchy: each node exclusively owns its children
//! and there are no parent pointers. A trial records the path it takes as a
//! list of child indices and walks it again for backpropagation.

use std::fmt;

use crate::core::{GameRng, PlayerId, PlayerMap};
use crate::rules::Game;

/// Scale of the random tie-breaking term added to every UCT score.
const TIE_BREAK: f64 = 1e-6;

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct SearchNode<A> {
    /// Player to move at the parent, i.e. whose choice produced this node.
    player: PlayerId,

    /// Action that produced this node (`None` for the root).
    action: Option<A>,

    /// Completed trials whose path included this node.
    visits: u32,

    /// Cumulative reward per player.
    rewards: PlayerMap<f64>,

    /// Children, empty until the node is first expanded.
    children: Vec<SearchNode<A>>,
}

impl<A> SearchNode<A> {
    /// Create the root node for a decision in `game`.
    pub fn root<G: Game<Action = A>>(game: &G) -> Self {
        Self::with_action(game, None)
    }

    /// Create a child for `action`, recording `game`'s player to move.
    pub fn new<G: Game<Action = A>>(game: &G, action: A) -> Self {
        Self::with_action(game, Some(action))
    }

    fn with_action<G: Game<Action = A>>(game: &G, action: Option<A>) -> Self {
        Self {
            player: game.current_player(),
            action,
            visits: 0,
            rewards: PlayerMap::with_value(game.player_count(), 0.0),
            children: Vec::new(),
        }
    }

    /// Materialize one child per legal action of `game`. Returns the number
    /// of children created.
    pub fn expand<G: Game<Action = A>>(&mut self, game: &G) -> usize {
        self.children = game
            .all_actions()
            .into_iter()
            .map(|action| SearchNode::new(game, action))
            .collect();
        self.children.len()
    }

    /// Pick a child index by UCT with exploration constant `c`.
    ///
    /// Returns `None` on a node without children.
    pub fn select_child(&self, c: f64, rng: &mut GameRng) -> Option<usize> {
        let ln_parent = (1.0 + f64::from(self.visits)).ln();
        let mut best: Option<(usize, f64)> = None;

        for (i, child) in self.children.iter().enumerate() {
            let n = 1.0 + f64::from(child.visits);
            let score = child.value() / n + c * (ln_parent / n).sqrt() + rng.random() * TIE_BREAK;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        best.map(|(i, _)| i)
    }

    /// Record one completed trial.
    pub fn update(&mut self, rewards: &PlayerMap<f64>) {
        self.visits += 1;
        self.rewards.accumulate(rewards);
    }

    /// Drop the subtree below this node.
    pub fn clear_children(&mut self) {
        self.children = Vec::new();
    }

    /// Player whose move produced this node.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Action that produced this node.
    #[must_use]
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Visit count.
    #[must_use]
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Cumulative rewards per player.
    #[must_use]
    pub fn rewards(&self) -> &PlayerMap<f64> {
        &self.rewards
    }

    /// Cumulative reward of the player who moved into this node.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.rewards.get(self.player).copied().unwrap_or(0.0)
    }

    /// Get the mean reward for a player.
    #[must_use]
    pub fn mean_reward(&self, player: PlayerId) -> f64 {
        match self.rewards.get(player) {
            Some(total) if self.visits > 0 => total / f64::from(self.visits),
            _ => 0.0,
        }
    }

    /// Children of this node.
    #[must_use]
    pub fn children(&self) -> &[SearchNode<A>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [SearchNode<A>] {
        &mut self.children
    }

    /// Check if the node has not been expanded yet.
    #[must_use]
    pub fn is_frontier(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including this one.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SearchNode::node_count).sum::<usize>()
    }
}

impl<A: fmt::Display> fmt::Display for SearchNode<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "{action}")?,
            None => write!(f, "root")?,
        }
        write!(
            f,
            " {:.2} ({}/{})",
            self.mean_reward(self.player),
            self.value(),
            self.visits
        )
    }
}
