//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Ids are 1-based: the first player to move in
//! a fresh game is `PlayerId(1)`.
//!
//! ## PlayerMap
//!
//! Efficient per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`. Reward vectors in the
//! search tree are `PlayerMap<f64>`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Player identifier, 1-based.
///
/// Any `u8` is representable so that games can report unusual winner codes;
/// use [`PlayerId::is_valid`] before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Slot index (0-based) of this player in a `PlayerMap`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0.wrapping_sub(1) as usize
    }

    /// Whether this id names a seat in a game with `player_count` players.
    #[must_use]
    pub fn is_valid(self, player_count: usize) -> bool {
        self.0 >= 1 && usize::from(self.0) <= player_count
    }

    /// The player who moves after this one, cycling back to player 1.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        if usize::from(self.0) >= player_count {
            Self(1)
        } else {
            Self(self.0 + 1)
        }
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use rust_mcts::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[0], PlayerId::new(1));
    /// assert_eq!(players[3], PlayerId::new(4));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (1..=player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rust_mcts::core::{PlayerId, PlayerMap};
///
/// let mut rewards: PlayerMap<f64> = PlayerMap::with_value(2, 0.0);
/// rewards[PlayerId::new(2)] += 1.0;
/// assert_eq!(rewards[PlayerId::new(2)], 1.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = PlayerId::all(player_count).map(factory).collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data, or `None` for an id outside the map.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        if player.is_valid(self.data.len()) {
            self.data.get(player.index())
        } else {
            None
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.data.len()).zip(self.data.iter())
    }

    /// Values in player order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl PlayerMap<f64> {
    /// Add another vector element-wise.
    pub fn accumulate(&mut self, other: &PlayerMap<f64>) {
        debug_assert_eq!(self.data.len(), other.data.len());
        for (total, value) in self.data.iter_mut().zip(other.data.iter()) {
            *total += value;
        }
    }

    /// Sum of all entries.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
