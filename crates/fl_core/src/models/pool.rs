//! Indexed, read-only view of the eligible player pool.
//!
//! Built once per run by the external ingester and shared by reference with
//! every pipeline stage. Lookup is by stable id or by dense index; dense
//! indices are the pool's insertion order and are what the sampler threads
//! through its hot path.

use fxhash::FxHashMap;

use crate::error::PoolError;
use crate::models::player::Player;

#[derive(Debug, Clone)]
pub struct PlayerPool {
    players: Vec<Player>,
    index: FxHashMap<String, usize>,
}

impl PlayerPool {
    /// Build a pool, rejecting duplicate ids, empty position sets and
    /// out-of-range ownership estimates.
    pub fn new(players: Vec<Player>) -> Result<Self, PoolError> {
        let mut index = FxHashMap::default();
        for (i, player) in players.iter().enumerate() {
            if player.positions.is_empty() {
                return Err(PoolError::EmptyPositions { id: player.id.clone() });
            }
            if !(0.0..=1.0).contains(&player.ownership) || !player.ownership.is_finite() {
                return Err(PoolError::OwnershipOutOfRange {
                    id: player.id.clone(),
                    value: player.ownership,
                });
            }
            if index.insert(player.id.clone(), i).is_some() {
                return Err(PoolError::DuplicateId { id: player.id.clone() });
            }
        }
        Ok(PlayerPool { players, index })
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Player> {
        self.index.get(id).map(|&i| &self.players[i])
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[inline]
    pub fn by_index(&self, idx: usize) -> &Player {
        &self.players[idx]
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }
}
