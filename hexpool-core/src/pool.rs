//! Pools: maximal connected regions of same-kind tiles

use crate::error::GeometryError;
use crate::grid::Grid;
use crate::tile::{TileId, TileKind, TileManager};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stable pool identifier. Retired ids are never reused.
pub type PoolId = u32;

/// A connected region of same-kind tiles
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pool {
    pub id: PoolId,
    pub kind: TileKind,
    tiles: Vec<TileId>,
    /// Highest count of same-kind neighbor tiles observed at any member
    pub highest_neighbor_count: u32,
}

impl Pool {
    /// Member tiles in insertion order
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.tiles.contains(&tile)
    }
}

/// Owns every pool plus the tile-to-pool back index. The index is updated
/// in the same call as every membership change, so a stored tile always
/// resolves to exactly one live pool.
#[derive(Clone, Debug, Default)]
pub struct PoolManager {
    pools: FxHashMap<PoolId, Pool>,
    tile_to_pool: FxHashMap<TileId, PoolId>,
    next_id: PoolId,
}

impl PoolManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pool containing a single tile
    pub fn create_pool(&mut self, kind: TileKind, tile: TileId) -> PoolId {
        self.create_pool_with(kind, vec![tile])
    }

    /// Create a pool from an existing member list
    pub fn create_pool_with(&mut self, kind: TileKind, tiles: Vec<TileId>) -> PoolId {
        let id = self.next_id;
        self.next_id += 1;
        for &tile in &tiles {
            self.tile_to_pool.insert(tile, id);
        }
        self.pools.insert(
            id,
            Pool {
                id,
                kind,
                tiles,
                highest_neighbor_count: 0,
            },
        );
        id
    }

    pub fn pool(&self, id: PoolId) -> Option<&Pool> {
        self.pools.get(&id)
    }

    /// Owning pool of a tile
    pub fn pool_of(&self, tile: TileId) -> Option<PoolId> {
        self.tile_to_pool.get(&tile).copied()
    }

    /// Add a tile to an existing pool
    pub fn add_member(&mut self, id: PoolId, tile: TileId) {
        if let Some(pool) = self.pools.get_mut(&id) {
            pool.tiles.push(tile);
            self.tile_to_pool.insert(tile, id);
        }
    }

    /// Detach a tile from its pool; returns the pool id it left
    pub fn remove_member(&mut self, tile: TileId) -> Option<PoolId> {
        let id = self.tile_to_pool.remove(&tile)?;
        if let Some(pool) = self.pools.get_mut(&id) {
            pool.tiles.retain(|&t| t != tile);
        }
        Some(id)
    }

    /// Replace a pool's member list wholesale, reindexing both the departed
    /// and the incoming tiles
    pub fn set_members(&mut self, id: PoolId, tiles: Vec<TileId>) {
        let Some(pool) = self.pools.get_mut(&id) else {
            return;
        };
        let old = std::mem::replace(&mut pool.tiles, tiles);
        for tile in old {
            if self.tile_to_pool.get(&tile) == Some(&id) {
                self.tile_to_pool.remove(&tile);
            }
        }
        if let Some(pool) = self.pools.get(&id) {
            for &tile in &pool.tiles {
                self.tile_to_pool.insert(tile, id);
            }
        }
    }

    /// Retire a pool, dropping index entries for any remaining members
    pub fn retire(&mut self, id: PoolId) -> Option<Pool> {
        let pool = self.pools.remove(&id)?;
        for tile in &pool.tiles {
            if self.tile_to_pool.get(tile) == Some(&id) {
                self.tile_to_pool.remove(tile);
            }
        }
        Some(pool)
    }

    /// Merge every `absorbed` pool into `survivor`: member tiles are
    /// re-pointed at the survivor and the absorbed pools are retired.
    pub fn merge(&mut self, survivor: PoolId, absorbed: &[PoolId]) {
        for &id in absorbed {
            if id == survivor {
                continue;
            }
            let Some(pool) = self.pools.remove(&id) else {
                continue;
            };
            for &tile in &pool.tiles {
                self.tile_to_pool.insert(tile, survivor);
            }
            if let Some(target) = self.pools.get_mut(&survivor) {
                target.tiles.extend(pool.tiles);
                target.highest_neighbor_count =
                    target.highest_neighbor_count.max(pool.highest_neighbor_count);
            }
        }
    }

    /// Pick the best merge target among candidate pools. Score compares the
    /// highest-neighbor-count statistic, then member count, then lowest id;
    /// total and deterministic.
    pub fn best_candidate(&self, candidates: &[PoolId]) -> Option<PoolId> {
        candidates
            .iter()
            .filter_map(|id| self.pools.get(id))
            .max_by_key(|p| {
                (
                    p.highest_neighbor_count,
                    p.tiles.len(),
                    std::cmp::Reverse(p.id),
                )
            })
            .map(|p| p.id)
    }

    /// Recompute a pool's derived statistic against the grid's adjacency
    pub fn recompute_stats(
        &mut self,
        id: PoolId,
        grid: &Grid,
        tiles: &TileManager,
    ) -> Result<(), GeometryError> {
        let Some(pool) = self.pools.get(&id) else {
            return Ok(());
        };

        let mut highest = 0u32;
        for &member in &pool.tiles {
            let Some(tile) = tiles.tile(member) else {
                continue;
            };
            let mut same_kind = 0u32;
            for neighbor in grid.neighbor_cells(tile.cell)? {
                if let Some(other) = tiles.tile_at(neighbor) {
                    if other.kind == tile.kind {
                        same_kind += 1;
                    }
                }
            }
            highest = highest.max(same_kind);
        }

        if let Some(pool) = self.pools.get_mut(&id) {
            pool.highest_neighbor_count = highest;
        }
        Ok(())
    }

    /// Visit every live pool in unspecified order
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}
