//! Board orchestration: the single mutation entry point over grid, tiles,
//! and pools

use crate::cell::{GridCell, Topology};
use crate::error::BoardError;
use crate::grid::Grid;
use crate::layout::Layout;
use crate::pool::{Pool, PoolId, PoolManager};
use crate::tile::{Tile, TileId, TileKind, TileManager};
use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Result of a successful tile placement
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub tile: TileId,
    /// Pool the tile ended up in
    pub pool: PoolId,
    /// Pools retired by merging into `pool`
    pub absorbed: Vec<PoolId>,
}

/// Result of a successful tile removal
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Removal {
    pub tile: Tile,
    /// Pools covering the former pool's remaining tiles; empty when the
    /// removed tile was its pool's last member
    pub pools: Vec<PoolId>,
}

/// A playing board: grid, tile store, and pool engine, mutated together so
/// every tile always belongs to exactly one pool of matching kind.
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    tiles: TileManager,
    pools: PoolManager,
}

impl Board {
    // ========================================================================
    // CONSTRUCTION & ACCESS
    // ========================================================================

    pub fn new(topology: Topology, layout: Layout, radius: u32) -> Result<Self, BoardError> {
        Ok(Self {
            grid: Grid::new(topology, layout, radius)?,
            tiles: TileManager::new(),
            pools: PoolManager::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &TileManager {
        &self.tiles
    }

    pub fn pools(&self) -> &PoolManager {
        &self.pools
    }

    /// Pool owning the tile at a cell, if any
    pub fn pool_at(&self, cell: GridCell) -> Option<&Pool> {
        let tile = self.tiles.tile_at(cell)?;
        self.pools.pool(self.pools.pool_of(tile.id)?)
    }

    // ========================================================================
    // PLACEMENT
    // ========================================================================

    /// Place a tile. Validation failures leave the board untouched. The new
    /// tile joins the best-scoring same-kind neighbor pool, or founds a new
    /// pool; bridging several same-kind pools merges them all into one.
    pub fn add_tile(
        &mut self,
        cell: GridCell,
        kind: TileKind,
        value: i32,
    ) -> Result<Placement, BoardError> {
        if kind.is_empty() {
            return Err(BoardError::EmptyKind);
        }
        if !self.grid.is_valid_cell(cell) {
            return Err(BoardError::OutOfBounds(cell));
        }
        if self.tiles.tile_at(cell).is_some() {
            return Err(BoardError::CellOccupied(cell));
        }

        // Distinct same-kind pools among the six neighbors
        let mut candidates: Vec<PoolId> = Vec::new();
        for neighbor in self.grid.neighbor_cells(cell)? {
            let Some(tile) = self.tiles.tile_at(neighbor) else {
                continue;
            };
            let Some(pool_id) = self.pools.pool_of(tile.id) else {
                // Index inconsistency; skip the neighbor and keep running
                tracing::error!(tile = tile.id, ?neighbor, "stored tile has no pool entry");
                continue;
            };
            let Some(pool) = self.pools.pool(pool_id) else {
                tracing::error!(pool = pool_id, "tile index names a retired pool");
                continue;
            };
            if pool.kind == kind && !candidates.contains(&pool_id) {
                candidates.push(pool_id);
            }
        }

        let tile_id = self.tiles.add_tile(cell, kind, value)?;

        let (pool, absorbed) = match self.pools.best_candidate(&candidates) {
            None => (self.pools.create_pool(kind, tile_id), Vec::new()),
            Some(target) => {
                self.pools.add_member(target, tile_id);
                let absorbed: Vec<PoolId> =
                    candidates.into_iter().filter(|&c| c != target).collect();
                if !absorbed.is_empty() {
                    tracing::debug!(survivor = target, ?absorbed, "placement bridged pools");
                    self.pools.merge(target, &absorbed);
                }
                (target, absorbed)
            }
        };

        self.pools.recompute_stats(pool, &self.grid, &self.tiles)?;

        Ok(Placement {
            tile: tile_id,
            pool,
            absorbed,
        })
    }

    // ========================================================================
    // REMOVAL
    // ========================================================================

    /// Remove the tile at a cell. The former pool is re-partitioned by
    /// connectivity: the component holding the lowest tile id keeps the pool
    /// id, every further component becomes a fresh pool.
    pub fn remove_tile(&mut self, cell: GridCell) -> Result<Removal, BoardError> {
        if !self.grid.is_valid_cell(cell) {
            return Err(BoardError::OutOfBounds(cell));
        }
        let Some(tile) = self.tiles.tile_at(cell).copied() else {
            return Err(BoardError::CellVacant(cell));
        };

        let pool_id = self.pools.remove_member(tile.id);
        self.tiles.remove_tile(cell);

        let Some(pool_id) = pool_id else {
            tracing::error!(tile = tile.id, "removed tile had no pool entry");
            return Ok(Removal {
                tile,
                pools: Vec::new(),
            });
        };

        let members: Vec<TileId> = match self.pools.pool(pool_id) {
            Some(pool) if pool.is_empty() => {
                self.pools.retire(pool_id);
                return Ok(Removal {
                    tile,
                    pools: Vec::new(),
                });
            }
            Some(pool) => pool.tiles().to_vec(),
            None => Vec::new(),
        };

        let mut components = self.connected_components(&members)?;
        let mut pools = vec![pool_id];
        if components.len() > 1 {
            self.pools.set_members(pool_id, components.remove(0));
            for component in components {
                pools.push(self.pools.create_pool_with(tile.kind, component));
            }
        }
        for &id in &pools {
            self.pools.recompute_stats(id, &self.grid, &self.tiles)?;
        }

        Ok(Removal { tile, pools })
    }

    /// Partition tiles into adjacency-connected components. Seeds are taken
    /// in ascending tile-id order so the partition is deterministic.
    fn connected_components(&self, members: &[TileId]) -> Result<Vec<Vec<TileId>>, BoardError> {
        let member_set: FxHashSet<TileId> = members.iter().copied().collect();
        let mut seeds: Vec<TileId> = members.to_vec();
        seeds.sort_unstable();

        let mut visited: FxHashSet<TileId> = FxHashSet::default();
        let mut components = Vec::new();
        for seed in seeds {
            if !visited.insert(seed) {
                continue;
            }
            let mut component = vec![seed];
            let mut queue = VecDeque::from([seed]);
            while let Some(id) = queue.pop_front() {
                let Some(tile) = self.tiles.tile(id) else {
                    continue;
                };
                for neighbor in self.grid.neighbor_cells(tile.cell)? {
                    if let Some(other) = self.tiles.tile_at(neighbor) {
                        if member_set.contains(&other.id) && visited.insert(other.id) {
                            component.push(other.id);
                            queue.push_back(other.id);
                        }
                    }
                }
            }
            components.push(component);
        }
        Ok(components)
    }

    // ========================================================================
    // RANDOMIZATION
    // ========================================================================

    /// Visit every cell in uniformly shuffled order and, with probability
    /// `fill`, place a random tile through the full placement path. Cells
    /// that draw the empty kind are skipped. Returns the number of tiles
    /// placed.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, fill: f64) -> Result<usize, BoardError> {
        let mut order = self.grid.cells().to_vec();
        order.shuffle(rng);

        let mut placed = 0;
        for cell in order {
            if self.tiles.tile_at(cell).is_some() {
                continue;
            }
            if rng.gen::<f64>() >= fill {
                continue;
            }
            let kind = TileKind::random(rng);
            if kind.is_empty() {
                continue;
            }
            let value = rng.gen_range(1..=9);
            self.add_tile(cell, kind, value)?;
            placed += 1;
        }
        Ok(placed)
    }
}
