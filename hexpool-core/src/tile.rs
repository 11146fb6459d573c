//! Tiles and the cell-keyed tile store

use crate::cell::GridCell;
use crate::error::BoardError;
use rand::Rng;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stable tile identifier, unique for the lifetime of a board
pub type TileId = u32;

/// Tile category. `Empty` is a sentinel for "no tile here" in random
/// generation and is never stored on a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
}

impl TileKind {
    /// Every kind, empty sentinel included
    pub const ALL: [TileKind; 6] = [
        TileKind::Empty,
        TileKind::Red,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Yellow,
        TileKind::Purple,
    ];

    pub fn is_empty(&self) -> bool {
        matches!(self, TileKind::Empty)
    }

    /// Uniform draw over all kinds, empty included
    pub fn random<R: Rng>(rng: &mut R) -> TileKind {
        Self::ALL[rng.gen::<u8>() as usize % Self::ALL.len()]
    }
}

/// A tile on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub cell: GridCell,
    pub kind: TileKind,
    pub value: i32,
}

/// Associative tile store: owns every tile, keyed by id, with a cell index.
/// A cell holds at most one tile.
#[derive(Clone, Debug, Default)]
pub struct TileManager {
    tiles: FxHashMap<TileId, Tile>,
    by_cell: FxHashMap<GridCell, TileId>,
    next_id: TileId,
}

impl TileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a tile at a vacant cell and return its id
    pub fn add_tile(
        &mut self,
        cell: GridCell,
        kind: TileKind,
        value: i32,
    ) -> Result<TileId, BoardError> {
        if self.by_cell.contains_key(&cell) {
            return Err(BoardError::CellOccupied(cell));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tiles.insert(
            id,
            Tile {
                id,
                cell,
                kind,
                value,
            },
        );
        self.by_cell.insert(cell, id);
        Ok(id)
    }

    /// Tile occupying a cell, if any
    pub fn tile_at(&self, cell: GridCell) -> Option<&Tile> {
        self.by_cell.get(&cell).and_then(|id| self.tiles.get(id))
    }

    /// Tile by id
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    /// Remove and return the tile at a cell
    pub fn remove_tile(&mut self, cell: GridCell) -> Option<Tile> {
        let id = self.by_cell.remove(&cell)?;
        self.tiles.remove(&id)
    }

    /// Drop every tile without destroying the manager
    pub fn clear(&mut self) {
        self.tiles.clear();
        self.by_cell.clear();
    }

    /// Visit every stored tile in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_lookup() {
        let mut tiles = TileManager::new();
        let cell = GridCell::hex(1, -1);
        let id = tiles.add_tile(cell, TileKind::Red, 3).unwrap();
        let tile = tiles.tile_at(cell).unwrap();
        assert_eq!(tile.id, id);
        assert_eq!(tile.kind, TileKind::Red);
        assert_eq!(tile.value, 3);
        assert_eq!(tiles.tile(id).unwrap().cell, cell);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut tiles = TileManager::new();
        let cell = GridCell::hex(0, 0);
        tiles.add_tile(cell, TileKind::Blue, 1).unwrap();
        assert_eq!(
            tiles.add_tile(cell, TileKind::Red, 1),
            Err(BoardError::CellOccupied(cell))
        );
        assert_eq!(tiles.len(), 1);
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut tiles = TileManager::new();
        let a = tiles.add_tile(GridCell::hex(0, 0), TileKind::Red, 0).unwrap();
        tiles.remove_tile(GridCell::hex(0, 0)).unwrap();
        let b = tiles.add_tile(GridCell::hex(0, 0), TileKind::Red, 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_remove_vacates_cell() {
        let mut tiles = TileManager::new();
        let cell = GridCell::hex(2, 0);
        tiles.add_tile(cell, TileKind::Green, 5).unwrap();
        let removed = tiles.remove_tile(cell).unwrap();
        assert_eq!(removed.kind, TileKind::Green);
        assert!(tiles.tile_at(cell).is_none());
        assert!(tiles.remove_tile(cell).is_none());
        assert!(tiles.is_empty());
    }

    #[test]
    fn test_clear_and_iter() {
        let mut tiles = TileManager::new();
        for q in 0..4 {
            tiles.add_tile(GridCell::hex(q, 0), TileKind::Yellow, q).unwrap();
        }
        assert_eq!(tiles.iter().count(), 4);
        tiles.clear();
        assert!(tiles.is_empty());
        assert_eq!(tiles.iter().count(), 0);
    }

    #[test]
    fn test_random_kind_stays_in_range() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        for _ in 0..64 {
            let kind = TileKind::random(&mut rng);
            assert!(TileKind::ALL.contains(&kind));
        }
    }
}
