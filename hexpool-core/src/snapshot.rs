//! Board snapshots: JSON capture and replay

use crate::board::Board;
use crate::cell::{GridCell, Topology};
use crate::error::BoardError;
use crate::layout::Layout;
use crate::tile::TileKind;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One placed tile, in a form stable across id assignment
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileRecord {
    pub cell: GridCell,
    pub kind: TileKind,
    pub value: i32,
}

/// Serializable picture of a board. Restoring replays every placement
/// through the normal path, so pools are rebuilt rather than trusted from
/// the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub topology: Topology,
    pub layout: Layout,
    pub radius: u32,
    pub tiles: Vec<TileRecord>,
}

impl BoardSnapshot {
    /// Capture the current board. Tiles are recorded in placement order so
    /// replay is reproducible.
    pub fn capture(board: &Board) -> Self {
        let mut tiles: Vec<_> = board.tiles().iter().collect();
        tiles.sort_by_key(|t| t.id);
        Self {
            topology: board.grid().topology(),
            layout: *board.grid().layout(),
            radius: board.grid().radius(),
            tiles: tiles
                .into_iter()
                .map(|t| TileRecord {
                    cell: t.cell,
                    kind: t.kind,
                    value: t.value,
                })
                .collect(),
        }
    }

    /// Build a fresh board and replay every recorded placement
    pub fn restore(&self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.topology, self.layout, self.radius)?;
        for record in &self.tiles {
            board.add_tile(record.cell, record.kind, record.value)?;
        }
        Ok(board)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: BoardSnapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
