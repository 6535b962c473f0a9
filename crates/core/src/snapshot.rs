use crate::types::{Cell, Coord, Phase};

/// Read-only view of a session for renderers.
///
/// Reuse one snapshot across frames with
/// [`Session::snapshot_into`](crate::Session::snapshot_into); the cell vector
/// keeps its allocation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    pub columns: u8,
    pub rows: u8,
    /// Row-major cells, `rows * columns` long
    pub cells: Vec<Cell>,
    pub selection: Option<Coord>,
    pub phase: Phase,
    /// Clear cycles run so far for the current swap
    pub chain_depth: u32,
    /// Bumped on every board mutation
    pub revision: u64,
    /// Offset units per row
    pub tile_size: f32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.columns = 0;
        self.rows = 0;
        self.cells.clear();
        self.selection = None;
        self.phase = Phase::Idle;
        self.chain_depth = 0;
        self.revision = 0;
        self.tile_size = 0.0;
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        if coord.x >= self.columns || coord.y >= self.rows {
            return None;
        }
        self.cells[(coord.y as usize) * (self.columns as usize) + (coord.x as usize)]
    }

    pub fn busy(&self) -> bool {
        self.phase.is_busy()
    }

    /// Nothing on screen is moving
    pub fn is_static(&self) -> bool {
        self.phase != Phase::Animating
    }
}
