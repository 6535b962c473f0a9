//! Board module - manages the tile grid
//!
//! The board is a `columns x rows` grid where each cell is empty or holds a tile.
//! Uses a flat vector in row-major order (y * columns + x).
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom,
//! so gravity pulls tiles towards larger y.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GameError;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::SimpleRng;
use crate::types::{Cell, Coord, Tile, TileColor, MAX_DIMENSION};

/// Per-column result of a collapse
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapseReport {
    /// Existing tiles that slid down at least one row
    pub moved: usize,
    /// Fresh tiles created above the board
    pub spawned: usize,
    /// Number of vacated cells per column, indexed by x
    pub vacated: ArrayVec<u8, { MAX_DIMENSION as usize }>,
}

/// The tile grid
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    columns: u8,
    rows: u8,
    /// Flat vector of cells, row-major order (y * columns + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(columns: u8, rows: u8) -> Self {
        let len = (columns as usize) * (rows as usize);
        Self {
            columns,
            rows,
            cells: vec![None; len],
        }
    }

    /// Create a board with every cell holding an independently random tile.
    ///
    /// The result may contain matches; see [`Board::normalize`].
    pub fn random(columns: u8, rows: u8, rng: &mut SimpleRng, palette: &[TileColor]) -> Self {
        let mut board = Self::new(columns, rows);
        for cell in &mut board.cells {
            *cell = Some(rng.next_tile(palette));
        }
        board
    }

    /// Parse a board from one string per row.
    ///
    /// Each character is a color letter (`R O Y G B P`, see
    /// [`TileColor::from_letter`]) or `.` for an empty cell.
    ///
    /// ```
    /// use tui_gems_core::Board;
    /// use tui_gems_types::{Coord, TileColor};
    ///
    /// let board = Board::from_rows(&["RGB", "R.B"]).unwrap();
    /// assert_eq!(board.columns(), 3);
    /// assert_eq!(board.color_at(Coord::new(2, 1)), Some(TileColor::Blue));
    /// assert_eq!(board.color_at(Coord::new(1, 1)), None);
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, GameError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GameError::InvalidGrid("grid is empty".into()));
        }
        if height > MAX_DIMENSION as usize || width > MAX_DIMENSION as usize {
            return Err(GameError::InvalidGrid(format!(
                "grid exceeds {MAX_DIMENSION} cells per side"
            )));
        }

        let mut board = Self::new(width as u8, height as u8);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GameError::InvalidGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    _ => {
                        let color = TileColor::from_letter(ch).ok_or_else(|| {
                            GameError::InvalidGrid(format!("unknown tile {ch:?} at ({x}, {y})"))
                        })?;
                        Some(Tile::new(color))
                    }
                };
                board.cells[y * width + x] = cell;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x >= self.columns || coord.y >= self.rows {
            return None;
        }
        Some((coord.y as usize) * (self.columns as usize) + (coord.x as usize))
    }

    pub fn columns(&self) -> u8 {
        self.columns
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// Fail fast on coordinates outside the grid
    pub fn check_bounds(&self, coord: Coord) -> Result<(), GameError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }

    /// Get cell at a coordinate
    /// Returns None if out of bounds
    pub fn get(&self, coord: Coord) -> Option<Cell> {
        self.index(coord).map(|idx| self.cells[idx])
    }

    /// Color of the tile at a coordinate, if any
    pub fn color_at(&self, coord: Coord) -> Option<TileColor> {
        self.get(coord).flatten().map(|tile| tile.color)
    }

    /// Set cell at a coordinate
    /// Returns false if out of bounds
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange two cells
    /// Returns false (and leaves the board untouched) if either is out of bounds
    pub fn swap(&mut self, a: Coord, b: Coord) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(ia), Some(ib)) => {
                self.cells.swap(ia, ib);
                true
            }
            _ => false,
        }
    }

    /// Empty every matched cell, returning how many tiles were removed.
    ///
    /// Clearing an already-empty cell is a no-op.
    pub fn clear_matches(&mut self, matches: &MatchSet) -> usize {
        let mut removed = 0;
        for coord in matches.iter() {
            if let Some(idx) = self.index(coord) {
                if self.cells[idx].take().is_some() {
                    removed += 1;
                }
            }
        }
        removed
    }

    /// Replace every matched cell in place with a fresh random tile
    pub fn reroll_matches(&mut self, matches: &MatchSet, rng: &mut SimpleRng, palette: &[TileColor]) {
        for coord in matches.iter() {
            self.set(coord, Some(rng.next_tile(palette)));
        }
    }

    /// Re-roll matched tiles in place until the board has no match.
    /// Returns the number of re-roll passes.
    pub fn normalize(&mut self, rng: &mut SimpleRng, palette: &[TileColor]) -> u32 {
        let mut passes = 0;
        loop {
            let matches = find_matches(self);
            if matches.is_empty() {
                return passes;
            }
            self.reroll_matches(&matches, rng, palette);
            passes += 1;
        }
    }

    /// Apply gravity to every column and refill the vacated top cells.
    ///
    /// Surviving tiles keep their relative order. A tile that falls `k` rows gets
    /// offset `-k * tile_size`; tiles that do not move keep their offset. New tiles
    /// start stacked directly above the board, so every new tile in a column with
    /// `k` vacated cells also gets offset `-k * tile_size`.
    pub fn collapse(
        &mut self,
        rng: &mut SimpleRng,
        palette: &[TileColor],
        tile_size: f32,
    ) -> CollapseReport {
        let mut report = CollapseReport::default();
        let width = self.columns as usize;

        for x in 0..width {
            // Two-pointer compaction from the bottom up.
            let mut write_y = self.rows as usize;
            for read_y in (0..self.rows as usize).rev() {
                let Some(mut tile) = self.cells[read_y * width + x].take() else {
                    continue;
                };
                write_y -= 1;
                if write_y != read_y {
                    tile.offset = -((write_y - read_y) as f32) * tile_size;
                    report.moved += 1;
                }
                self.cells[write_y * width + x] = Some(tile);
            }

            let vacated = write_y;
            for y in 0..vacated {
                let tile = rng.next_tile(palette).with_offset(-(vacated as f32) * tile_size);
                self.cells[y * width + x] = Some(tile);
            }
            report.spawned += vacated;
            let _ = report.vacated.try_push(vacated as u8);
        }

        report
    }

    /// True when no cell is empty
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// Number of occupied cells in a column
    pub fn occupied_in_column(&self, x: u8) -> usize {
        if x >= self.columns {
            return 0;
        }
        (0..self.rows)
            .filter(|&y| self.get(Coord::new(x, y)).flatten().is_some())
            .count()
    }

    /// True when every tile has reached its slot
    pub fn is_settled(&self) -> bool {
        self.cells.iter().flatten().all(|tile| tile.is_settled())
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Colors only, one row per vector; used to compare boards ignoring offsets
    pub fn color_grid(&self) -> Vec<Vec<Option<TileColor>>> {
        let width = self.columns as usize;
        self.cells
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.map(|t| t.color)).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(self.columns as usize).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = cell.map(|t| t.color.letter()).unwrap_or('.');
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_COLUMNS, crate::types::DEFAULT_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(8, 6);
        assert_eq!(board.index(Coord::new(0, 0)), Some(0));
        assert_eq!(board.index(Coord::new(7, 0)), Some(7));
        assert_eq!(board.index(Coord::new(0, 1)), Some(8));
        assert_eq!(board.index(Coord::new(7, 5)), Some(47));
        assert_eq!(board.index(Coord::new(8, 0)), None);
        assert_eq!(board.index(Coord::new(0, 6)), None);
    }

    #[test]
    fn test_display_roundtrip() {
        let rows = ["RGB", ".PY", "OOB"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_string(), "RGB\n.PY\nOOB");
    }

    #[test]
    fn test_from_rows_rejects_ragged_and_unknown() {
        assert!(matches!(
            Board::from_rows(&["RGB", "RG"]),
            Err(GameError::InvalidGrid(_))
        ));
        assert!(matches!(
            Board::from_rows(&["RXB"]),
            Err(GameError::InvalidGrid(_))
        ));
        assert!(matches!(Board::from_rows(&[]), Err(GameError::InvalidGrid(_))));
    }

    #[test]
    fn test_collapse_compacts_and_offsets() {
        // Column 0: R at top, two holes, G at bottom.
        let mut board = Board::from_rows(&["R", ".", ".", "G"]).unwrap();
        let mut rng = SimpleRng::new(5);
        let report = board.collapse(&mut rng, &TileColor::ALL, 10.0);

        assert_eq!(report.moved, 1);
        assert_eq!(report.spawned, 2);
        assert_eq!(report.vacated.as_slice(), &[2]);

        // G never moved.
        let g = board.get(Coord::new(0, 3)).flatten().unwrap();
        assert_eq!(g.color, TileColor::Green);
        assert_eq!(g.offset, 0.0);

        // R fell two rows.
        let r = board.get(Coord::new(0, 2)).flatten().unwrap();
        assert_eq!(r.color, TileColor::Red);
        assert_eq!(r.offset, -20.0);

        // New tiles start two rows above their slot.
        for y in 0..2 {
            let t = board.get(Coord::new(0, y)).flatten().unwrap();
            assert_eq!(t.offset, -20.0);
        }
        assert!(board.is_full());
    }

    #[test]
    fn test_clear_matches_is_idempotent() {
        let mut board = Board::from_rows(&["RRR"]).unwrap();
        let mut set = MatchSet::new(3, 1);
        set.insert(Coord::new(0, 0));
        set.insert(Coord::new(1, 0));
        assert_eq!(board.clear_matches(&set), 2);
        assert_eq!(board.clear_matches(&set), 0);
        assert_eq!(board.to_string(), "..R");
    }
}
