//! Match detection.
//!
//! A match is a run of [`MIN_RUN`] or more consecutive, equally colored,
//! non-empty tiles along a row or a column. Rows are scanned left to right and
//! columns top to bottom; both scans feed the same coordinate-keyed set, so a
//! tile sitting where a horizontal and a vertical run cross is recorded once.

use crate::board::Board;
use crate::types::{Coord, MIN_RUN};

/// Set of matched coordinates, stored as one flag per board cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchSet {
    columns: u8,
    rows: u8,
    marked: Vec<bool>,
    len: usize,
}

impl MatchSet {
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            columns,
            rows,
            marked: vec![false; (columns as usize) * (rows as usize)],
            len: 0,
        }
    }

    /// Reset for a board of the given size, keeping the allocation
    pub fn reset(&mut self, columns: u8, rows: u8) {
        self.columns = columns;
        self.rows = rows;
        self.marked.clear();
        self.marked
            .resize((columns as usize) * (rows as usize), false);
        self.len = 0;
    }

    #[inline(always)]
    fn index(&self, coord: Coord) -> Option<usize> {
        if coord.x >= self.columns || coord.y >= self.rows {
            return None;
        }
        Some((coord.y as usize) * (self.columns as usize) + (coord.x as usize))
    }

    /// Returns true if the coordinate was not already present
    pub fn insert(&mut self, coord: Coord) -> bool {
        let Some(idx) = self.index(coord) else {
            return false;
        };
        if self.marked[idx] {
            return false;
        }
        self.marked[idx] = true;
        self.len += 1;
        true
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some_and(|idx| self.marked[idx])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Matched coordinates in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        let width = self.columns as usize;
        self.marked
            .iter()
            .enumerate()
            .filter(|(_, marked)| **marked)
            .map(move |(idx, _)| Coord::new((idx % width) as u8, (idx / width) as u8))
    }

    fn insert_run(&mut self, line: Line, fixed: u8, end: u8, count: usize) {
        for i in 0..count {
            let along = end - 1 - i as u8;
            let coord = match line {
                Line::Row => Coord::new(along, fixed),
                Line::Column => Coord::new(fixed, along),
            };
            self.insert(coord);
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Line {
    Row,
    Column,
}

/// Find every matched coordinate on the board
pub fn find_matches(board: &Board) -> MatchSet {
    let mut out = MatchSet::new(board.columns(), board.rows());
    find_matches_into(board, &mut out);
    out
}

/// Allocation-reusing variant of [`find_matches`]
pub fn find_matches_into(board: &Board, out: &mut MatchSet) {
    out.reset(board.columns(), board.rows());

    for y in 0..board.rows() {
        scan_line(board, Line::Row, y, board.columns(), out);
    }
    for x in 0..board.columns() {
        scan_line(board, Line::Column, x, board.rows(), out);
    }
}

/// True if the board holds at least one match
pub fn has_match(board: &Board) -> bool {
    !find_matches(board).is_empty()
}

/// Walk one row or column, flushing runs on every break.
///
/// The loop runs one step past the last cell so a run touching the edge is
/// flushed like any other.
fn scan_line(board: &Board, line: Line, fixed: u8, length: u8, out: &mut MatchSet) {
    let at = |along: u8| match line {
        Line::Row => Coord::new(along, fixed),
        Line::Column => Coord::new(fixed, along),
    };

    let mut count = 1usize;
    for i in 1..=length {
        let continues = i < length && {
            let prev = board.color_at(at(i - 1));
            let cur = board.color_at(at(i));
            // Empty cells never compare equal.
            matches!((prev, cur), (Some(p), Some(c)) if p == c)
        };

        if continues {
            count += 1;
        } else {
            if count >= MIN_RUN {
                out.insert_run(line, fixed, i, count);
            }
            count = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coords(set: &MatchSet) -> Vec<(u8, u8)> {
        set.iter().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_run_at_row_start() {
        let board = Board::from_rows(&["RRRBB"]).unwrap();
        assert_eq!(coords(&find_matches(&board)), vec![(0, 0), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_run_touching_last_column_is_flushed() {
        let board = Board::from_rows(&["RRBBB"]).unwrap();
        assert_eq!(coords(&find_matches(&board)), vec![(2, 0), (3, 0), (4, 0)]);
    }

    #[test]
    fn test_vertical_run() {
        let board = Board::from_rows(&["G", "Y", "Y", "Y", "G"]).unwrap();
        assert_eq!(coords(&find_matches(&board)), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_intersection_counted_once() {
        let board = Board::from_rows(&[
            "BRB", //
            "RRR", //
            "BRB",
        ])
        .unwrap();
        let set = find_matches(&board);
        assert_eq!(set.len(), 5);
        assert!(set.contains(Coord::new(1, 1)));
        assert!(!set.contains(Coord::new(0, 0)));
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let board = Board::from_rows(&["RR.RR", "....."]).unwrap();
        assert!(find_matches(&board).is_empty());
        assert!(!has_match(&board));
    }

    #[test]
    fn test_all_empty_is_not_an_error() {
        let board = Board::new(4, 4);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_long_run_fully_marked() {
        let board = Board::from_rows(&["PPPPPP"]).unwrap();
        assert_eq!(find_matches(&board).len(), 6);
    }

    #[test]
    fn test_find_matches_into_resets() {
        let mut set = MatchSet::new(1, 1);
        find_matches_into(&Board::from_rows(&["OOO"]).unwrap(), &mut set);
        assert_eq!(set.len(), 3);
        find_matches_into(&Board::from_rows(&["OGO"]).unwrap(), &mut set);
        assert!(set.is_empty());
    }
}
