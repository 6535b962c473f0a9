//! Match detection tests

use tui_gems::core::{find_matches, find_matches_into, has_match, Board, MatchSet};
use tui_gems::types::Coord;

fn coords(set: &MatchSet) -> Vec<(u8, u8)> {
    set.iter().map(|c| (c.x, c.y)).collect()
}

#[test]
fn test_no_match_on_checkerboard() {
    let board = Board::from_rows(&["RGRG", "GRGR", "RGRG", "GRGR"]).unwrap();
    assert!(find_matches(&board).is_empty());
    assert!(!has_match(&board));
}

#[test]
fn test_run_at_end_of_row_is_found() {
    let board = Board::from_rows(&["GBRRR"]).unwrap();
    assert_eq!(coords(&find_matches(&board)), vec![(2, 0), (3, 0), (4, 0)]);
}

#[test]
fn test_run_at_bottom_of_column_is_found() {
    let board = Board::from_rows(&["R", "G", "G", "G"]).unwrap();
    assert_eq!(coords(&find_matches(&board)), vec![(0, 1), (0, 2), (0, 3)]);
}

#[test]
fn test_l_shape_shares_corner() {
    let board = Board::from_rows(&["YYYB", "YGRB", "YRGP"]).unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 5);
    assert!(matches.contains(Coord::new(0, 0)));
    assert!(matches.contains(Coord::new(2, 0)));
    assert!(matches.contains(Coord::new(0, 2)));
    assert!(!matches.contains(Coord::new(3, 0)));
}

#[test]
fn test_two_separate_runs_in_one_row() {
    let board = Board::from_rows(&["RRRGBBB"]).unwrap();
    let matches = find_matches(&board);
    assert_eq!(matches.len(), 6);
    assert!(!matches.contains(Coord::new(3, 0)));
}

#[test]
fn test_gap_splits_runs() {
    let board = Board::from_rows(&["RR.RR", "BB.BB"]).unwrap();
    assert!(!has_match(&board));
}

#[test]
fn test_pairs_are_not_matches() {
    let board = Board::from_rows(&["RRGG", "BBYY", "RRGG"]).unwrap();
    assert!(find_matches(&board).is_empty());
}

#[test]
fn test_find_matches_into_reuses_set() {
    let mut set = MatchSet::new(1, 1);
    let first = Board::from_rows(&["RRR", "GBY"]).unwrap();
    find_matches_into(&first, &mut set);
    assert_eq!(set.len(), 3);

    let second = Board::from_rows(&["RG", "GR"]).unwrap();
    find_matches_into(&second, &mut set);
    assert!(set.is_empty());
}
