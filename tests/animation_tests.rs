//! Drop animation tests

use tui_gems::core::{decay_offset, ticks_to_settle, AnimState, AnimationDriver, Board, SimpleRng};
use tui_gems::types::{Coord, TileColor, DEFAULT_DECAY_FACTOR, DEFAULT_SETTLE_EPSILON};

fn frames_until_zero(mut offset: f32) -> u32 {
    let mut frames = 0;
    while offset != 0.0 {
        offset = decay_offset(offset, DEFAULT_DECAY_FACTOR, DEFAULT_SETTLE_EPSILON);
        frames += 1;
    }
    frames
}

#[test]
fn test_ticks_to_settle_matches_simulation() {
    for (offset, expected) in [(-50.0, 8), (-150.0, 10)] {
        assert_eq!(frames_until_zero(offset), expected);
        assert_eq!(
            ticks_to_settle(offset, DEFAULT_DECAY_FACTOR, DEFAULT_SETTLE_EPSILON),
            expected
        );
    }
    assert_eq!(ticks_to_settle(0.0, DEFAULT_DECAY_FACTOR, DEFAULT_SETTLE_EPSILON), 0);
}

#[test]
fn test_offsets_shrink_monotonically() {
    let mut offset = -400.0f32;
    while offset != 0.0 {
        let next = decay_offset(offset, DEFAULT_DECAY_FACTOR, DEFAULT_SETTLE_EPSILON);
        assert!(next.abs() < offset.abs());
        assert!(next <= 0.0);
        offset = next;
    }
}

#[test]
fn test_driver_settles_after_collapse() {
    let mut board = Board::from_rows(&["RG", "BY", "OP"]).unwrap();
    board.set(Coord::new(0, 1), None);
    board.set(Coord::new(0, 2), None);
    let palette = TileColor::ALL.to_vec();
    let mut rng = SimpleRng::new(8);
    board.collapse(&mut rng, &palette, 50.0);
    assert!(!board.is_settled());

    let driver = AnimationDriver::default();
    let expected = ticks_to_settle(-100.0, driver.decay_factor(), driver.settle_epsilon());
    let mut frames = 0;
    loop {
        frames += 1;
        if driver.step(&mut board) == AnimState::Settled {
            break;
        }
        assert!(frames < 100);
    }

    // The largest drop (two rows) decides the frame count.
    assert_eq!(frames, expected);
    assert!(board.is_settled());
    assert_eq!(board.color_at(Coord::new(0, 2)), Some(TileColor::Red));
}

#[test]
fn test_settled_board_reports_settled_immediately() {
    let mut board = Board::from_rows(&["RGB"]).unwrap();
    assert_eq!(AnimationDriver::default().step(&mut board), AnimState::Settled);
}
