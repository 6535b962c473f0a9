//! Drop animation.
//!
//! Every frame each non-zero tile offset is multiplied by the decay factor and
//! snapped to exactly zero once its magnitude falls below the settle epsilon.
//! This gives an exponential ease-out; both constants are tuning knobs.

use crate::board::Board;

/// Result of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimState {
    /// At least one tile is still moving
    Animating,
    /// Every offset is exactly zero
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDriver {
    decay_factor: f32,
    settle_epsilon: f32,
}

impl AnimationDriver {
    pub fn new(decay_factor: f32, settle_epsilon: f32) -> Self {
        Self {
            decay_factor,
            settle_epsilon,
        }
    }

    pub fn decay_factor(&self) -> f32 {
        self.decay_factor
    }

    pub fn settle_epsilon(&self) -> f32 {
        self.settle_epsilon
    }

    /// Advance every tile by one frame
    pub fn step(&self, board: &mut Board) -> AnimState {
        let mut settled = true;
        for tile in board.cells_mut().iter_mut().flatten() {
            if tile.offset != 0.0 {
                tile.offset = decay_offset(tile.offset, self.decay_factor, self.settle_epsilon);
                if tile.offset != 0.0 {
                    settled = false;
                }
            }
        }

        if settled {
            AnimState::Settled
        } else {
            AnimState::Animating
        }
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(
            crate::types::DEFAULT_DECAY_FACTOR,
            crate::types::DEFAULT_SETTLE_EPSILON,
        )
    }
}

/// One decay step for a single offset
pub fn decay_offset(offset: f32, decay_factor: f32, settle_epsilon: f32) -> f32 {
    let next = offset * decay_factor;
    if next.abs() < settle_epsilon {
        0.0
    } else {
        next
    }
}

/// Frames needed for `offset` to reach zero: `ceil(log(eps/|o|) / log(d))`,
/// at least one frame for any non-zero offset.
pub fn ticks_to_settle(offset: f32, decay_factor: f32, settle_epsilon: f32) -> u32 {
    if offset == 0.0 {
        return 0;
    }
    let ratio = (settle_epsilon / offset.abs()).ln() / decay_factor.ln();
    ratio.ceil().max(1.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, Tile, TileColor};

    #[test]
    fn test_decay_offset_snaps() {
        assert_eq!(decay_offset(-50.0, 0.5, 1.0), -25.0);
        assert_eq!(decay_offset(-1.5, 0.6, 1.0), 0.0);
        assert_eq!(decay_offset(0.0, 0.6, 1.0), 0.0);
    }

    #[test]
    fn test_ticks_to_settle_matches_simulation() {
        for start in [-400.0f32, -150.0, -50.0, -5.0, -1.2, 3.0, 75.0] {
            let mut offset = start;
            let mut ticks = 0;
            while offset != 0.0 {
                offset = decay_offset(offset, 0.6, 1.0);
                ticks += 1;
            }
            assert_eq!(ticks, ticks_to_settle(start, 0.6, 1.0), "start {start}");
        }
    }

    #[test]
    fn test_step_reports_settled() {
        let mut board = Board::new(1, 2);
        board.set(Coord::new(0, 0), Some(Tile::new(TileColor::Red).with_offset(-1.2)));
        board.set(Coord::new(0, 1), Some(Tile::new(TileColor::Blue)));

        let driver = AnimationDriver::default();
        assert_eq!(driver.step(&mut board), AnimState::Settled);
        assert!(board.is_settled());
    }

    #[test]
    fn test_step_keeps_animating() {
        let mut board = Board::new(1, 1);
        board.set(Coord::new(0, 0), Some(Tile::new(TileColor::Red).with_offset(-100.0)));

        let driver = AnimationDriver::new(0.5, 1.0);
        assert_eq!(driver.step(&mut board), AnimState::Animating);
        assert_eq!(board.get(Coord::new(0, 0)).flatten().unwrap().offset, -50.0);
    }
}
