//! Frame pacing for the terminal loop.
//!
//! While tiles are falling every tick produces a new frame. Once the board is
//! still, a frame is only drawn when something visible changed, plus a slow
//! keep-alive redraw so a clobbered terminal eventually repairs itself.

use crate::core::GameSnapshot;
use crate::types::Coord;

#[derive(Debug, Clone)]
pub struct RenderThrottle {
    min_static_interval_ms: u64,
    last_render_ms: u64,
    last_fingerprint: Option<u64>,
}

impl RenderThrottle {
    pub fn new(min_static_interval_ms: u64) -> Self {
        Self {
            min_static_interval_ms,
            last_render_ms: 0,
            last_fingerprint: None,
        }
    }

    /// Decide whether to render a new frame.
    ///
    /// Non-static frames always render. Static frames render on a fingerprint
    /// change, otherwise at most once per `min_static_interval_ms`.
    pub fn should_render(&mut self, now_ms: u64, fingerprint: u64, is_static: bool) -> bool {
        let changed = self.last_fingerprint != Some(fingerprint);
        let stale = now_ms.saturating_sub(self.last_render_ms) >= self.min_static_interval_ms;

        if !is_static || changed || stale {
            self.last_render_ms = now_ms;
            self.last_fingerprint = Some(fingerprint);
            return true;
        }
        false
    }

    /// Forget the last frame, e.g. after a terminal resize.
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
    }
}

/// Summarise everything the board view draws that can change between frames.
pub fn frame_fingerprint(snap: &GameSnapshot, cursor: Option<Coord>, width: u16, height: u16) -> u64 {
    let mut h = snap.revision;
    h = mix(h, snap.phase as u64);
    h = mix(h, snap.chain_depth as u64);
    h = mix(h, coord_bits(snap.selection));
    h = mix(h, coord_bits(cursor));
    h = mix(h, ((width as u64) << 16) | height as u64);
    h
}

fn coord_bits(coord: Option<Coord>) -> u64 {
    match coord {
        Some(c) => 0x1_0000 | ((c.x as u64) << 8) | c.y as u64,
        None => 0,
    }
}

// splitmix64 finalizer step
fn mix(h: u64, v: u64) -> u64 {
    let mut z = h ^ v.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_tracks_cursor_and_selection() {
        let snap = GameSnapshot::default();
        let base = frame_fingerprint(&snap, None, 80, 24);
        assert_eq!(base, frame_fingerprint(&snap, None, 80, 24));
        assert_ne!(base, frame_fingerprint(&snap, Some(Coord::new(0, 0)), 80, 24));
        assert_ne!(base, frame_fingerprint(&snap, None, 81, 24));

        let mut selected = snap.clone();
        selected.selection = Some(Coord::new(1, 2));
        assert_ne!(base, frame_fingerprint(&selected, None, 80, 24));

        let mut bumped = snap.clone();
        bumped.revision += 1;
        assert_ne!(base, frame_fingerprint(&bumped, None, 80, 24));
    }
}
