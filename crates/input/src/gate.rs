//! Input gate: turns keys and mouse clicks into grid selections.
//!
//! The gate owns the keyboard cursor. Cursor movement is always allowed so the
//! player can line up the next move during a cascade, but selections are
//! dropped while the engine reports itself busy.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::map::handle_key_event;
use crate::types::{Coord, InputIntent};

#[derive(Debug, Clone)]
pub struct InputGate {
    cursor: Coord,
    columns: u8,
    rows: u8,
}

impl InputGate {
    pub fn new(columns: u8, rows: u8) -> Self {
        Self {
            cursor: Coord::new(0, 0),
            columns,
            rows,
        }
    }

    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Apply an intent; returns the coordinate to click, if any.
    pub fn apply(&mut self, intent: InputIntent, busy: bool) -> Option<Coord> {
        if let Some((dx, dy)) = intent.cursor_delta() {
            self.cursor = Coord::new(
                step(self.cursor.x, dx, self.columns),
                step(self.cursor.y, dy, self.rows),
            );
            return None;
        }

        if busy {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, busy: bool) -> Option<Coord> {
        let intent = handle_key_event(key)?;
        self.apply(intent, busy)
    }

    /// A pointer press already resolved to a grid cell (or to nothing).
    ///
    /// The cursor follows the pointer even while busy.
    pub fn handle_pointer(&mut self, target: Option<Coord>, busy: bool) -> Option<Coord> {
        let coord = target.filter(|c| c.x < self.columns && c.y < self.rows)?;
        self.cursor = coord;
        if busy {
            None
        } else {
            Some(coord)
        }
    }

    /// Left-button presses are resolved through `hit_test` (terminal column, row).
    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        hit_test: impl Fn(u16, u16) -> Option<Coord>,
        busy: bool,
    ) -> Option<Coord> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.handle_pointer(hit_test(mouse.column, mouse.row), busy)
            }
            _ => None,
        }
    }
}

/// Move one cell along an axis, clamped to `[0, len)`
fn step(value: u8, delta: i8, len: u8) -> u8 {
    let next = value as i16 + delta as i16;
    next.clamp(0, len.saturating_sub(1) as i16) as u8
}
