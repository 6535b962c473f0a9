//! Core types module - shared data structures and constants
//!
//! This module defines the value types used throughout the application.
//! They are plain data with no game logic, so they can be shared by the
//! engine, the input layer and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Columns**: 8 by default (indexed 0-7, left to right)
//! - **Rows**: 8 by default (indexed 0-7, top to bottom)
//! - Both are configurable up to [`MAX_DIMENSION`]
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval (~60 FPS) |
//! | `DEFAULT_ROLLBACK_DELAY_MS` | 200 | Delay before a non-matching swap snaps back |
//! | `DEFAULT_CASCADE_PAUSE_MS` | 200 | Pause between clear, collapse and the next clear |
//!
//! # Animation Constants
//!
//! Offsets decay exponentially: every frame each non-zero offset is multiplied by
//! `DEFAULT_DECAY_FACTOR` and snaps to zero once its magnitude is below
//! `DEFAULT_SETTLE_EPSILON`.
//!
//! # Examples
//!
//! ```
//! use tui_gems_types::{Coord, Tile, TileColor};
//!
//! let color = TileColor::from_str("RED").unwrap();
//! assert_eq!(color, TileColor::Red);
//! assert_eq!(TileColor::from_letter('p'), Some(TileColor::Purple));
//!
//! let a = Coord::new(3, 4);
//! assert!(a.is_adjacent(Coord::new(3, 5)));
//! assert!(!a.is_adjacent(Coord::new(4, 5)));
//!
//! let tile = Tile::new(TileColor::Blue).with_offset(-50.0);
//! assert!(!tile.is_settled());
//! ```

use serde::{Deserialize, Serialize};

/// Default number of columns
pub const DEFAULT_COLUMNS: u8 = 8;

/// Default number of rows
pub const DEFAULT_ROWS: u8 = 8;

/// Largest accepted value for either board dimension
pub const MAX_DIMENSION: u8 = 64;

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Default size of one tile in offset units
pub const DEFAULT_TILE_SIZE: f32 = 50.0;

/// Per-frame multiplier applied to animation offsets
pub const DEFAULT_DECAY_FACTOR: f32 = 0.6;

/// Offsets with a smaller magnitude snap to zero
pub const DEFAULT_SETTLE_EPSILON: f32 = 1.0;

/// Delay before a swap without a match is reverted
pub const DEFAULT_ROLLBACK_DELAY_MS: u32 = 200;

/// Pause between cascade steps
pub const DEFAULT_CASCADE_PAUSE_MS: u32 = 200;

/// Upper bound on clear cycles triggered by a single swap
pub const DEFAULT_MAX_CHAIN_DEPTH: u32 = 256;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning_constants() {
        assert_eq!(DEFAULT_COLUMNS, 8);
        assert_eq!(DEFAULT_ROWS, 8);
        assert_eq!(DEFAULT_TILE_SIZE, 50.0);
        assert_eq!(DEFAULT_DECAY_FACTOR, 0.6);
        assert_eq!(DEFAULT_SETTLE_EPSILON, 1.0);
        assert_eq!(DEFAULT_ROLLBACK_DELAY_MS, 200);
        assert_eq!(DEFAULT_CASCADE_PAUSE_MS, 200);
        assert_eq!(TileColor::ALL.len(), 6);
    }

    #[test]
    fn manhattan_distance() {
        let a = Coord::new(0, 0);
        assert_eq!(a.manhattan(Coord::new(2, 2)), 4);
        assert_eq!(Coord::new(5, 1).manhattan(Coord::new(4, 1)), 1);
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn color_letters_roundtrip() {
        for color in TileColor::ALL {
            assert_eq!(TileColor::from_letter(color.letter()), Some(color));
            assert_eq!(TileColor::from_str(color.as_str()), Some(color));
        }
        assert_eq!(TileColor::from_letter('x'), None);
    }

    #[test]
    fn phase_busy_flag() {
        assert!(!Phase::Idle.is_busy());
        assert!(Phase::AwaitingRevert.is_busy());
        assert!(Phase::Resolving.is_busy());
        assert!(Phase::Animating.is_busy());
    }
}

/// The six tile colors of the default palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl TileColor {
    /// Every color, in palette order
    pub const ALL: [TileColor; 6] = [
        TileColor::Red,
        TileColor::Orange,
        TileColor::Yellow,
        TileColor::Green,
        TileColor::Blue,
        TileColor::Purple,
    ];

    /// Parse color from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_gems_types::TileColor;
    ///
    /// assert_eq!(TileColor::from_str("green"), Some(TileColor::Green));
    /// assert_eq!(TileColor::from_str("Orange"), Some(TileColor::Orange));
    /// assert_eq!(TileColor::from_str("teal"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "red" => Some(TileColor::Red),
            "orange" => Some(TileColor::Orange),
            "yellow" => Some(TileColor::Yellow),
            "green" => Some(TileColor::Green),
            "blue" => Some(TileColor::Blue),
            "purple" => Some(TileColor::Purple),
            _ => None,
        }
    }

    /// Convert to lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TileColor::Red => "red",
            TileColor::Orange => "orange",
            TileColor::Yellow => "yellow",
            TileColor::Green => "green",
            TileColor::Blue => "blue",
            TileColor::Purple => "purple",
        }
    }

    /// Parse a single-letter code (`R O Y G B P`, case-insensitive)
    pub fn from_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'R' => Some(TileColor::Red),
            'O' => Some(TileColor::Orange),
            'Y' => Some(TileColor::Yellow),
            'G' => Some(TileColor::Green),
            'B' => Some(TileColor::Blue),
            'P' => Some(TileColor::Purple),
            _ => None,
        }
    }

    /// Uppercase single-letter code
    pub fn letter(&self) -> char {
        match self {
            TileColor::Red => 'R',
            TileColor::Orange => 'O',
            TileColor::Yellow => 'Y',
            TileColor::Green => 'G',
            TileColor::Blue => 'B',
            TileColor::Purple => 'P',
        }
    }
}

/// A grid position: `x` is the column, `y` the row, both 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: u8,
    pub y: u8,
}

impl Coord {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    pub fn manhattan(&self, other: Coord) -> u32 {
        (self.x.abs_diff(other.x) as u32) + (self.y.abs_diff(other.y) as u32)
    }

    /// True when the two coordinates share an edge
    pub fn is_adjacent(&self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

/// A colored tile with its pending vertical animation offset
///
/// The offset is measured in the same units as the configured tile size.
/// Negative values mean the tile is drawn above its slot and is still falling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tile {
    pub color: TileColor,
    pub offset: f32,
}

impl Tile {
    /// Create a settled tile
    pub fn new(color: TileColor) -> Self {
        Self { color, offset: 0.0 }
    }

    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// A settled tile is not mid-animation
    pub fn is_settled(&self) -> bool {
        self.offset == 0.0
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (only visible mid-cascade)
/// - `Some(Tile)`: Occupied cell
pub type Cell = Option<Tile>;

/// Resolution state of a session
///
/// - **Idle**: waiting for input
/// - **AwaitingRevert**: a swap without a match is shown until it snaps back
/// - **Resolving**: matched cells are cleared and the next step is scheduled
/// - **Animating**: tiles are sliding into their slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingRevert,
    Resolving,
    Animating,
}

impl Phase {
    /// Input is rejected in every phase except `Idle`
    pub fn is_busy(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingRevert => "revert",
            Phase::Resolving => "resolving",
            Phase::Animating => "animating",
        }
    }
}

/// Player intents produced by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIntent {
    /// Move the grid cursor one cell left
    CursorLeft,
    /// Move the grid cursor one cell right
    CursorRight,
    /// Move the grid cursor one cell up
    CursorUp,
    /// Move the grid cursor one cell down
    CursorDown,
    /// Pick the tile under the cursor
    Select,
}

impl InputIntent {
    /// Cursor delta for movement intents
    pub fn cursor_delta(&self) -> Option<(i8, i8)> {
        match self {
            InputIntent::CursorLeft => Some((-1, 0)),
            InputIntent::CursorRight => Some((1, 0)),
            InputIntent::CursorUp => Some((0, -1)),
            InputIntent::CursorDown => Some((0, 1)),
            InputIntent::Select => None,
        }
    }
}
