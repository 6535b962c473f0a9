//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the match rules and the resolution state machine.
//! It has **no dependencies** on terminals or input devices, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Time is a virtual clock advanced by the caller
//! - **Portable**: Any front end can drive it through clicks and ticks
//!
//! # Module Structure
//!
//! - [`board`]: tile grid with swap, clear, gravity collapse and normalization
//! - [`matcher`]: row/column run detection into a coordinate-keyed set
//! - [`animation`]: exponential ease-out of per-tile vertical offsets
//! - [`scheduler`]: virtual timer queue for rollback delays and cascade pauses
//! - [`session`]: selection, swap validation and the cascade loop
//! - [`config`]: static tuning options loaded from TOML or the environment
//! - [`rng`]: seeded LCG for tile colors
//! - [`snapshot`]: read-only view handed to renderers
//!
//! # Game Rules
//!
//! - Tap a tile, then an edge-adjacent tile, to swap them
//! - A swap that lines up 3+ equal colors in a row or column is kept; any other
//!   swap snaps back after a short delay
//! - Matched tiles vanish, the columns fall, new tiles drop in from the top, and
//!   any new matches resolve as a chain reaction
//! - Input is ignored until the board settles
//!
//! # Example
//!
//! ```
//! use tui_gems_core::{GameConfig, Session};
//! use tui_gems_types::Coord;
//!
//! let config = GameConfig { seed: Some(12345), ..GameConfig::default() };
//! let mut session = Session::new(config).unwrap();
//!
//! session.click(Coord::new(0, 0)).unwrap();
//! session.click(Coord::new(1, 0)).unwrap();
//!
//! // Drive frames until the swap is resolved or reverted.
//! session.settle(10_000).unwrap();
//! assert!(!session.busy());
//! ```
//!
//! # Timing
//!
//! Call [`Session::tick`](session::Session::tick) once per frame with the
//! elapsed milliseconds. Each call runs every due timer task and then advances
//! the drop animation by one frame.

pub mod animation;
pub mod board;
pub mod config;
pub mod error;
pub mod matcher;
pub mod rng;
pub mod scheduler;
pub mod session;
pub mod snapshot;

pub use tui_gems_types as types;

// Re-export commonly used types for convenience
pub use animation::{decay_offset, ticks_to_settle, AnimState, AnimationDriver};
pub use board::{Board, CollapseReport};
pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use matcher::{find_matches, find_matches_into, has_match, MatchSet};
pub use rng::SimpleRng;
pub use scheduler::{ScheduledTask, Scheduler, TimerQueue};
pub use session::{ClickOutcome, Session};
pub use snapshot::GameSnapshot;
