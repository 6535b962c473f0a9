//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key and mouse events onto grid coordinates and keeps the
//! keyboard cursor. Selections are suppressed while the engine is busy.

pub mod gate;
pub mod map;

pub use tui_gems_types as types;

pub use gate::InputGate;
pub use map::{handle_key_event, should_quit};
