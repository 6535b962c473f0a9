//! TUI Gems (workspace facade crate).
//!
//! Re-exports the member crates under `tui_gems::{core,input,term,types}` so the
//! binary, integration tests and benches share one import path.

pub use tui_gems_core as core;
pub use tui_gems_input as input;
pub use tui_gems_term as term;
pub use tui_gems_types as types;
