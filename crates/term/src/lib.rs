//! Terminal front end for the tile board.
//!
//! Rendering goes through a plain framebuffer instead of a widget toolkit, so
//! every frame is a pure function of a `core::GameSnapshot` and can be tested
//! without a terminal. `TerminalRenderer` is the only part that touches stdout.

pub mod board_view;
pub mod fb;
pub mod render_throttle;
pub mod renderer;

pub use tui_gems_core as core;
pub use tui_gems_types as types;

pub use board_view::{tile_rgb, BoardLayout, BoardView, Viewport};
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use render_throttle::{frame_fingerprint, RenderThrottle};
pub use renderer::{encode_diff_into, encode_frame, encode_full_into, TerminalRenderer};
