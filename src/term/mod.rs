//! Terminal presentation module.
//!
//! A small, game-oriented rendering layer: the board view keeps scene state
//! and renders into a plain canvas of styled characters, which the screen
//! flushes to the terminal.
//!
//! Goals:
//! - Keep `core` and `input` free of terminal types
//! - Keep rendering pure and unit-testable up to the final flush
//! - One fixed-size scene, repainted whole (no dirty tracking needed)

pub mod canvas;
pub mod screen;
pub mod view;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use screen::Screen;
pub use view::BoardView;
