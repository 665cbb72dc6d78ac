//! Drag-and-drop tic-tac-toe for the terminal.
//!
//! Crate layout:
//! - `core`: board occupancy, turn order, outcome detection. Pure.
//! - `input`: the drag gesture machine and the interaction controller.
//! - `surface`: the contract a rendering backend implements.
//! - `term`: crossterm presentation (canvas, board view, screen).
//! - `types`: shared plain types and constants.

pub mod core;
pub mod input;
pub mod surface;
pub mod term;
pub mod types;
