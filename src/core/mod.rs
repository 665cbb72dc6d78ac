//! Core module - pure game rules with no external dependencies
//!
//! This module contains board occupancy, turn order, and outcome detection.
//! It has zero dependencies on UI, input handling, or I/O.

pub mod board;
pub mod session;

// Re-export commonly used types
pub use board::{Board, CellSet, WIN_LINES};
pub use session::{GameSession, MoveError, MoveResult};
