//! Input module - pointer gesture recognition and game wiring
//!
//! `drag` turns raw pointer positions into gesture transitions;
//! `controller` turns those transitions into rule checks and surface calls.

pub mod controller;
pub mod drag;

pub use controller::GameController;
pub use drag::{DragPhase, DragSession, HoverChange, Motion, Release};
