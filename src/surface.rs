//! Presentation contract between the interaction layer and a rendering backend.
//!
//! The controller never draws. It narrates the game through these calls and a
//! backend (the terminal view here, a recording fake in tests) decides what
//! each of them looks like.

use crate::types::{Player, Point};

/// Handle for one marker visual owned by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(u32);

impl MarkerId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// What a rendering backend must provide.
///
/// Coordinates are the backend's own surface coordinates; the controller only
/// ever passes back points it received from the event source or from
/// `begin_drag`.
pub trait Surface {
    /// (Re)build the 3x3 grid of empty drop targets, cells 0..=8 row-major.
    /// Any markers from a previous game are gone afterwards.
    fn render_grid(&mut self);

    /// Resolve a point to the grid cell underneath it, ignoring any dragged
    /// avatar. None when the point is between cells or off the grid.
    fn hit_test(&self, at: Point) -> Option<usize>;

    /// The draggable marker under the point, if any.
    fn marker_at(&self, at: Point) -> Option<MarkerId>;

    /// Turn the drop-target highlight for a cell on or off.
    fn set_highlight(&mut self, cell: usize, on: bool);

    /// Paint a cell as permanently taken.
    fn mark_occupied(&mut self, cell: usize);

    /// Create a fresh draggable marker in the player's tray.
    fn spawn_marker(&mut self, player: Player) -> MarkerId;

    /// Detach the marker so it floats above the grid, snapshot its placement
    /// for a later `cancel_drag`, and report its current top-left corner.
    fn begin_drag(&mut self, marker: MarkerId) -> Point;

    /// Move the floating avatar so its top-left sits at `top_left`.
    fn drag_to(&mut self, marker: MarkerId, top_left: Point);

    /// Put the marker back exactly where `begin_drag` found it.
    fn cancel_drag(&mut self, marker: MarkerId);

    /// Commit the marker into a cell; it stops being draggable.
    fn place_marker(&mut self, marker: MarkerId, cell: usize);

    /// Replace the status line text.
    fn show_status(&mut self, text: &str);

    /// Show or hide the end-of-game overlay.
    fn show_overlay(&mut self, visible: bool);

    /// Show or hide a player's marker tray.
    fn set_player_visible(&mut self, player: Player, visible: bool);
}
