//! Interaction controller - wires pointer events to the rules and the surface
//!
//! One controller owns one running game: the rules session, the drag machine,
//! the marker currently up for grabs, and which cell is highlighted. Event
//! sources feed `on_pointer_down/move/up`; the surface renders the story.

use crate::core::GameSession;
use crate::input::drag::{DragPhase, DragSession, HoverChange, Motion, Release};
use crate::surface::{MarkerId, Surface};
use crate::types::{
    Outcome, Player, Point, PointerButton, DRAW_TEXT, FIRST_WINS_TEXT, SECOND_WINS_TEXT,
};

/// Drives a game of tic-tac-toe from raw pointer events.
pub struct GameController<S: Surface> {
    surface: S,
    rules: GameSession,
    drag: DragSession,
    /// The one marker the current player may pick up.
    active_marker: Option<MarkerId>,
    /// The cell whose highlight is currently on.
    lit: Option<usize>,
}

impl<S: Surface> GameController<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            rules: GameSession::new(),
            drag: DragSession::new(),
            active_marker: None,
            lit: None,
        }
    }

    /// Same controller, custom drag threshold in pointer units.
    pub fn with_drag_threshold(surface: S, threshold: i32) -> Self {
        Self {
            drag: DragSession::with_threshold(threshold),
            ..Self::new(surface)
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn rules(&self) -> &GameSession {
        &self.rules
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Begin a fresh game: empty grid, first player to move, one draggable
    /// marker in their tray.
    pub fn start_game(&mut self) {
        self.rules = GameSession::new();
        self.drag.reset();
        self.lit = None;

        self.surface.render_grid();
        self.surface.show_status("");
        self.surface.show_overlay(false);
        self.surface.set_player_visible(Player::First, true);
        self.surface.set_player_visible(Player::Second, false);
        self.active_marker = Some(self.surface.spawn_marker(Player::First));
    }

    /// Pointer pressed. Starts a gesture when the primary button lands on the
    /// marker that is currently up for grabs.
    pub fn on_pointer_down(&mut self, button: PointerButton, at: Point) {
        if button != PointerButton::Primary {
            return;
        }
        let marker = match self.surface.marker_at(at) {
            Some(marker) => marker,
            None => return,
        };
        if Some(marker) != self.active_marker {
            return;
        }
        self.drag.press(marker, at);
    }

    /// Pointer moved. Promotes a press into a drag past the threshold, then
    /// tracks the avatar and the hovered cell.
    pub fn on_pointer_move(&mut self, at: Point) {
        match self.drag.motion(at) {
            Motion::None | Motion::Pending => {}
            Motion::Promote { marker } => {
                let top_left = self.surface.begin_drag(marker);
                self.drag.promote(at, top_left);
                self.track(marker, at);
            }
            Motion::Track { marker } => self.track(marker, at),
        }
    }

    /// Pointer released. A drag over a legal cell commits the move; anything
    /// else rolls the gesture back. Non-primary buttons never end a gesture.
    pub fn on_pointer_up(&mut self, button: PointerButton, at: Point) {
        if button != PointerButton::Primary {
            return;
        }
        // The release position is authoritative for the drop target.
        if self.drag.phase() == DragPhase::Dragging {
            self.drag.update_hover(self.surface.hit_test(at));
        }
        match self.drag.release() {
            Release::None | Release::Tap { .. } => {}
            Release::Drop { marker, cell } => self.finish_drop(marker, cell),
        }
    }

    fn track(&mut self, marker: MarkerId, at: Point) {
        if let Some(top_left) = self.drag.avatar_position(at) {
            self.surface.drag_to(marker, top_left);
        }
        let cell = self.surface.hit_test(at);
        match self.drag.update_hover(cell) {
            HoverChange::Unchanged => {}
            HoverChange::Entered(to) | HoverChange::Moved { to, .. } => self.light(Some(to)),
            HoverChange::Left(_) => self.light(None),
        }
    }

    /// Retarget the drop highlight. Only a cell the current player could
    /// legally drop on lights up.
    fn light(&mut self, cell: Option<usize>) {
        if let Some(prev) = self.lit.take() {
            self.surface.set_highlight(prev, false);
        }
        if let Some(cell) = cell {
            if self.rules.can_drop(cell) {
                self.surface.set_highlight(cell, true);
                self.lit = Some(cell);
            }
        }
    }

    fn finish_drop(&mut self, marker: MarkerId, cell: Option<usize>) {
        self.light(None);

        let target = match cell {
            Some(cell) if self.rules.can_drop(cell) => cell,
            _ => {
                self.surface.cancel_drag(marker);
                return;
            }
        };

        let player = self.rules.current_player();
        match self.rules.apply_move(target, player) {
            Ok(result) => {
                self.surface.place_marker(marker, target);
                self.surface.mark_occupied(target);
                self.active_marker = None;
                if result.outcome.is_terminal() {
                    self.finish_game(result.outcome);
                } else {
                    self.next_turn(result.current_player);
                }
            }
            Err(_) => {
                // Unreachable past the can_drop gate; degrade to a cancel.
                self.surface.cancel_drag(marker);
            }
        }
    }

    fn next_turn(&mut self, player: Player) {
        self.surface.set_player_visible(player.other(), false);
        self.surface.set_player_visible(player, true);
        self.active_marker = Some(self.surface.spawn_marker(player));
    }

    fn finish_game(&mut self, outcome: Outcome) {
        let text = match outcome {
            Outcome::FirstWins => FIRST_WINS_TEXT,
            Outcome::SecondWins => SECOND_WINS_TEXT,
            Outcome::Draw => DRAW_TEXT,
            Outcome::InProgress => return,
        };
        self.surface.show_status(text);
        self.surface.show_overlay(true);
        self.surface.set_player_visible(Player::First, false);
        self.surface.set_player_visible(Player::Second, false);
    }
}
