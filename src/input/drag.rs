//! Drag gesture state machine: press, threshold, track, release.
//!
//! Raw pointer positions come in; discrete gesture transitions come out.
//! The machine knows nothing about the board or move legality. It only
//! answers "is this a click or a drag, and which cell is under the pointer".

use crate::surface::MarkerId;
use crate::types::{Offset, Point, DRAG_THRESHOLD};

/// Externally visible gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Pressed,
    Dragging,
}

/// What a pointer movement amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// No gesture in flight.
    None,
    /// Still within the jitter threshold, keep waiting.
    Pending,
    /// Threshold crossed. The caller detaches the avatar through the surface
    /// and then calls `promote` with the avatar's reported top-left.
    Promote { marker: MarkerId },
    /// Dragging. The caller repositions the avatar and re-hit-tests.
    Track { marker: MarkerId },
}

/// How the hovered cell changed on one movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Unchanged,
    Entered(usize),
    Left(usize),
    Moved { from: usize, to: usize },
}

/// What a release amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// No gesture was in flight.
    None,
    /// Press and release below the threshold: a click, nothing was detached.
    Tap { marker: MarkerId },
    /// A dragged marker was let go, possibly over a cell.
    Drop { marker: MarkerId, cell: Option<usize> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Pressed {
        marker: MarkerId,
        origin: Point,
    },
    Dragging {
        marker: MarkerId,
        offset: Offset,
        hovered: Option<usize>,
    },
}

/// Tracks one pointer gesture at a time.
#[derive(Debug, Clone)]
pub struct DragSession {
    state: State,
    threshold: i32,
}

impl DragSession {
    pub fn new() -> Self {
        Self::with_threshold(DRAG_THRESHOLD)
    }

    /// Custom jitter threshold in pointer units. Cell-quantized pointers
    /// (a terminal mouse) want 1; pixel pointers want the default.
    pub fn with_threshold(threshold: i32) -> Self {
        Self {
            state: State::Idle,
            threshold,
        }
    }

    pub fn phase(&self) -> DragPhase {
        match self.state {
            State::Idle => DragPhase::Idle,
            State::Pressed { .. } => DragPhase::Pressed,
            State::Dragging { .. } => DragPhase::Dragging,
        }
    }

    /// The cell currently under the pointer, while dragging.
    pub fn hovered(&self) -> Option<usize> {
        match self.state {
            State::Dragging { hovered, .. } => hovered,
            _ => None,
        }
    }

    /// Begin a gesture on `marker` at pointer position `origin`.
    /// Ignored (returns false) while another gesture is live.
    pub fn press(&mut self, marker: MarkerId, origin: Point) -> bool {
        if !matches!(self.state, State::Idle) {
            return false;
        }
        self.state = State::Pressed { marker, origin };
        true
    }

    /// Feed a pointer movement and learn what it meant.
    pub fn motion(&mut self, at: Point) -> Motion {
        match self.state {
            State::Idle => Motion::None,
            State::Pressed { marker, origin } => {
                let delta = at.offset_from(origin);
                if delta.dx.abs() < self.threshold && delta.dy.abs() < self.threshold {
                    Motion::Pending
                } else {
                    Motion::Promote { marker }
                }
            }
            State::Dragging { marker, .. } => Motion::Track { marker },
        }
    }

    /// Enter the dragging phase after the avatar has been detached.
    ///
    /// `at` is the pointer position that crossed the threshold and
    /// `avatar_top_left` where the surface reports the avatar. Their
    /// difference stays fixed for the rest of the gesture.
    pub fn promote(&mut self, at: Point, avatar_top_left: Point) {
        if let State::Pressed { marker, .. } = self.state {
            self.state = State::Dragging {
                marker,
                offset: at.offset_from(avatar_top_left),
                hovered: None,
            };
        }
    }

    /// Where the avatar's top-left belongs for a pointer at `at`.
    /// None unless a drag is in progress.
    pub fn avatar_position(&self, at: Point) -> Option<Point> {
        match self.state {
            State::Dragging { offset, .. } => Some(at.minus(offset)),
            _ => None,
        }
    }

    /// Record which cell is under the pointer and report the transition.
    pub fn update_hover(&mut self, cell: Option<usize>) -> HoverChange {
        match &mut self.state {
            State::Dragging { hovered, .. } => {
                let prev = *hovered;
                *hovered = cell;
                match (prev, cell) {
                    (None, None) => HoverChange::Unchanged,
                    (Some(a), Some(b)) if a == b => HoverChange::Unchanged,
                    (None, Some(b)) => HoverChange::Entered(b),
                    (Some(a), None) => HoverChange::Left(a),
                    (Some(a), Some(b)) => HoverChange::Moved { from: a, to: b },
                }
            }
            _ => HoverChange::Unchanged,
        }
    }

    /// End the gesture. The machine returns to idle whatever happens.
    pub fn release(&mut self) -> Release {
        let state = std::mem::replace(&mut self.state, State::Idle);
        match state {
            State::Idle => Release::None,
            State::Pressed { marker, .. } => Release::Tap { marker },
            State::Dragging {
                marker, hovered, ..
            } => Release::Drop {
                marker,
                cell: hovered,
            },
        }
    }

    /// Abandon any gesture without reporting it.
    pub fn reset(&mut self) {
        self.state = State::Idle;
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}
