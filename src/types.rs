//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const GRID_SIZE: usize = 3;
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Pointer displacement (per axis) separating a click from a drag
pub const DRAG_THRESHOLD: i32 = 2;

/// End-of-game status messages
pub const FIRST_WINS_TEXT: &str = "The first player is winner!";
pub const SECOND_WINS_TEXT: &str = "The second player is winner!";
pub const DRAW_TEXT: &str = "Draw!";

/// The two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The opponent
    pub fn other(&self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Stable index (0 or 1), useful for per-player tables
    pub fn index(&self) -> usize {
        match self {
            Player::First => 0,
            Player::Second => 1,
        }
    }

    /// Marker glyph shown on the board
    pub fn mark(&self) -> char {
        match self {
            Player::First => 'X',
            Player::Second => 'O',
        }
    }
}

/// Where a game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    FirstWins,
    SecondWins,
    Draw,
}

impl Outcome {
    /// True once the game has ended (win or draw)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning player, if there is one
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::FirstWins => Some(Player::First),
            Outcome::SecondWins => Some(Player::Second),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}

/// Pointer buttons as reported by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A pointer position in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Displacement from `origin` to this point
    pub fn offset_from(&self, origin: Point) -> Offset {
        Offset {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }

    /// Translate back by `offset` (pointer position to avatar top-left)
    pub fn minus(&self, offset: Offset) -> Point {
        Point {
            x: self.x - offset.dx,
            y: self.y - offset.dy,
        }
    }
}

/// Displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}
