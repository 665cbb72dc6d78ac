//! Board module - manages the 3x3 grid occupancy
//!
//! Each player's claimed cells live in one 9-bit set, cell N at bit N.
//! Cells are numbered row-major: top row 0..=2, middle 3..=5, bottom 6..=8.
//! Line detection is a mask comparison against the eight winning patterns,
//! no cell scanning.

use arrayvec::ArrayVec;

use crate::types::{Player, CELL_COUNT};

/// A set of board cells packed into the low 9 bits of a u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellSet(u16);

impl CellSet {
    /// No cells.
    pub const EMPTY: CellSet = CellSet(0);
    /// All 9 cells.
    pub const FULL: CellSet = CellSet(0b111_111_111);

    /// Build from raw bits; anything above bit 8 is dropped.
    pub const fn from_bits(bits: u16) -> Self {
        CellSet(bits & CellSet::FULL.0)
    }

    pub const fn bits(&self) -> u16 {
        self.0
    }

    #[inline(always)]
    fn bit(cell: usize) -> u16 {
        1 << cell
    }

    /// Add a cell to the set. Out-of-range indices are ignored.
    pub fn insert(&mut self, cell: usize) {
        if cell < CELL_COUNT {
            self.0 |= Self::bit(cell);
        }
    }

    /// Remove a cell from the set.
    pub fn remove(&mut self, cell: usize) {
        if cell < CELL_COUNT {
            self.0 &= !Self::bit(cell);
        }
    }

    pub fn contains(&self, cell: usize) -> bool {
        cell < CELL_COUNT && self.0 & Self::bit(cell) != 0
    }

    /// True when every cell of `other` is also in this set.
    pub fn contains_all(&self, other: CellSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(&self, other: CellSet) -> CellSet {
        CellSet(self.0 | other.0)
    }

    pub fn intersection(&self, other: CellSet) -> CellSet {
        CellSet(self.0 & other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        self.0 == Self::FULL.0
    }

    /// Number of cells in the set.
    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }
}

/// The eight winning lines: three rows, three columns, two diagonals.
pub const WIN_LINES: [CellSet; 8] = [
    CellSet(0b000_000_111),
    CellSet(0b000_111_000),
    CellSet(0b111_000_000),
    CellSet(0b001_001_001),
    CellSet(0b010_010_010),
    CellSet(0b100_100_100),
    CellSet(0b100_010_001),
    CellSet(0b001_010_100),
];

/// Occupancy state for one game: both players' cells plus their union.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    occupied: CellSet,
    first: CellSet,
    second: CellSet,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// All filled cells, either player's.
    pub fn occupied(&self) -> CellSet {
        self.occupied
    }

    /// The cells claimed by one player.
    pub fn player_cells(&self, player: Player) -> CellSet {
        match player {
            Player::First => self.first,
            Player::Second => self.second,
        }
    }

    /// A cell that exists and has not been claimed.
    pub fn is_free(&self, cell: usize) -> bool {
        cell < CELL_COUNT && !self.occupied.contains(cell)
    }

    pub fn is_occupied(&self, cell: usize) -> bool {
        self.occupied.contains(cell)
    }

    pub fn is_full(&self) -> bool {
        self.occupied.is_full()
    }

    /// Claim a cell for a player.
    /// Returns false (and changes nothing) if the cell is out of range or taken.
    pub fn claim(&mut self, cell: usize, player: Player) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.occupied.insert(cell);
        match player {
            Player::First => self.first.insert(cell),
            Player::Second => self.second.insert(cell),
        }
        true
    }

    /// True when the player's cells cover one of the eight winning lines.
    pub fn has_winning_line(&self, player: Player) -> bool {
        let cells = self.player_cells(player);
        WIN_LINES.iter().any(|line| cells.contains_all(*line))
    }

    /// Unclaimed cells in ascending order.
    pub fn free_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        let mut free = ArrayVec::new();
        for cell in 0..CELL_COUNT {
            if !self.occupied.contains(cell) {
                let _ = free.try_push(cell);
            }
        }
        free
    }

    /// Build a board from both players' sets (test scaffolding).
    #[cfg(test)]
    pub fn from_sets(first: CellSet, second: CellSet) -> Self {
        Self {
            occupied: first.union(second),
            first,
            second,
        }
    }
}
