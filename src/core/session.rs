//! Game session module - turn order, move application, outcome
//!
//! One `GameSession` is one game from the first move to a win or draw.
//! The session owns the board; every mutation goes through `apply_move`,
//! which rejects anything illegal without touching state.

use std::fmt;

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::types::{Outcome, Player, CELL_COUNT};

/// Why a move was rejected. The session is unchanged whenever this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// Cell index above 8.
    OutOfBounds,
    /// Cell already claimed by either player.
    CellOccupied,
    /// Not this player's turn.
    OutOfTurn,
    /// The game has already ended.
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "cell index out of bounds"),
            MoveError::CellOccupied => write!(f, "cell is already occupied"),
            MoveError::OutOfTurn => write!(f, "not this player's turn"),
            MoveError::GameOver => write!(f, "the game has already ended"),
        }
    }
}

impl std::error::Error for MoveError {}

/// What an accepted move produced: the outcome after it and whose turn is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub outcome: Outcome,
    pub current_player: Player,
}

/// Complete rules state for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSession {
    board: Board,
    current_player: Player,
    outcome: Outcome,
}

impl GameSession {
    /// Fresh game: empty board, first player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            current_player: Player::First,
            outcome: Outcome::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// A cell the current player could legally drop on right now.
    pub fn can_drop(&self, cell: usize) -> bool {
        !self.outcome.is_terminal() && self.board.is_free(cell)
    }

    /// Unoccupied cells in ascending order; empty once the game has ended.
    pub fn legal_cells(&self) -> ArrayVec<usize, CELL_COUNT> {
        if self.outcome.is_terminal() {
            return ArrayVec::new();
        }
        self.board.free_cells()
    }

    /// Apply one move for `player` at `cell`.
    ///
    /// On success the cell is claimed, the outcome re-evaluated against the
    /// mover's cells, and the turn switched only while the game continues.
    /// On any rejection the session is left exactly as it was.
    pub fn apply_move(&mut self, cell: usize, player: Player) -> Result<MoveResult, MoveError> {
        if cell >= CELL_COUNT {
            return Err(MoveError::OutOfBounds);
        }
        if self.outcome.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if player != self.current_player {
            return Err(MoveError::OutOfTurn);
        }
        if !self.board.claim(cell, player) {
            return Err(MoveError::CellOccupied);
        }

        if self.board.has_winning_line(player) {
            self.outcome = match player {
                Player::First => Outcome::FirstWins,
                Player::Second => Outcome::SecondWins,
            };
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
        } else {
            self.current_player = player.other();
        }

        Ok(MoveResult {
            outcome: self.outcome,
            current_player: self.current_player,
        })
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(session: &mut GameSession, moves: &[(usize, Player)]) {
        for &(cell, player) in moves {
            session
                .apply_move(cell, player)
                .unwrap_or_else(|e| panic!("move {cell} by {player:?} rejected: {e}"));
        }
    }

    #[test]
    fn test_new_session_starts_empty_with_first_to_move() {
        let session = GameSession::new();
        assert_eq!(session.current_player(), Player::First);
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert!(!session.is_over());
        assert!(session.board().occupied().is_empty());
    }

    #[test]
    fn test_accepted_move_switches_turn() {
        let mut session = GameSession::new();
        let result = session.apply_move(4, Player::First).unwrap();
        assert_eq!(result.outcome, Outcome::InProgress);
        assert_eq!(result.current_player, Player::Second);
        assert_eq!(session.current_player(), Player::Second);
    }

    #[test]
    fn test_out_of_bounds_rejected_unchanged() {
        let mut session = GameSession::new();
        let before = session;
        assert_eq!(session.apply_move(9, Player::First), Err(MoveError::OutOfBounds));
        assert_eq!(session, before);
    }

    #[test]
    fn test_occupied_cell_rejected_unchanged() {
        let mut session = GameSession::new();
        session.apply_move(4, Player::First).unwrap();
        let before = session;

        assert_eq!(session.apply_move(4, Player::Second), Err(MoveError::CellOccupied));
        assert_eq!(session, before);
    }

    #[test]
    fn test_out_of_turn_rejected_unchanged() {
        let mut session = GameSession::new();
        let before = session;
        assert_eq!(session.apply_move(4, Player::Second), Err(MoveError::OutOfTurn));
        assert_eq!(session, before);
    }

    #[test]
    fn test_win_freezes_turn_and_blocks_further_moves() {
        let mut session = GameSession::new();
        apply_all(
            &mut session,
            &[
                (0, Player::First),
                (3, Player::Second),
                (1, Player::First),
                (4, Player::Second),
            ],
        );

        let result = session.apply_move(2, Player::First).unwrap();
        assert_eq!(result.outcome, Outcome::FirstWins);
        // The turn does not advance once the game ends.
        assert_eq!(result.current_player, Player::First);
        assert_eq!(session.current_player(), Player::First);

        let before = session;
        assert_eq!(session.apply_move(5, Player::Second), Err(MoveError::GameOver));
        assert_eq!(session, before);
    }

    #[test]
    fn test_draw_on_full_board_without_line() {
        let mut session = GameSession::new();
        apply_all(
            &mut session,
            &[
                (0, Player::First),
                (2, Player::Second),
                (1, Player::First),
                (3, Player::Second),
                (5, Player::First),
                (4, Player::Second),
                (6, Player::First),
                (7, Player::Second),
            ],
        );
        assert_eq!(session.outcome(), Outcome::InProgress);

        let result = session.apply_move(8, Player::First).unwrap();
        assert_eq!(result.outcome, Outcome::Draw);
        assert!(session.board().is_full());
        assert_eq!(session.outcome().winner(), None);
    }

    #[test]
    fn test_can_drop_tracks_occupancy_and_outcome() {
        let mut session = GameSession::new();
        assert!(session.can_drop(0));
        assert!(!session.can_drop(9));

        session.apply_move(0, Player::First).unwrap();
        assert!(!session.can_drop(0));
        assert!(session.can_drop(1));

        apply_all(
            &mut session,
            &[
                (3, Player::Second),
                (1, Player::First),
                (4, Player::Second),
                (2, Player::First),
            ],
        );
        assert!(session.is_over());
        assert!(!session.can_drop(5));
    }

    #[test]
    fn test_legal_cells_shrink_and_empty_after_end() {
        let mut session = GameSession::new();
        assert_eq!(session.legal_cells().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);

        session.apply_move(4, Player::First).unwrap();
        assert_eq!(session.legal_cells().as_slice(), &[0, 1, 2, 3, 5, 6, 7, 8]);

        apply_all(
            &mut session,
            &[
                (0, Player::Second),
                (3, Player::First),
                (1, Player::Second),
                (5, Player::First),
            ],
        );
        // 3-4-5 completed, game over.
        assert!(session.is_over());
        assert!(session.legal_cells().is_empty());
    }
}
