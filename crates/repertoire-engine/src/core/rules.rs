//! Piece movement geometry.
//!
//! [`MoveRules`] answers whether moving a piece from one square to another is
//! geometrically legal on a given board. Only raw movement is checked: there
//! is no notion of check, castling, en passant or promotion, and turn order is
//! left to the caller.

use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    piece::{Piece, PieceKind, Side},
    square::Square,
};

/// How a pawn's two-square advance treats the square it passes over.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "kebab-case")]
pub enum PawnDoubleStep {
    /// Both the passed-over square and the destination must be empty.
    #[default]
    #[display("strict")]
    Strict,
    /// Only the destination must be empty; a piece directly in front of the
    /// pawn does not block the double step.
    #[display("destination-only")]
    DestinationOnly,
}

/// Validates piece relocations against movement geometry.
///
/// # Example
///
/// ```
/// use repertoire_engine::{Board, MoveRules};
///
/// let rules = MoveRules::default();
/// let board = Board::INITIAL;
/// let e2 = "e2".parse().unwrap();
/// let pawn = board.get(e2).unwrap();
///
/// assert!(rules.is_legal_move(&board, e2, "e4".parse().unwrap(), pawn));
/// assert!(!rules.is_legal_move(&board, e2, "e5".parse().unwrap(), pawn));
/// assert!(!rules.is_legal_target(&board, e2, (-1, 4), pawn));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveRules {
    pawn_double_step: PawnDoubleStep,
}

impl MoveRules {
    #[must_use]
    pub const fn new(pawn_double_step: PawnDoubleStep) -> Self {
        Self { pawn_double_step }
    }

    /// Like [`Self::is_legal_move`], but takes raw `(row, col)` destination
    /// coordinates. Destinations outside the 8×8 board are rejected.
    #[must_use]
    pub fn is_legal_target(
        &self,
        board: &Board,
        from: Square,
        to: (i32, i32),
        piece: Piece,
    ) -> bool {
        Square::from_signed(to.0, to.1)
            .is_some_and(|to| self.is_legal_move(board, from, to, piece))
    }

    /// Returns whether `piece`, standing on `from`, may move to `to`.
    #[must_use]
    pub fn is_legal_move(&self, board: &Board, from: Square, to: Square, piece: Piece) -> bool {
        if from == to || board.is_occupied_by(to, piece.side()) {
            return false;
        }

        let d_row = i32::from(to.row()) - i32::from(from.row());
        let d_col = i32::from(to.col()) - i32::from(from.col());
        let (abs_row, abs_col) = (d_row.abs(), d_col.abs());

        match piece.kind() {
            PieceKind::Pawn => self.is_legal_pawn_move(board, from, to, piece.side()),
            PieceKind::Knight => (abs_row, abs_col) == (2, 1) || (abs_row, abs_col) == (1, 2),
            PieceKind::Bishop => abs_row == abs_col && is_path_clear(board, from, to),
            PieceKind::Rook => (d_row == 0) != (d_col == 0) && is_path_clear(board, from, to),
            PieceKind::Queen => {
                let straight = (d_row == 0) != (d_col == 0);
                let diagonal = abs_row == abs_col;
                (straight || diagonal) && is_path_clear(board, from, to)
            }
            PieceKind::King => abs_row <= 1 && abs_col <= 1,
        }
    }

    fn is_legal_pawn_move(&self, board: &Board, from: Square, to: Square, side: Side) -> bool {
        let direction = i32::from(side.pawn_direction());
        let d_row = i32::from(to.row()) - i32::from(from.row());
        let d_col = i32::from(to.col()) - i32::from(from.col());

        if d_col == 0 {
            if board.is_occupied(to) {
                return false;
            }
            if d_row == direction {
                return true;
            }
            if d_row == 2 * direction && from.row() == side.pawn_start_row() {
                return match self.pawn_double_step {
                    PawnDoubleStep::DestinationOnly => true,
                    PawnDoubleStep::Strict => from
                        .offset(side.pawn_direction(), 0)
                        .is_some_and(|passed| !board.is_occupied(passed)),
                };
            }
            return false;
        }

        // Diagonal steps are captures only; own pieces are excluded by the caller.
        d_col.abs() == 1 && d_row == direction && board.is_occupied(to)
    }
}

/// Returns true if no piece stands strictly between `from` and `to`.
///
/// Walks the unit step from `from` toward `to`. The squares must lie on a
/// common rank, file or diagonal.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = (i32::from(to.row()) - i32::from(from.row())).signum();
    let step_col = (i32::from(to.col()) - i32::from(from.col())).signum();

    let mut row = i32::from(from.row()) + step_row;
    let mut col = i32::from(from.col()) + step_col;
    while (row, col) != (i32::from(to.row()), i32::from(to.col())) {
        let Some(square) = Square::from_signed(row, col) else {
            return false;
        };
        if board.is_occupied(square) {
            return false;
        }
        row += step_row;
        col += step_col;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn placement(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn piece_at(board: &Board, s: &str) -> Piece {
        board.get(sq(s)).unwrap()
    }

    fn legal(board: &Board, from: &str, to: &str) -> bool {
        MoveRules::default().is_legal_move(board, sq(from), sq(to), piece_at(board, from))
    }

    #[test]
    fn test_off_board_targets_rejected_for_every_piece() {
        let board = placement("8/8/8/3Q4/8/8/8/8");
        let rules = MoveRules::default();
        let from = sq("d5");
        for kind in PieceKind::ALL {
            for side in [Side::White, Side::Black] {
                let piece = Piece::new(kind, side);
                for to in [(-1, 3), (8, 3), (3, -1), (3, 8), (-2, -2), (10, 10)] {
                    assert!(!rules.is_legal_target(&board, from, to, piece));
                }
            }
        }
    }

    #[test]
    fn test_no_self_capture() {
        let board = Board::INITIAL;
        assert!(!legal(&board, "d1", "d2"));
        assert!(!legal(&board, "g1", "e2"));
        assert!(!legal(&board, "e1", "f1"));
    }

    #[test]
    fn test_null_move_is_illegal() {
        let board = placement("8/8/8/3Q4/8/8/8/8");
        assert!(!legal(&board, "d5", "d5"));
    }

    #[test]
    fn test_knight_ignores_blockers() {
        let board = Board::INITIAL;
        assert!(legal(&board, "g1", "f3"));
        assert!(legal(&board, "g1", "h3"));
        assert!(legal(&board, "b8", "c6"));
        assert!(!legal(&board, "g1", "g3"));

        let surrounded = board_with_ring("N");
        for to in ["b6", "b4", "f6", "f4", "c7", "e7", "c3", "e3"] {
            assert!(legal(&surrounded, "d5", to), "Nd5-{to}");
        }
    }

    /// Places `center` on d5 surrounded by black pawns on every adjacent square.
    fn board_with_ring(center: &str) -> Board {
        placement(&format!("8/8/2ppp3/2p{center}p3/2ppp3/8/8/8"))
    }

    #[test]
    fn test_sliders_blocked_by_adjacent_pieces() {
        for center in ["B", "R", "Q"] {
            let ringed = board_with_ring(center);
            for to in ["b7", "d7", "f7", "b5", "f5", "b3", "d3", "f3"] {
                assert!(!legal(&ringed, "d5", to), "{center}d5-{to} should be blocked");
            }
        }
    }

    #[test]
    fn test_sliders_on_open_board() {
        let open = placement("8/8/8/3B4/8/8/8/8");
        assert!(legal(&open, "d5", "a8"));
        assert!(legal(&open, "d5", "h1"));
        assert!(!legal(&open, "d5", "d6"));

        let open = placement("8/8/8/3R4/8/8/8/8");
        assert!(legal(&open, "d5", "d1"));
        assert!(legal(&open, "d5", "a5"));
        assert!(!legal(&open, "d5", "e6"));

        let open = placement("8/8/8/3Q4/8/8/8/8");
        assert!(legal(&open, "d5", "d8"));
        assert!(legal(&open, "d5", "g2"));
        assert!(!legal(&open, "d5", "e7"));
    }

    #[test]
    fn test_slider_may_capture_first_blocker_only() {
        let board = placement("3r4/3p4/8/3R4/8/8/8/8");
        assert!(legal(&board, "d5", "d7"));
        assert!(!legal(&board, "d5", "d8"));
    }

    #[test]
    fn test_initial_bishop_and_queen_are_boxed_in() {
        let board = Board::INITIAL;
        assert!(!legal(&board, "f1", "c4"));
        assert!(!legal(&board, "d1", "h5"));
        assert!(!legal(&board, "a1", "a3"));
    }

    #[test]
    fn test_king_single_step() {
        let board = placement("8/8/8/3K4/8/8/8/8");
        for to in ["c6", "d6", "e6", "c5", "e5", "c4", "d4", "e4"] {
            assert!(legal(&board, "d5", to));
        }
        assert!(!legal(&board, "d5", "d7"));
        assert!(!legal(&board, "d5", "f3"));
    }

    #[test]
    fn test_pawn_single_and_double_step() {
        let board = Board::INITIAL;
        assert!(legal(&board, "e2", "e3"));
        assert!(legal(&board, "e2", "e4"));
        assert!(!legal(&board, "e2", "e5"));
        assert!(legal(&board, "e7", "e5"));
        assert!(legal(&board, "c7", "c6"));
    }

    #[test]
    fn test_pawn_moves_forward_only() {
        let board = placement("8/8/8/8/4P3/8/8/8");
        assert!(legal(&board, "e4", "e5"));
        assert!(!legal(&board, "e4", "e3"));

        let board = placement("8/8/8/4p3/8/8/8/8");
        assert!(legal(&board, "e5", "e4"));
        assert!(!legal(&board, "e5", "e6"));
    }

    #[test]
    fn test_pawn_double_step_only_from_start_rank() {
        let board = placement("8/8/8/8/8/4P3/8/8");
        assert!(!legal(&board, "e3", "e5"));
    }

    #[test]
    fn test_pawn_blocked_by_piece_in_front() {
        let board = placement("8/8/8/8/4p3/8/4P3/8");
        assert!(legal(&board, "e2", "e3"));
        assert!(!legal(&board, "e2", "e4"));

        let board = placement("8/8/8/8/8/4n3/4P3/8");
        assert!(!legal(&board, "e2", "e3"));
    }

    #[test]
    fn test_pawn_double_step_over_occupied_square() {
        let blocked = placement("8/8/8/8/8/4n3/4P3/8");
        let from = sq("e2");
        let to = sq("e4");
        let pawn = piece_at(&blocked, "e2");

        let strict = MoveRules::new(PawnDoubleStep::Strict);
        assert!(!strict.is_legal_move(&blocked, from, to, pawn));

        let loose = MoveRules::new(PawnDoubleStep::DestinationOnly);
        assert!(loose.is_legal_move(&blocked, from, to, pawn));
    }

    #[test]
    fn test_pawn_diagonal_only_captures() {
        let board = placement("8/8/8/3p1N2/4P3/8/8/8");
        assert!(legal(&board, "e4", "d5"));
        assert!(!legal(&board, "e4", "f5"));

        let empty = placement("8/8/8/8/4P3/8/8/8");
        assert!(!legal(&empty, "e4", "d5"));
        assert!(!legal(&empty, "e4", "f3"));
    }

    #[test]
    fn test_pawn_cannot_capture_straight_ahead() {
        let board = placement("8/8/8/4p3/4P3/8/8/8");
        assert!(!legal(&board, "e4", "e5"));
        assert!(!legal(&board, "e5", "e4"));
    }
}
