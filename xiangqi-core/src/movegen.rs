//! Pseudo-legal move generation
//!
//! Every generator returns destination squares for the piece standing on
//! `from`, ignoring whether the move would expose the mover's own king.
//! Destinations are never off the board.

use crate::board::{Board, Square};
use crate::pieces::{PieceKind, Side};

// ============================================================================
// DIRECTION TABLES
// ============================================================================

/// Up, down, left, right
const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse destinations (dr, dc) paired with the leg square (dr, dc)
const HORSE_STEPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
    ((-1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, -2), (0, -1)),
    ((1, 2), (0, 1)),
];

// ============================================================================
// DISPATCH
// ============================================================================

/// Destinations for whatever stands on `from`; empty if the square is empty
pub fn moves_for(board: &Board, from: Square) -> Vec<Square> {
    let piece = match board.get(from) {
        Some(p) => p,
        None => return vec![],
    };

    let mut out = Vec::new();
    match piece.kind {
        PieceKind::King => king_moves(board, from, piece.side, &mut out),
        PieceKind::Advisor => advisor_moves(board, from, piece.side, &mut out),
        PieceKind::Elephant => elephant_moves(board, from, piece.side, &mut out),
        PieceKind::Horse => horse_moves(board, from, piece.side, &mut out),
        PieceKind::Rook => rook_moves(board, from, piece.side, &mut out),
        PieceKind::Cannon => cannon_moves(board, from, piece.side, &mut out),
        PieceKind::Pawn => pawn_moves(board, from, piece.side, &mut out),
    }
    out
}

/// Empty, or holding an enemy piece
fn can_land(board: &Board, sq: Square, side: Side) -> bool {
    match board.get(sq) {
        Some(occupant) => occupant.side != side,
        None => true,
    }
}

// ============================================================================
// PER-KIND GENERATORS
// ============================================================================

pub fn king_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    palace_steps(board, from, side, &ORTHOGONAL, out);
}

pub fn advisor_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    palace_steps(board, from, side, &DIAGONAL, out);
}

fn palace_steps(board: &Board, from: Square, side: Side, dirs: &[(i8, i8)], out: &mut Vec<Square>) {
    for &(dr, dc) in dirs {
        if let Some(dest) = from.offset(dr, dc) {
            if dest.in_palace(side) && can_land(board, dest, side) {
                out.push(dest);
            }
        }
    }
}

pub fn elephant_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for &(dr, dc) in &DIAGONAL {
        let dest = match from.offset(dr * 2, dc * 2) {
            Some(d) => d,
            None => continue,
        };
        if !dest.on_home_side(side) {
            continue;
        }

        // Elephant eye
        let blocked = from.offset(dr, dc).map_or(true, |eye| !board.is_empty(eye));
        if blocked {
            continue;
        }

        if can_land(board, dest, side) {
            out.push(dest);
        }
    }
}

pub fn horse_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for &((dr, dc), (leg_dr, leg_dc)) in &HORSE_STEPS {
        match from.offset(leg_dr, leg_dc) {
            Some(leg) if board.is_empty(leg) => {}
            _ => continue,
        }

        if let Some(dest) = from.offset(dr, dc) {
            if can_land(board, dest, side) {
                out.push(dest);
            }
        }
    }
}

pub fn rook_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut current = from;

        while let Some(next) = current.offset(dr, dc) {
            current = next;
            match board.get(current) {
                None => out.push(current),
                Some(occupant) => {
                    if occupant.side != side {
                        out.push(current);
                    }
                    break; // Blocked
                }
            }
        }
    }
}

pub fn cannon_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    for &(dr, dc) in &ORTHOGONAL {
        let mut current = from;
        let mut screened = false;

        while let Some(next) = current.offset(dr, dc) {
            current = next;
            let occupant = board.get(current);

            if !screened {
                match occupant {
                    None => out.push(current),
                    Some(_) => screened = true,
                }
            } else if let Some(target) = occupant {
                if target.side != side {
                    out.push(current);
                }
                break;
            }
        }
    }
}

pub fn pawn_moves(board: &Board, from: Square, side: Side, out: &mut Vec<Square>) {
    let forward = match side {
        Side::Red => -1,
        Side::Black => 1,
    };

    if let Some(dest) = from.offset(forward, 0) {
        if can_land(board, dest, side) {
            out.push(dest);
        }
    }

    if from.across_river(side) {
        for dc in [-1, 1] {
            if let Some(dest) = from.offset(0, dc) {
                if can_land(board, dest, side) {
                    out.push(dest);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn red(kind: PieceKind) -> Piece {
        Piece::new(kind, Side::Red)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Side::Black)
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort();
        v
    }

    #[test]
    fn test_empty_square() {
        let board = Board::empty();
        assert!(moves_for(&board, sq(4, 4)).is_empty());
    }

    #[test]
    fn test_king_confined_to_palace() {
        let board = Board::empty().with_piece(sq(9, 3), red(PieceKind::King));
        let moves = sorted(moves_for(&board, sq(9, 3)));
        assert_eq!(moves, vec![sq(8, 3), sq(9, 4)]);
    }

    #[test]
    fn test_advisor_diagonals() {
        let board = Board::empty()
            .with_piece(sq(8, 4), red(PieceKind::Advisor))
            .with_piece(sq(7, 3), red(PieceKind::Pawn))
            .with_piece(sq(9, 5), black(PieceKind::Rook));
        let moves = sorted(moves_for(&board, sq(8, 4)));
        // (7,3) own piece, (9,5) capture
        assert_eq!(moves, vec![sq(7, 5), sq(9, 3), sq(9, 5)]);
    }

    #[test]
    fn test_blocked_elephant() {
        let board = Board::empty()
            .with_piece(sq(9, 2), red(PieceKind::Elephant))
            .with_piece(sq(8, 3), black(PieceKind::Pawn));
        let moves = moves_for(&board, sq(9, 2));
        assert_eq!(moves, vec![sq(7, 0)]);
    }

    #[test]
    fn test_elephant_stays_home() {
        let board = Board::empty().with_piece(sq(5, 2), red(PieceKind::Elephant));
        let moves = sorted(moves_for(&board, sq(5, 2)));
        assert_eq!(moves, vec![sq(7, 0), sq(7, 4)]);

        let board = Board::empty().with_piece(sq(4, 6), black(PieceKind::Elephant));
        let moves = sorted(moves_for(&board, sq(4, 6)));
        assert_eq!(moves, vec![sq(2, 4), sq(2, 8)]);
    }

    #[test]
    fn test_horse_leg() {
        let open = Board::empty().with_piece(sq(4, 4), red(PieceKind::Horse));
        assert_eq!(moves_for(&open, sq(4, 4)).len(), 8);

        // Leg above blocks both upward jumps
        let blocked = open.with_piece(sq(3, 4), black(PieceKind::Pawn));
        let moves = moves_for(&blocked, sq(4, 4));
        assert_eq!(moves.len(), 6);
        assert!(!moves.contains(&sq(2, 3)));
        assert!(!moves.contains(&sq(2, 5)));
    }

    #[test]
    fn test_horse_corner() {
        let board = Board::empty().with_piece(sq(9, 0), red(PieceKind::Horse));
        let moves = sorted(moves_for(&board, sq(9, 0)));
        assert_eq!(moves, vec![sq(7, 1), sq(8, 2)]);
    }

    #[test]
    fn test_rook_slides_and_captures() {
        let board = Board::empty()
            .with_piece(sq(5, 0), red(PieceKind::Rook))
            .with_piece(sq(2, 0), black(PieceKind::Horse))
            .with_piece(sq(5, 3), red(PieceKind::Pawn));
        let moves = moves_for(&board, sq(5, 0));

        assert!(moves.contains(&sq(2, 0)));
        assert!(!moves.contains(&sq(1, 0)));
        assert!(moves.contains(&sq(5, 2)));
        assert!(!moves.contains(&sq(5, 3)));
        // 3 up, 4 down, 2 right
        assert_eq!(moves.len(), 9);
    }

    #[test]
    fn test_cannon_capture() {
        let board = Board::empty()
            .with_piece(sq(7, 1), red(PieceKind::Cannon))
            .with_piece(sq(5, 1), red(PieceKind::Pawn))
            .with_piece(sq(3, 1), black(PieceKind::Horse));
        let moves = moves_for(&board, sq(7, 1));

        assert!(moves.contains(&sq(3, 1)));
        assert!(!moves.contains(&sq(4, 1)));
        assert!(!moves.contains(&sq(5, 1)));
        // (6,1) is a quiet move, not a capture
        assert!(moves.contains(&sq(6, 1)));
        assert!(board.is_empty(sq(6, 1)));
    }

    #[test]
    fn test_cannon_no_second_piece() {
        let board = Board::empty()
            .with_piece(sq(7, 1), red(PieceKind::Cannon))
            .with_piece(sq(5, 1), black(PieceKind::Pawn));
        let moves = moves_for(&board, sq(7, 1));
        assert!(!moves.iter().any(|s| s.col() == 1 && s.row() < 5));
    }

    #[test]
    fn test_cannon_own_target() {
        let board = Board::empty()
            .with_piece(sq(7, 1), red(PieceKind::Cannon))
            .with_piece(sq(5, 1), black(PieceKind::Pawn))
            .with_piece(sq(3, 1), red(PieceKind::Rook))
            .with_piece(sq(1, 1), black(PieceKind::Rook));
        let moves = moves_for(&board, sq(7, 1));
        assert!(!moves.contains(&sq(3, 1)));
        assert!(!moves.contains(&sq(1, 1)));
    }

    #[test]
    fn test_pawn_before_and_after_river() {
        let home = Board::empty().with_piece(sq(6, 4), red(PieceKind::Pawn));
        assert_eq!(moves_for(&home, sq(6, 4)), vec![sq(5, 4)]);

        let crossed = Board::empty().with_piece(sq(4, 4), red(PieceKind::Pawn));
        assert_eq!(
            sorted(moves_for(&crossed, sq(4, 4))),
            vec![sq(3, 4), sq(4, 3), sq(4, 5)]
        );

        let black_crossed = Board::empty().with_piece(sq(5, 0), black(PieceKind::Pawn));
        assert_eq!(
            sorted(moves_for(&black_crossed, sq(5, 0))),
            vec![sq(5, 1), sq(6, 0)]
        );
    }

    #[test]
    fn test_pawn_last_row() {
        let board = Board::empty().with_piece(sq(0, 2), red(PieceKind::Pawn));
        assert_eq!(
            sorted(moves_for(&board, sq(0, 2))),
            vec![sq(0, 1), sq(0, 3)]
        );
    }
}
