//! Legality filtering and terminal-state detection

use crate::board::{Board, Move, Square};
use crate::movegen::moves_for;
use crate::pieces::Side;
use serde::{Deserialize, Serialize};

/// Classification of a side's position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Ongoing,
    /// No legal move while in check: the side to move loses
    Checkmate,
    /// No legal move without being in check: scored as a draw
    Stalemate,
}

/// Whether `side`'s king is attacked by any enemy piece.
/// A missing king counts as attacked.
pub fn attacked(board: &Board, side: Side) -> bool {
    let king = match board.king_pos(side) {
        Some(k) => k,
        None => return true,
    };

    let enemy = side.opponent();
    board
        .pieces()
        .filter(|(_, p)| p.side == enemy)
        .any(|(sq, _)| moves_for(board, sq).contains(&king))
}

/// Flying general: both kings on one file with nothing between them
pub fn kings_face(board: &Board) -> bool {
    let (red, black) = match (board.king_pos(Side::Red), board.king_pos(Side::Black)) {
        (Some(r), Some(b)) => (r, b),
        _ => return false,
    };
    if red.col() != black.col() {
        return false;
    }

    let low = red.row().min(black.row());
    let high = red.row().max(black.row());
    (low + 1..high)
        .filter_map(|row| Square::new(row as i32, red.col() as i32).ok())
        .all(|sq| board.is_empty(sq))
}

/// All legal moves for `side`, in row-major board order then generator order
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut result = Vec::new();

    for (from, piece) in board.pieces() {
        if piece.side != side {
            continue;
        }

        for to in moves_for(board, from) {
            let mv = Move::new(from, to);
            let next = board.apply(mv);
            if attacked(&next, side) || kings_face(&next) {
                continue;
            }
            result.push(mv);
        }
    }

    result
}

/// Ongoing, checkmate or stalemate for the side to move
pub fn terminal_state(board: &Board, side: Side) -> GameStatus {
    if !legal_moves(board, side).is_empty() {
        GameStatus::Ongoing
    } else if attacked(board, side) {
        GameStatus::Checkmate
    } else {
        GameStatus::Stalemate
    }
}

// ============================================================================
// TESTS
// ============================================================================
