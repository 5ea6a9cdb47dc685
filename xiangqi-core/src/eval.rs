//! Position evaluation

use crate::board::Board;
use crate::pieces::Side;
use crate::rules::attacked;

/// Evaluation score (all terms are integral)
pub type Score = i32;

/// Penalty when the evaluated side's king is in check
pub const SELF_CHECK_PENALTY: Score = 500;
/// Bonus when the opponent's king is in check
pub const CHECK_BONUS: Score = 300;

/// Material balance from `side`'s perspective plus check terms
pub fn evaluate(board: &Board, side: Side) -> Score {
    let mut score: Score = 0;

    for (_, piece) in board.pieces() {
        let value = piece.kind.value();
        if piece.side == side {
            score += value;
        } else {
            score -= value;
        }
    }

    if attacked(board, side) {
        score -= SELF_CHECK_PENALTY;
    }
    if attacked(board, side.opponent()) {
        score += CHECK_BONUS;
    }

    score
}
