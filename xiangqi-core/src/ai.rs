//! Minimax AI with alpha-beta pruning

use crate::board::{Board, Move};
use crate::error::CoreError;
use crate::eval::{evaluate, Score};
use crate::pieces::Side;
use crate::rules::{attacked, legal_moves, terminal_state, GameStatus};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Value of a node where the side to move is mated
pub const MATE_VALUE: Score = 10000;

/// Initial search window bound
pub const INFINITY: Score = 1_000_000_000;

// ============================================================================
// TIER
// ============================================================================

/// AI strength level
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// One-ply greedy, random among the best
    #[default]
    Normal,
    /// Depth-2 alpha-beta
    Hard,
    /// Depth-3 alpha-beta
    Hell,
}

impl Tier {
    pub fn depth(self) -> u32 {
        match self {
            Tier::Normal => 1,
            Tier::Hard => 2,
            Tier::Hell => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Normal => "normal",
            Tier::Hard => "hard",
            Tier::Hell => "hell",
        }
    }
}

impl FromStr for Tier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Tier::Normal),
            "hard" => Ok(Tier::Hard),
            "hell" => Ok(Tier::Hell),
            other => Err(CoreError::UnknownTier(other.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// MINIMAX PLAYER
// ============================================================================

/// Minimax AI player
pub struct MinimaxAI {
    rng: ChaCha8Rng,
}

/// Outcome of an AI-vs-AI game
#[derive(Clone, Debug)]
pub struct PlayedGame {
    pub board: Board,
    pub moves: Vec<Move>,
    /// Side to move on the final board
    pub to_move: Side,
    pub status: GameStatus,
}

impl MinimaxAI {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a move for `side` at the given tier
    pub fn best_move(&mut self, board: &Board, side: Side, tier: Tier) -> Option<Move> {
        choose_move(board, side, tier, &mut self.rng)
    }

    /// Play red against black from `initial`, red moving first.
    /// Stops at a terminal position or after `max_moves` plies.
    pub fn play_game(&mut self, initial: Board, red: Tier, black: Tier, max_moves: usize) -> PlayedGame {
        let mut board = initial;
        let mut side = Side::Red;
        let mut moves = Vec::new();

        while moves.len() < max_moves {
            let tier = match side {
                Side::Red => red,
                Side::Black => black,
            };
            match self.best_move(&board, side, tier) {
                Some(mv) => {
                    moves.push(mv);
                    board = board.apply(mv);
                    side = side.opponent();
                }
                None => break,
            }
        }

        PlayedGame {
            board,
            moves,
            to_move: side,
            status: terminal_state(&board, side),
        }
    }
}

impl Default for MinimaxAI {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MOVE SELECTION
// ============================================================================

/// Select the AI's move; `None` when `ai_side` has no legal move
pub fn choose_move<R: Rng + ?Sized>(board: &Board, ai_side: Side, tier: Tier, rng: &mut R) -> Option<Move> {
    let moves = legal_moves(board, ai_side);
    if moves.is_empty() {
        return None;
    }

    if tier == Tier::Normal {
        return choose_greedy(board, ai_side, &moves, rng);
    }

    let (_, best) = minimax(board, tier.depth(), ai_side, -INFINITY, INFINITY, true);
    best.or_else(|| moves.choose(rng).copied())
}

/// One-ply lookahead, uniform among the top-scoring moves
fn choose_greedy<R: Rng + ?Sized>(board: &Board, ai_side: Side, moves: &[Move], rng: &mut R) -> Option<Move> {
    let scored: Vec<(Score, Move)> = moves
        .iter()
        .map(|&mv| (evaluate(&board.apply(mv), ai_side), mv))
        .collect();

    let top_score = scored.iter().map(|&(score, _)| score).max()?;
    let top: Vec<Move> = scored
        .into_iter()
        .filter(|&(score, _)| score == top_score)
        .map(|(_, mv)| mv)
        .collect();

    top.choose(rng).copied()
}

// ============================================================================
// MINIMAX WITH ALPHA-BETA
// ============================================================================

/// Fixed-depth minimax. Evaluation is always from `ai_side`'s point of view;
/// `maximizing` says whether `ai_side` or its opponent moves at this node.
pub fn minimax(
    board: &Board,
    depth: u32,
    ai_side: Side,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
) -> (Score, Option<Move>) {
    if depth == 0 {
        return (evaluate(board, ai_side), None);
    }

    let to_move = if maximizing { ai_side } else { ai_side.opponent() };
    let moves = legal_moves(board, to_move);

    if moves.is_empty() {
        if attacked(board, to_move) {
            let value = if maximizing { -MATE_VALUE } else { MATE_VALUE };
            return (value, None);
        }
        // Stalemate inside the tree falls back to the static score
        return (evaluate(board, ai_side), None);
    }

    let mut best_move = moves[0];

    if maximizing {
        let mut best = -INFINITY;
        for mv in moves {
            let (value, _) = minimax(&board.apply(mv), depth - 1, ai_side, alpha, beta, false);
            if value > best {
                best = value;
                best_move = mv;
            }
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        (best, Some(best_move))
    } else {
        let mut best = INFINITY;
        for mv in moves {
            let (value, _) = minimax(&board.apply(mv), depth - 1, ai_side, alpha, beta, true);
            if value < best {
                best = value;
                best_move = mv;
            }
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        (best, Some(best_move))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Square;
    use crate::pieces::{Piece, PieceKind};

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn red(kind: PieceKind) -> Piece {
        Piece::new(kind, Side::Red)
    }

    fn black(kind: PieceKind) -> Piece {
        Piece::new(kind, Side::Black)
    }

    /// Same recursion without any cutoff
    fn exhaustive(board: &Board, depth: u32, ai_side: Side, maximizing: bool) -> (Score, Option<Move>) {
        if depth == 0 {
            return (evaluate(board, ai_side), None);
        }
        let to_move = if maximizing { ai_side } else { ai_side.opponent() };
        let moves = legal_moves(board, to_move);
        if moves.is_empty() {
            if attacked(board, to_move) {
                return (if maximizing { -MATE_VALUE } else { MATE_VALUE }, None);
            }
            return (evaluate(board, ai_side), None);
        }

        let mut best = if maximizing { -INFINITY } else { INFINITY };
        let mut best_move = moves[0];
        for mv in moves {
            let (value, _) = exhaustive(&board.apply(mv), depth - 1, ai_side, !maximizing);
            let better = if maximizing { value > best } else { value < best };
            if better {
                best = value;
                best_move = mv;
            }
        }
        (best, Some(best_move))
    }

    /// Red pawn can take a black horse; nothing else changes the score
    fn capture_board() -> Board {
        Board::empty()
            .with_piece(sq(9, 3), red(PieceKind::King))
            .with_piece(sq(3, 4), red(PieceKind::Pawn))
            .with_piece(sq(0, 5), black(PieceKind::King))
            .with_piece(sq(3, 5), black(PieceKind::Horse))
    }

    /// Red mates with rook (5,8) -> (0,8)
    fn mate_in_one_board() -> Board {
        Board::empty()
            .with_piece(sq(9, 3), red(PieceKind::King))
            .with_piece(sq(1, 0), red(PieceKind::Rook))
            .with_piece(sq(5, 8), red(PieceKind::Rook))
            .with_piece(sq(0, 4), black(PieceKind::King))
    }

    fn skirmish_board() -> Board {
        Board::empty()
            .with_piece(sq(9, 4), red(PieceKind::King))
            .with_piece(sq(8, 4), red(PieceKind::Advisor))
            .with_piece(sq(7, 0), red(PieceKind::Rook))
            .with_piece(sq(7, 7), red(PieceKind::Cannon))
            .with_piece(sq(0, 3), black(PieceKind::King))
            .with_piece(sq(0, 8), black(PieceKind::Rook))
            .with_piece(sq(2, 2), black(PieceKind::Horse))
            .with_piece(sq(3, 4), black(PieceKind::Pawn))
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!("hell".parse::<Tier>(), Ok(Tier::Hell));
        assert_eq!(Tier::Hard.depth(), 2);
        assert!("easy".parse::<Tier>().is_err());
        assert_eq!(serde_json::to_value(Tier::Normal).unwrap(), "normal");
    }

    #[test]
    fn test_no_moves_returns_none() {
        let board = Board::empty()
            .with_piece(sq(0, 4), black(PieceKind::King))
            .with_piece(sq(0, 0), red(PieceKind::Rook))
            .with_piece(sq(1, 0), red(PieceKind::Rook))
            .with_piece(sq(9, 3), red(PieceKind::King));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for tier in [Tier::Normal, Tier::Hard, Tier::Hell] {
            assert_eq!(choose_move(&board, Side::Black, tier, &mut rng), None);
        }
    }

    #[test]
    fn test_stuck_node_values() {
        let mated = Board::empty()
            .with_piece(sq(0, 4), black(PieceKind::King))
            .with_piece(sq(0, 0), red(PieceKind::Rook))
            .with_piece(sq(1, 0), red(PieceKind::Rook))
            .with_piece(sq(9, 3), red(PieceKind::King));
        assert_eq!(minimax(&mated, 1, Side::Red, -INFINITY, INFINITY, false), (MATE_VALUE, None));
        assert_eq!(minimax(&mated, 1, Side::Black, -INFINITY, INFINITY, true), (-MATE_VALUE, None));

        // Stalemate scores statically, not as a draw
        let stalemated = Board::empty()
            .with_piece(sq(0, 3), black(PieceKind::King))
            .with_piece(sq(1, 8), red(PieceKind::Rook))
            .with_piece(sq(9, 4), red(PieceKind::King));
        assert_eq!(minimax(&stalemated, 1, Side::Red, -INFINITY, INFINITY, false), (90, None));
    }

    #[test]
    fn test_pruning_matches_exhaustive() {
        let positions = [
            (skirmish_board(), 2),
            (capture_board(), 3),
            (mate_in_one_board(), 3),
        ];
        for (board, depth) in positions {
            for side in [Side::Red, Side::Black] {
                let pruned = minimax(&board, depth, side, -INFINITY, INFINITY, true);
                let full = exhaustive(&board, depth, side, true);
                assert_eq!(pruned, full, "depth {depth} for {side}");
            }
        }
    }

    #[test]
    fn test_normal_takes_strictly_best() {
        let board = capture_board();
        let capture = Move::new(sq(3, 4), sq(3, 5));
        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            assert_eq!(choose_move(&board, Side::Red, Tier::Normal, &mut rng), Some(capture));
        }
    }

    #[test]
    fn test_normal_ties_are_random() {
        let board = Board::initial();
        // Both cannons can take a horse for +40
        let left = Move::new(sq(7, 1), sq(0, 1));
        let right = Move::new(sq(7, 7), sq(0, 7));

        let mut seen = Vec::new();
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mv = choose_move(&board, Side::Red, Tier::Normal, &mut rng).unwrap();
            assert!(mv == left || mv == right, "unexpected {mv}");
            if !seen.contains(&mv) {
                seen.push(mv);
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_hell_move_is_maximal() {
        let board = capture_board();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let chosen = choose_move(&board, Side::Red, Tier::Hell, &mut rng).unwrap();

        let value_of = |mv: Move| minimax(&board.apply(mv), 2, Side::Red, -INFINITY, INFINITY, false).0;
        let chosen_value = value_of(chosen);
        for mv in legal_moves(&board, Side::Red) {
            assert!(chosen_value >= value_of(mv), "{mv} beats {chosen}");
        }
    }

    #[test]
    fn test_search_finds_mate_in_one() {
        let board = mate_in_one_board();
        let mating = Move::new(sq(5, 8), sq(0, 8));
        let mut ai = MinimaxAI::with_seed(3);
        assert_eq!(ai.best_move(&board, Side::Red, Tier::Hard), Some(mating));
        assert_eq!(ai.best_move(&board, Side::Red, Tier::Hell), Some(mating));
        assert_eq!(terminal_state(&board.apply(mating), Side::Black), GameStatus::Checkmate);
    }

    #[test]
    fn test_play_game() {
        let mut ai = MinimaxAI::with_seed(11);
        let game = ai.play_game(Board::initial(), Tier::Normal, Tier::Normal, 6);
        assert_eq!(game.moves.len(), 6);
        assert_eq!(game.to_move, Side::Red);
        assert_eq!(game.status, GameStatus::Ongoing);
    }
}
