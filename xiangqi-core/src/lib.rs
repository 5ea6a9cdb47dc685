//! Xiangqi Core - Rule engine and AI
//!
//! This crate provides the core game logic:
//! - Board geometry (10x9 grid, palaces, river)
//! - Piece kinds and material values
//! - Per-piece move generation
//! - Legality filtering and checkmate/stalemate detection
//! - Material-plus-check evaluation
//! - Fixed-depth minimax AI with alpha-beta pruning

pub mod board;
pub mod pieces;
pub mod movegen;
pub mod rules;
pub mod eval;
pub mod ai;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, BoardSnapshot, Move, Square, COLS, ROWS};
pub use pieces::{Piece, PieceKind, Side};
pub use movegen::moves_for;
pub use rules::{attacked, kings_face, legal_moves, terminal_state, GameStatus};
pub use eval::{evaluate, Score};
pub use ai::{choose_move, minimax, MinimaxAI, PlayedGame, Tier};
pub use error::CoreError;

/// The standard starting position.
pub fn initial_board() -> Board {
    Board::initial()
}

/// Apply a move (no re-validation), returning the new board.
pub fn apply(board: &Board, mv: Move) -> Board {
    board.apply(mv)
}
