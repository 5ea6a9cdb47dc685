//! Server state management
//!
//! Live games are held in an explicit session store keyed by game id.
//! The map lock is only held to look a session up; each session has its
//! own mutex so at most one request mutates a game at a time.

use crate::history::{HistoryStore, MatchRecord, Winner};
use rand::Rng;
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use xiangqi_core::{
    choose_move, initial_board, legal_moves, terminal_state, Board, BoardSnapshot, GameStatus,
    Move, Side, Tier,
};

/// Rejections for a move request
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("game over")]
    GameOver,
    #[error("illegal move")]
    IllegalMove,
    #[error("not ai turn")]
    NotAiTurn,
    #[error("no move")]
    NoMove,
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// One human-vs-AI game
#[derive(Clone, Debug)]
pub struct GameSession {
    pub board: Board,
    pub turn: Side,
    pub tier: Tier,
    pub red_is_ai: bool,
    pub moves_count: u32,
    pub board_history: Vec<BoardSnapshot>,
    pub winner: Option<Winner>,
}

impl GameSession {
    /// Fresh game from the starting position, red to move
    pub fn new(tier: Tier, red_is_ai: bool) -> Self {
        Self::from_board(initial_board(), Side::Red, tier, red_is_ai)
    }

    /// Game resuming from an arbitrary position
    pub fn from_board(board: Board, turn: Side, tier: Tier, red_is_ai: bool) -> Self {
        Self {
            board,
            turn,
            tier,
            red_is_ai,
            moves_count: 0,
            board_history: vec![board.serialize()],
            winner: None,
        }
    }

    pub fn ai_side(&self) -> Side {
        if self.red_is_ai {
            Side::Red
        } else {
            Side::Black
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.turn == self.ai_side()
    }

    /// Validate and play a move for the side to move
    pub fn submit(&mut self, mv: Move) -> Result<Option<Winner>, TurnError> {
        if self.is_over() {
            return Err(TurnError::GameOver);
        }
        if !legal_moves(&self.board, self.turn).contains(&mv) {
            return Err(TurnError::IllegalMove);
        }
        Ok(self.play(mv))
    }

    /// Let the AI pick and play its move
    pub fn ai_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<(Move, Option<Winner>), TurnError> {
        if self.is_over() {
            return Err(TurnError::GameOver);
        }
        if !self.is_ai_turn() {
            return Err(TurnError::NotAiTurn);
        }

        let mv = choose_move(&self.board, self.turn, self.tier, rng).ok_or(TurnError::NoMove)?;
        tracing::debug!("ai ({}, {}) plays {}", self.turn, self.tier, mv);
        Ok((mv, self.play(mv)))
    }

    /// Apply, record the snapshot, pass the turn and classify the result
    fn play(&mut self, mv: Move) -> Option<Winner> {
        let mover = self.turn;
        self.board = self.board.apply(mv);
        self.moves_count += 1;
        self.board_history.push(self.board.serialize());
        self.turn = mover.opponent();

        self.winner = match terminal_state(&self.board, self.turn) {
            GameStatus::Ongoing => None,
            GameStatus::Checkmate => Some(Winner::from(mover)),
            GameStatus::Stalemate => Some(Winner::Draw),
        };
        self.winner
    }

    /// History entry for a finished game
    pub fn to_record(&self) -> Option<MatchRecord> {
        self.winner.map(|winner| {
            MatchRecord::new(
                winner,
                self.tier,
                self.moves_count,
                self.board_history.clone(),
                self.red_is_ai,
            )
        })
    }
}

// ============================================================================
// SESSION STORE
// ============================================================================

pub type SharedSession = Arc<Mutex<GameSession>>;

/// Live games keyed by game id
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<FxHashMap<String, SharedSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a session under a fresh id
    pub fn insert(&self, session: GameSession) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        id
    }

    pub fn get(&self, id: &str) -> Option<SharedSession> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Server-wide shared state
pub struct ServerState {
    pub sessions: SessionStore,
    pub history: HistoryStore,
}

impl ServerState {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            sessions: SessionStore::new(),
            history,
        }
    }
}
