//! Game API: creation, human moves and AI replies
//!
//! Move handlers run on the blocking pool since a hard or hell AI reply
//! searches several plies.

use crate::error::ApiError;
use crate::history::Winner;
use crate::state::{GameSession, ServerState, SharedSession};
use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, MutexGuard};
use xiangqi_core::{BoardSnapshot, Move, Side, Square, Tier};

#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    pub difficulty: Option<String>,
    #[serde(default)]
    pub red_is_ai: bool,
}

#[derive(Serialize)]
pub struct NewGameResponse {
    pub game_id: String,
    pub board: BoardSnapshot,
    pub turn: Side,
    pub red_is_ai: bool,
    pub difficulty: Tier,
}

#[derive(Serialize)]
pub struct GameStateResponse {
    pub board: BoardSnapshot,
    pub turn: Side,
    pub difficulty: Tier,
    pub red_is_ai: bool,
    pub moves_count: u32,
    pub winner: Option<Winner>,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub from: [i32; 2],
    pub to: [i32; 2],
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub board: BoardSnapshot,
    pub turn: Side,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_move: Option<Move>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
    pub game_over: bool,
    /// History id of the finished game, once it is stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_id: Option<String>,
}

impl MoveResponse {
    fn from_session(game: &GameSession, ai_move: Option<Move>, record_id: Option<String>) -> Self {
        Self {
            board: game.board.serialize(),
            turn: game.turn,
            ai_move,
            winner: game.winner,
            game_over: game.is_over(),
            record_id,
        }
    }
}

fn lookup(state: &ServerState, game_id: &str) -> Result<SharedSession, ApiError> {
    state
        .sessions
        .get(game_id)
        .ok_or(ApiError::NotFound("game not found"))
}

fn lock(session: &SharedSession) -> Result<MutexGuard<'_, GameSession>, ApiError> {
    session
        .lock()
        .map_err(|_| ApiError::Internal("game session lock poisoned".to_string()))
}

/// Persist the game if this request finished it.
///
/// The result stands even when the history file cannot be written; the
/// record is then dumped to the error log instead of being lost.
fn record_if_finished(state: &ServerState, game: &GameSession) -> Option<String> {
    let record = game.to_record()?;
    tracing::info!(
        "game over: {:?} after {} moves ({})",
        record.winner,
        record.moves_count,
        record.difficulty
    );

    let dump = serde_json::to_string(&record).unwrap_or_default();
    match state.history.append(record) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::error!("failed to record finished game: {}; record: {}", e, dump);
            None
        }
    }
}

/// Start a new game
///
/// The body is optional; an empty body means normal difficulty with a
/// human red player.
pub async fn new_game(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> Result<Json<NewGameResponse>, ApiError> {
    let req: NewGameRequest = if body.is_empty() {
        NewGameRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| ApiError::BadRequest(e.to_string()))?
    };

    let tier = match req.difficulty.as_deref() {
        Some(name) => name.parse::<Tier>()?,
        None => Tier::default(),
    };

    let game = GameSession::new(tier, req.red_is_ai);
    let board = game.board.serialize();
    let turn = game.turn;
    let game_id = state.sessions.insert(game);
    tracing::info!("new game {} ({}, red_is_ai={})", game_id, tier, req.red_is_ai);

    Ok(Json(NewGameResponse {
        game_id,
        board,
        turn,
        red_is_ai: req.red_is_ai,
        difficulty: tier,
    }))
}

/// Current state of a game
pub async fn get_game(
    State(state): State<Arc<ServerState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameStateResponse>, ApiError> {
    let session = lookup(&state, &game_id)?;
    let game = lock(&session)?;

    Ok(Json(GameStateResponse {
        board: game.board.serialize(),
        turn: game.turn,
        difficulty: game.tier,
        red_is_ai: game.red_is_ai,
        moves_count: game.moves_count,
        winner: game.winner,
    }))
}

/// Decode a move body; any malformed or off-board square is `invalid from/to`
fn parse_move(body: &[u8]) -> Result<Move, ApiError> {
    let invalid = || ApiError::BadRequest("invalid from/to".to_string());

    let req: MoveRequest = serde_json::from_slice(body).map_err(|_| invalid())?;
    let from = Square::try_from(req.from).map_err(|_| invalid())?;
    let to = Square::try_from(req.to).map_err(|_| invalid())?;
    Ok(Move::new(from, to))
}

/// Apply a human move; the AI answers in the same request when it is next
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Path(game_id): Path<String>,
    body: Bytes,
) -> Result<Json<MoveResponse>, ApiError> {
    let session = lookup(&state, &game_id)?;
    let mv = parse_move(&body)?;

    let response = tokio::task::spawn_blocking(move || -> Result<MoveResponse, ApiError> {
        let mut game = lock(&session)?;

        if let Err(e) = game.submit(mv) {
            tracing::warn!("rejected move {} in game {}: {}", mv, game_id, e);
            return Err(e.into());
        }

        let mut ai_move = None;
        if !game.is_over() && game.is_ai_turn() {
            let (reply, _) = game.ai_turn(&mut rand::thread_rng())?;
            ai_move = Some(reply);
        }

        let record_id = record_if_finished(&state, &game);
        Ok(MoveResponse::from_session(&game, ai_move, record_id))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(response))
}

/// Ask the AI to move, for when it plays red or missed its reply
pub async fn ai_move(
    State(state): State<Arc<ServerState>>,
    Path(game_id): Path<String>,
) -> Result<Json<MoveResponse>, ApiError> {
    let session = lookup(&state, &game_id)?;

    let response = tokio::task::spawn_blocking(move || -> Result<MoveResponse, ApiError> {
        let mut game = lock(&session)?;
        let (reply, _) = game.ai_turn(&mut rand::thread_rng())?;

        let record_id = record_if_finished(&state, &game);
        Ok(MoveResponse::from_session(&game, Some(reply), record_id))
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(response))
}
