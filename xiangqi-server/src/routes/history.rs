//! Match history endpoints

use crate::error::ApiError;
use crate::history::{MatchRecord, MatchSummary, DEFAULT_LIST_LIMIT};
use crate::state::ServerState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Serialize)]
pub struct HistoryListResponse {
    pub records: Vec<MatchSummary>,
}

/// Recent matches, newest first
pub async fn list_history(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryListResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT);
    Json(HistoryListResponse {
        records: state.history.list(limit),
    })
}

/// One full match record, including every board snapshot
pub async fn get_history(
    State(state): State<Arc<ServerState>>,
    Path(record_id): Path<String>,
) -> Result<Json<MatchRecord>, ApiError> {
    state
        .history
        .get(&record_id)
        .map(Json)
        .ok_or(ApiError::NotFound("not found"))
}
