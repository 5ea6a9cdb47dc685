//! Match history persistence
//!
//! Completed matches are kept as a single JSON array on disk. Every write
//! reloads the file, appends, and rewrites it under a store-wide lock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use xiangqi_core::{BoardSnapshot, Side, Tier};

/// Default location of the history file
pub const DEFAULT_HISTORY_PATH: &str = "data/game_history.json";

/// Default number of summaries returned by `list`
pub const DEFAULT_LIST_LIMIT: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Final result of a match
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Red,
    Black,
    Draw,
}

impl From<Side> for Winner {
    fn from(side: Side) -> Self {
        match side {
            Side::Red => Winner::Red,
            Side::Black => Winner::Black,
        }
    }
}

/// A stored match with its full board sequence
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    pub winner: Winner,
    #[serde(default)]
    pub difficulty: Tier,
    #[serde(default)]
    pub moves_count: u32,
    #[serde(default)]
    pub board_snapshots: Vec<BoardSnapshot>,
    #[serde(default)]
    pub red_is_ai: bool,
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(
        winner: Winner,
        difficulty: Tier,
        moves_count: u32,
        board_snapshots: Vec<BoardSnapshot>,
        red_is_ai: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            winner,
            difficulty,
            moves_count,
            board_snapshots,
            red_is_ai,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            id: self.id.clone(),
            winner: self.winner,
            difficulty: self.difficulty,
            moves_count: self.moves_count,
            red_is_ai: self.red_is_ai,
            created_at: self.created_at,
        }
    }
}

/// Listing entry, without snapshots
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSummary {
    pub id: String,
    pub winner: Winner,
    pub difficulty: Tier,
    pub moves_count: u32,
    pub red_is_ai: bool,
    pub created_at: DateTime<Utc>,
}

/// JSON-file backed store of completed matches
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, returning its id
    pub fn append(&self, record: MatchRecord) -> Result<String, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let id = record.id.clone();
        let mut records = self.load_all();
        records.push(record);
        self.save_all(&records)?;

        tracing::info!("recorded match {} ({} total)", id, records.len());
        Ok(id)
    }

    /// The most recent `limit` matches, newest first. A limit of 0 lists all.
    pub fn list(&self, limit: usize) -> Vec<MatchSummary> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let records = self.load_all();
        let start = match limit {
            0 => 0,
            n => records.len().saturating_sub(n),
        };
        records[start..].iter().rev().map(MatchRecord::summary).collect()
    }

    /// Full record by id
    pub fn get(&self, id: &str) -> Option<MatchRecord> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load_all().into_iter().find(|r| r.id == id)
    }

    /// Missing or unreadable files read as empty
    fn load_all(&self) -> Vec<MatchRecord> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("ignoring unreadable history file {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    fn save_all(&self, records: &[MatchRecord]) -> Result<(), HistoryError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_PATH)
    }
}
