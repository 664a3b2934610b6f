use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An unvalidated submission as harvested from the outside world.
///
/// The ingestion pipeline consumes active records exactly once: on success
/// the record is deactivated, on failure it stays active with a diagnostic
/// `note` so an operator can correct and retry it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawPrediction {
    pub raw_id: Uuid,
    /// Free-text predictor name as written in the submission.
    pub name: String,
    pub social_id: Option<i64>,
    /// When the submission was made, per the harvested source.
    pub timestamp: DateTime<Utc>,
    /// Full original submission text, kept for audit.
    pub text: String,
    /// Game reference: an exact id or a game name.
    pub game: String,
    pub winner: String,
    pub runner_up: String,
    pub third_place: String,
    pub note: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl RawPrediction {
    pub fn new(
        name: impl Into<String>,
        social_id: Option<i64>,
        timestamp: DateTime<Utc>,
        game: impl Into<String>,
    ) -> Self {
        Self {
            raw_id: Uuid::new_v4(),
            name: name.into(),
            social_id,
            timestamp,
            text: String::new(),
            game: game.into(),
            winner: String::new(),
            runner_up: String::new(),
            third_place: String::new(),
            note: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
