use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a predictor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePredictorRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub social_id: Option<i64>,
}

/// Request payload for creating a prediction. `is_active` is decided by the
/// caller: ingestion deactivates submissions that arrived after the game
/// started.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePredictionRequest {
    pub predictor_id: Uuid,
    pub game_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub is_active: bool,
}

/// Request payload for creating a raw prediction record
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRawPredictionRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub social_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    pub text: Option<String>,
    #[validate(length(min = 1, message = "Game reference is required"))]
    pub game: String,
    pub winner: Option<String>,
    pub runner_up: Option<String>,
    pub third_place: Option<String>,
}
