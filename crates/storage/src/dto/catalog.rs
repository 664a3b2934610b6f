use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request payload for creating a season
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSeasonRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub info: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a tournament
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTournamentRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub info: Option<String>,
    pub season_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a team
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub info: Option<String>,
}

/// Request payload for creating a game
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGameRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,
    pub info: Option<String>,
    pub tournament_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
}
