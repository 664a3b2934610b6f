use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub game_id: Uuid,
    pub name: String,
    pub info: String,
    pub tournament_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Game {
    pub fn new(name: impl Into<String>, tournament_id: Uuid) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            name: name.into(),
            info: String::new(),
            tournament_id,
            started_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
