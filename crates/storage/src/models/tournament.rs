use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    pub tournament_id: Uuid,
    pub name: String,
    pub info: String,
    pub season_id: Uuid,
    pub started_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn new(name: impl Into<String>, season_id: Uuid) -> Self {
        Self {
            tournament_id: Uuid::new_v4(),
            name: name.into(),
            info: String::new(),
            season_id,
            started_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
