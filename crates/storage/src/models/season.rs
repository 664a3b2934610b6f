use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Season {
    pub season_id: Uuid,
    pub name: String,
    pub info: String,
    pub started_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Season {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            season_id: Uuid::new_v4(),
            name: name.into(),
            info: String::new(),
            started_at: None,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
