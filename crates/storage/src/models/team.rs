use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A competing entity. Teams are referenced by performances and prediction
/// events, so they are deactivated rather than deleted once in use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub team_id: Uuid,
    pub name: String,
    pub info: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            team_id: Uuid::new_v4(),
            name: name.into(),
            info: String::new(),
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
