use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A participant who submits predictions. `social_id` is the numeric id on
/// the external social network the submissions are harvested from; it is
/// the strongest identity signal when present, falling back to
/// case-insensitive name matching otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predictor {
    pub predictor_id: Uuid,
    pub name: String,
    pub info: String,
    pub social_id: Option<i64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Predictor {
    pub fn new(name: impl Into<String>, social_id: Option<i64>) -> Self {
        Self {
            predictor_id: Uuid::new_v4(),
            name: name.into(),
            info: String::new(),
            social_id,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
