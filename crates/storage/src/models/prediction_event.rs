use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single guess within a prediction: "this team will take this slot".
/// `points` is derived state written only by the scoring service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionEvent {
    pub event_id: Uuid,
    pub prediction_id: Uuid,
    pub team_id: Uuid,
    pub result: super::PodiumSlot,
    pub points: f64,
    pub created_at: DateTime<Utc>,
}

impl PredictionEvent {
    pub fn new(prediction_id: Uuid, team_id: Uuid, result: super::PodiumSlot) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            prediction_id,
            team_id,
            result,
            points: 0.0,
            created_at: Utc::now(),
        }
    }
}
