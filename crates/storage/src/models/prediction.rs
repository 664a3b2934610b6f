use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One predictor's podium call for one game.
///
/// `total_points` and the four hit counters are derived state: the scoring
/// service recomputes them wholesale from the live event set and applies
/// them through `PredictionRepository::apply_score`. No other code path
/// writes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub prediction_id: Uuid,
    pub predictor_id: Uuid,
    pub game_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub total_points: f64,
    pub winners: i32,
    pub runners_up: i32,
    pub third_places: i32,
    pub prize_winners: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(predictor_id: Uuid, game_id: Uuid, submitted_at: DateTime<Utc>) -> Self {
        Self {
            prediction_id: Uuid::new_v4(),
            predictor_id,
            game_id,
            submitted_at,
            total_points: 0.0,
            winners: 0,
            runners_up: 0,
            third_places: 0,
            prize_winners: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }
}
