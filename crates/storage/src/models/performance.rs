use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PodiumSlot;

/// Links a team to a game together with its recorded finishing position.
/// `result` stays `None` while the game is pending or the team did not
/// place. At most one performance per `(game, result)` carries a given
/// non-null result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Performance {
    pub performance_id: Uuid,
    pub game_id: Uuid,
    pub team_id: Uuid,
    pub result: Option<PodiumSlot>,
    pub created_at: DateTime<Utc>,
}

impl Performance {
    pub fn new(game_id: Uuid, team_id: Uuid, result: Option<PodiumSlot>) -> Self {
        Self {
            performance_id: Uuid::new_v4(),
            game_id,
            team_id,
            result,
            created_at: Utc::now(),
        }
    }
}
