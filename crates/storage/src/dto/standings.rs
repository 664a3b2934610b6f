use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregation level for a standings query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StandingsScope {
    Game(Uuid),
    Tournament(Uuid),
    Season(Uuid),
}

/// One leaderboard row: a predictor's aggregate over every active
/// prediction in scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsRow {
    pub predictor_id: Uuid,
    pub predictor_name: String,
    pub social_id: Option<i64>,
    pub count: usize,
    pub total_points: f64,
    pub winners: i32,
    pub runners_up: i32,
    pub third_places: i32,
    pub prize_winners: i32,
}

impl StandingsRow {
    /// Leaderboard order: points descending, then fewer predictions ranks
    /// higher, then exact-hit counters descending (winner slot first), then
    /// podium bonuses descending, with the predictor name as the final
    /// deterministic tie-break.
    pub fn compare(&self, other: &Self) -> Ordering {
        other
            .total_points
            .total_cmp(&self.total_points)
            .then_with(|| self.count.cmp(&other.count))
            .then_with(|| other.winners.cmp(&self.winners))
            .then_with(|| other.runners_up.cmp(&self.runners_up))
            .then_with(|| other.third_places.cmp(&self.third_places))
            .then_with(|| other.prize_winners.cmp(&self.prize_winners))
            .then_with(|| self.predictor_name.cmp(&other.predictor_name))
    }
}
