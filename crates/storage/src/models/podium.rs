use serde::{Deserialize, Serialize};

/// Points awarded to a guessed team that finished on the podium but not in
/// the guessed slot.
pub const TEAM_PLACED_POINTS: f64 = 2.0;

/// A podium finishing position. A closed set: games award exactly one
/// winner, one runner-up and one third place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PodiumSlot {
    Winner,
    RunnerUp,
    ThirdPlace,
}

impl PodiumSlot {
    /// All slots in rank order.
    pub const ALL: [PodiumSlot; 3] = [
        PodiumSlot::Winner,
        PodiumSlot::RunnerUp,
        PodiumSlot::ThirdPlace,
    ];

    /// Points for a prediction that names the right team in this slot.
    pub fn exact_points(self) -> f64 {
        match self {
            PodiumSlot::Winner => 4.0,
            PodiumSlot::RunnerUp => 3.0,
            PodiumSlot::ThirdPlace => 3.0,
        }
    }
}
