mod game;
mod performance;
mod podium;
mod prediction;
mod prediction_event;
mod predictor;
mod raw_prediction;
mod season;
mod team;
mod tournament;

pub use game::Game;
pub use performance::Performance;
pub use podium::{PodiumSlot, TEAM_PLACED_POINTS};
pub use prediction::Prediction;
pub use prediction_event::PredictionEvent;
pub use predictor::Predictor;
pub use raw_prediction::RawPrediction;
pub use season::Season;
pub use team::Team;
pub use tournament::Tournament;
