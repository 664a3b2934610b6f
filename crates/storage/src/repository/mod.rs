mod game;
mod prediction;
mod predictor;
mod raw_prediction;
mod season;
mod team;
mod tournament;

pub use game::GameRepository;
pub use prediction::PredictionRepository;
pub use predictor::{NameMatch, PredictorRepository};
pub use raw_prediction::RawPredictionRepository;
pub use season::SeasonRepository;
pub use team::TeamRepository;
pub use tournament::TournamentRepository;
