//! Audit-trail notes written back onto raw prediction records.

/// Success marker; the surrounding admin tooling filters on this exact
/// literal.
pub const CREATED: &str = "Создан";

/// Success marker for a submission that arrived after the game started:
/// the prediction is kept for audit but created inactive.
pub const CREATED_INACTIVE: &str = "Создан (неактивен: получен после начала игры)";

pub const GAME_NOT_FOUND: &str = "no matching game found";

pub const PREDICTOR_AMBIGUOUS: &str = "ambiguous predictor name";

pub const PREDICTION_EXISTS: &str = "prediction already exists";

pub const PREDICTION_FAILED: &str = "failed to create prediction";
