use tracing::{debug, info, warn};

use storage::Store;
use storage::dto::prediction::{CreatePredictionRequest, CreatePredictorRequest};
use storage::models::{Game, PodiumSlot, Predictor, RawPrediction};
use storage::repository::{
    GameRepository, NameMatch, PredictionRepository, PredictorRepository, RawPredictionRepository,
    TeamRepository,
};

use crate::Result;
use crate::notes;

/// Per-batch counters reported back to the caller. Individual failures are
/// visible only through the notes written onto the raw records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub succeeded: usize,
    pub total: usize,
}

/// What became of a single raw record.
enum Outcome {
    Created { late: bool },
    Rejected(&'static str),
}

/// Turns raw submissions into validated predictions.
///
/// Each record either becomes a prediction (and is deactivated with a
/// success note) or stays active carrying a diagnostic note, ready for
/// manual correction and a rerun. No record ever aborts the batch.
pub struct RawPredictionProcessor<'a> {
    store: &'a Store,
}

impl<'a> RawPredictionProcessor<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Processes every currently active raw prediction, oldest first.
    /// Records consumed by an earlier run are inactive and thus never
    /// picked up again.
    pub fn process_all(&self) -> Result<IngestReport> {
        let raws = RawPredictionRepository::new(self.store).list_active()?;
        self.process_batch(&raws)
    }

    pub fn process_batch(&self, raws: &[RawPrediction]) -> Result<IngestReport> {
        let mut report = IngestReport {
            succeeded: 0,
            total: 0,
        };

        for raw in raws {
            if !raw.is_active {
                debug!(raw_id = %raw.raw_id, "skipping already processed record");
                continue;
            }
            report.total += 1;
            if self.process_one(raw)? {
                report.succeeded += 1;
            }
        }

        info!(
            "Processed raw predictions: {} of {} created",
            report.succeeded, report.total
        );
        Ok(report)
    }

    /// `Ok(true)` when a prediction was created. Store failures while
    /// creating the prediction are contained to this record; only a store
    /// that cannot even write the note aborts the batch.
    fn process_one(&self, raw: &RawPrediction) -> Result<bool> {
        let repo = RawPredictionRepository::new(self.store);
        match self.ingest(raw) {
            Ok(Outcome::Created { late }) => {
                let note = if late {
                    notes::CREATED_INACTIVE
                } else {
                    notes::CREATED
                };
                repo.mark_processed(raw.raw_id, note)?;
                Ok(true)
            }
            Ok(Outcome::Rejected(note)) => {
                warn!(raw_id = %raw.raw_id, name = %raw.name, note, "raw prediction rejected");
                repo.annotate(raw.raw_id, note)?;
                Ok(false)
            }
            Err(e) => {
                warn!(raw_id = %raw.raw_id, error = %e, "store failure while creating prediction");
                repo.annotate(raw.raw_id, notes::PREDICTION_FAILED)?;
                Ok(false)
            }
        }
    }

    fn ingest(&self, raw: &RawPrediction) -> storage::Result<Outcome> {
        let Some(game) = GameRepository::new(self.store).resolve_reference(&raw.game)? else {
            return Ok(Outcome::Rejected(notes::GAME_NOT_FOUND));
        };

        let predictor = match self.resolve_predictor(raw)? {
            Some(predictor) => predictor,
            None => return Ok(Outcome::Rejected(notes::PREDICTOR_AMBIGUOUS)),
        };

        let predictions = PredictionRepository::new(self.store);
        if predictions.exists_for(predictor.predictor_id, game.game_id)? {
            return Ok(Outcome::Rejected(notes::PREDICTION_EXISTS));
        }

        // A submission timestamped at or after kick-off is kept for audit
        // but never scored.
        let late = game
            .started_at
            .is_some_and(|started_at| raw.timestamp >= started_at);

        let prediction = predictions.create(&CreatePredictionRequest {
            predictor_id: predictor.predictor_id,
            game_id: game.game_id,
            submitted_at: raw.timestamp,
            is_active: !late,
        })?;

        self.create_events(raw, &game, prediction.prediction_id)?;

        Ok(Outcome::Created { late })
    }

    /// Identity resolution: the social id is the strongest signal, then a
    /// unique case-insensitive name. An ambiguous name with no id is never
    /// auto-resolved; a name with zero matches becomes a new predictor.
    fn resolve_predictor(&self, raw: &RawPrediction) -> storage::Result<Option<Predictor>> {
        let predictors = PredictorRepository::new(self.store);

        if let Some(social_id) = raw.social_id
            && let Some(predictor) = predictors.find_by_social_id(social_id)?
        {
            return Ok(Some(predictor));
        }

        match predictors.match_by_name(&raw.name)? {
            NameMatch::Unique(predictor) => Ok(Some(predictor)),
            NameMatch::Ambiguous if raw.social_id.is_none() => Ok(None),
            NameMatch::None | NameMatch::Ambiguous => {
                let predictor = predictors.create(&CreatePredictorRequest {
                    name: raw.name.trim().to_string(),
                    social_id: raw.social_id,
                })?;
                info!(name = %predictor.name, "created new predictor");
                Ok(Some(predictor))
            }
        }
    }

    fn create_events(
        &self,
        raw: &RawPrediction,
        game: &Game,
        prediction_id: uuid::Uuid,
    ) -> storage::Result<()> {
        let teams = TeamRepository::new(self.store);
        let predictions = PredictionRepository::new(self.store);

        let guesses = [
            (PodiumSlot::Winner, raw.winner.as_str()),
            (PodiumSlot::RunnerUp, raw.runner_up.as_str()),
            (PodiumSlot::ThirdPlace, raw.third_place.as_str()),
        ];

        for (slot, guess) in guesses {
            let guess = guess.trim();
            if guess.is_empty() {
                continue;
            }
            match teams.find_unique_by_name(guess)? {
                Some(team) => {
                    predictions.add_event(prediction_id, team.team_id, slot)?;
                }
                // Partial predictions are valid; an unresolvable team name
                // only drops that one guess.
                None => {
                    debug!(game = %game.name, guess, "unresolved team name skipped")
                }
            }
        }

        Ok(())
    }
}
