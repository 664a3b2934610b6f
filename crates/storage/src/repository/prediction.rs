use uuid::Uuid;

use crate::dto::prediction::CreatePredictionRequest;
use crate::error::{Result, StorageError};
use crate::models::{PodiumSlot, Prediction, PredictionEvent};
use crate::services::scoring::ScoreSheet;
use crate::store::Store;

pub struct PredictionRepository<'a> {
    store: &'a Store,
}

impl<'a> PredictionRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Creates a prediction. A second prediction for the same
    /// `(predictor, game)` pair is a constraint violation; submissions are
    /// never overwritten.
    pub fn create(&self, req: &CreatePredictionRequest) -> Result<Prediction> {
        if self.store.predictors.get(req.predictor_id)?.is_none()
            || self.store.games.get(req.game_id)?.is_none()
        {
            return Err(StorageError::NotFound);
        }
        if self.exists_for(req.predictor_id, req.game_id)? {
            return Err(StorageError::ConstraintViolation(
                "Prediction already exists".to_string(),
            ));
        }

        let mut prediction = Prediction::new(req.predictor_id, req.game_id, req.submitted_at);
        prediction.is_active = req.is_active;
        self.store
            .predictions
            .insert(prediction.prediction_id, prediction.clone())?;

        Ok(prediction)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Prediction> {
        self.store.predictions.get(id)?.ok_or(StorageError::NotFound)
    }

    pub fn exists_for(&self, predictor_id: Uuid, game_id: Uuid) -> Result<bool> {
        self.store
            .predictions
            .any(|p| p.predictor_id == predictor_id && p.game_id == game_id)
    }

    /// Predictions on a game, optionally filtered on the active flag.
    /// `None` skips the filter.
    pub fn list_for_game(&self, game_id: Uuid, is_active: Option<bool>) -> Result<Vec<Prediction>> {
        let mut predictions = self.store.predictions.select(|p| {
            p.game_id == game_id && is_active.is_none_or(|active| p.is_active == active)
        })?;
        predictions.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(predictions)
    }

    /// Active predictions across a set of games; the standings queries at
    /// tournament and season scope read through this.
    pub fn list_active_for_games(&self, game_ids: &[Uuid]) -> Result<Vec<Prediction>> {
        let mut predictions = self
            .store
            .predictions
            .select(|p| p.is_active && game_ids.contains(&p.game_id))?;
        predictions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(predictions)
    }

    pub fn add_event(
        &self,
        prediction_id: Uuid,
        team_id: Uuid,
        result: PodiumSlot,
    ) -> Result<PredictionEvent> {
        if self.store.predictions.get(prediction_id)?.is_none()
            || self.store.teams.get(team_id)?.is_none()
        {
            return Err(StorageError::NotFound);
        }

        let event = PredictionEvent::new(prediction_id, team_id, result);
        self.store
            .prediction_events
            .insert(event.event_id, event.clone())?;

        Ok(event)
    }

    /// Events of a prediction in slot order (winner, runner-up, third
    /// place). This is the stable order the scoring tie-break relies on.
    pub fn events_for_prediction(&self, prediction_id: Uuid) -> Result<Vec<PredictionEvent>> {
        let mut events = self
            .store
            .prediction_events
            .select(|e| e.prediction_id == prediction_id)?;
        events.sort_by(|a, b| {
            a.result
                .cmp(&b.result)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(events)
    }

    /// Writes a computed score sheet back to the prediction and its events.
    /// This is the only write path for the derived point fields; a
    /// `ScoreSheet` can only be produced by the scoring service.
    pub fn apply_score(&self, prediction_id: Uuid, sheet: &ScoreSheet) -> Result<()> {
        for (event_id, points) in &sheet.event_points {
            self.store
                .prediction_events
                .update_with(*event_id, |e| e.points = *points)?;
        }

        self.store.predictions.update_with(prediction_id, |p| {
            p.total_points = sheet.total_points;
            p.winners = sheet.winners;
            p.runners_up = sheet.runners_up;
            p.third_places = sheet.third_places;
            p.prize_winners = sheet.prize_winners;
        })
    }

    /// Deletes a prediction together with the events it owns.
    pub fn delete(&self, prediction_id: Uuid) -> Result<()> {
        self.store
            .prediction_events
            .retain(|e| e.prediction_id != prediction_id)?;
        self.store.predictions.remove(prediction_id)
    }
}
