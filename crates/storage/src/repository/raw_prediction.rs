use uuid::Uuid;
use validator::Validate;

use crate::dto::prediction::CreateRawPredictionRequest;
use crate::error::{Result, StorageError};
use crate::models::RawPrediction;
use crate::store::Store;

pub struct RawPredictionRepository<'a> {
    store: &'a Store,
}

impl<'a> RawPredictionRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreateRawPredictionRequest) -> Result<RawPrediction> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        let mut raw = RawPrediction::new(
            req.name.clone(),
            req.social_id,
            req.timestamp,
            req.game.clone(),
        );
        raw.winner = req.winner.clone().unwrap_or_default();
        raw.runner_up = req.runner_up.clone().unwrap_or_default();
        raw.third_place = req.third_place.clone().unwrap_or_default();
        raw.text = req.text.clone().unwrap_or_default();
        self.store.raw_predictions.insert(raw.raw_id, raw.clone())?;

        Ok(raw)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<RawPrediction> {
        self.store
            .raw_predictions
            .get(id)?
            .ok_or(StorageError::NotFound)
    }

    /// Records still awaiting ingestion, oldest submission first.
    pub fn list_active(&self) -> Result<Vec<RawPrediction>> {
        let mut raws = self.store.raw_predictions.select(|r| r.is_active)?;
        raws.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(raws)
    }

    /// Writes a diagnostic note, leaving the record active for correction
    /// and retry.
    pub fn annotate(&self, id: Uuid, note: &str) -> Result<()> {
        self.store
            .raw_predictions
            .update_with(id, |r| r.note = note.to_string())
    }

    /// Deactivates a consumed record and writes the final note.
    pub fn mark_processed(&self, id: Uuid, note: &str) -> Result<()> {
        self.store.raw_predictions.update_with(id, |r| {
            r.note = note.to_string();
            r.is_active = false;
        })
    }
}
