use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use storage::Store;
use storage::dto::prediction::CreateRawPredictionRequest;
use storage::repository::RawPredictionRepository;

use crate::Result;

/// On-disk format for a harvested batch of raw submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    pub submissions: Vec<SubmissionEntry>,
}

impl BatchFile {
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub name: String,
    #[serde(default)]
    pub social_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub text: Option<String>,
    pub game: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub runner_up: Option<String>,
    #[serde(default)]
    pub third_place: Option<String>,
}

/// Writes a batch file into the store as active raw prediction records,
/// ready for the ingestion pipeline.
pub struct BatchLoader<'a> {
    store: &'a Store,
}

impl<'a> BatchLoader<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn load(&self, batch: &BatchFile) -> Result<usize> {
        let raws = RawPredictionRepository::new(self.store);

        for entry in &batch.submissions {
            raws.create(&CreateRawPredictionRequest {
                name: entry.name.clone(),
                social_id: entry.social_id,
                timestamp: entry.timestamp,
                text: entry.text.clone(),
                game: entry.game.clone(),
                winner: entry.winner.clone(),
                runner_up: entry.runner_up.clone(),
                third_place: entry.third_place.clone(),
            })?;
        }

        info!("Loaded {} raw submissions", batch.submissions.len());
        Ok(batch.submissions.len())
    }
}
