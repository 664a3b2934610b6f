use validator::Validate;

use crate::dto::catalog::CreateSeasonRequest;
use crate::error::{Result, StorageError};
use crate::models::Season;
use crate::store::Store;

pub struct SeasonRepository<'a> {
    store: &'a Store,
}

impl<'a> SeasonRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreateSeasonRequest) -> Result<Season> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        if self.store.seasons.any(|s| s.name == req.name)? {
            return Err(StorageError::ConstraintViolation(
                "Season name already exists".to_string(),
            ));
        }

        let mut season = Season::new(req.name.clone());
        season.info = req.info.clone().unwrap_or_default();
        season.started_at = req.started_at;
        self.store.seasons.insert(season.season_id, season.clone())?;

        Ok(season)
    }

    pub fn find_by_id(&self, id: uuid::Uuid) -> Result<Season> {
        self.store.seasons.get(id)?.ok_or(StorageError::NotFound)
    }

    pub fn list(&self) -> Result<Vec<Season>> {
        let mut seasons = self.store.seasons.select(|_| true)?;
        seasons.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(seasons)
    }
}
