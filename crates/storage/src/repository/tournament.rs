use uuid::Uuid;
use validator::Validate;

use crate::dto::catalog::CreateTournamentRequest;
use crate::error::{Result, StorageError};
use crate::models::Tournament;
use crate::store::Store;

pub struct TournamentRepository<'a> {
    store: &'a Store,
}

impl<'a> TournamentRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreateTournamentRequest) -> Result<Tournament> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        if self.store.seasons.get(req.season_id)?.is_none() {
            return Err(StorageError::NotFound);
        }
        if self.store.tournaments.any(|t| t.name == req.name)? {
            return Err(StorageError::ConstraintViolation(
                "Tournament name already exists".to_string(),
            ));
        }

        let mut tournament = Tournament::new(req.name.clone(), req.season_id);
        tournament.info = req.info.clone().unwrap_or_default();
        tournament.started_at = req.started_at;
        self.store
            .tournaments
            .insert(tournament.tournament_id, tournament.clone())?;

        Ok(tournament)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Tournament> {
        self.store
            .tournaments
            .get(id)?
            .ok_or(StorageError::NotFound)
    }

    /// Tournaments of a season, optionally filtered on the active flag.
    /// `None` skips the filter.
    pub fn list_for_season(&self, season_id: Uuid, is_active: Option<bool>) -> Result<Vec<Tournament>> {
        let mut tournaments = self.store.tournaments.select(|t| {
            t.season_id == season_id && is_active.is_none_or(|active| t.is_active == active)
        })?;
        tournaments.sort_by(|a, b| {
            a.started_at
                .cmp(&b.started_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(tournaments)
    }
}
