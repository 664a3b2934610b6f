use uuid::Uuid;
use validator::Validate;

use crate::dto::catalog::CreateGameRequest;
use crate::error::{Result, StorageError};
use crate::models::{Game, Performance, PodiumSlot};
use crate::store::Store;

pub struct GameRepository<'a> {
    store: &'a Store,
}

impl<'a> GameRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreateGameRequest) -> Result<Game> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        if self.store.tournaments.get(req.tournament_id)?.is_none() {
            return Err(StorageError::NotFound);
        }
        if self.store.games.any(|g| g.name == req.name)? {
            return Err(StorageError::ConstraintViolation(
                "Game name already exists".to_string(),
            ));
        }

        let mut game = Game::new(req.name.clone(), req.tournament_id);
        game.info = req.info.clone().unwrap_or_default();
        game.started_at = req.started_at;
        self.store.games.insert(game.game_id, game.clone())?;

        Ok(game)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Game> {
        self.store.games.get(id)?.ok_or(StorageError::NotFound)
    }

    /// Resolves a free-form game reference: an exact id, otherwise a
    /// case-insensitive name. Returns `None` when nothing matches or when
    /// the name match is not unique.
    pub fn resolve_reference(&self, reference: &str) -> Result<Option<Game>> {
        let reference = reference.trim();

        if let Ok(id) = reference.parse::<Uuid>() {
            return self.store.games.get(id);
        }

        let wanted = reference.to_lowercase();
        let matches = self
            .store
            .games
            .select(|g| g.name.to_lowercase() == wanted)?;
        match matches.len() {
            1 => Ok(matches.into_iter().next()),
            _ => Ok(None),
        }
    }

    /// Games of a tournament, optionally filtered on the active flag.
    pub fn list_for_tournament(
        &self,
        tournament_id: Uuid,
        is_active: Option<bool>,
    ) -> Result<Vec<Game>> {
        let mut games = self.store.games.select(|g| {
            g.tournament_id == tournament_id && is_active.is_none_or(|active| g.is_active == active)
        })?;
        games.sort_by(|a, b| {
            a.started_at
                .cmp(&b.started_at)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(games)
    }

    /// Records how a team finished (or that it did not place). Outcome
    /// entry is external to the scoring engine, which only ever reads
    /// performances.
    pub fn record_performance(
        &self,
        game_id: Uuid,
        team_id: Uuid,
        result: Option<PodiumSlot>,
    ) -> Result<Performance> {
        if self.store.games.get(game_id)?.is_none() || self.store.teams.get(team_id)?.is_none() {
            return Err(StorageError::NotFound);
        }

        let performance = Performance::new(game_id, team_id, result);
        self.store
            .performances
            .insert(performance.performance_id, performance.clone())?;

        Ok(performance)
    }

    /// Performances of a game that carry a recorded podium result, in slot
    /// order.
    pub fn podium_performances(&self, game_id: Uuid) -> Result<Vec<Performance>> {
        let mut performances = self
            .store
            .performances
            .select(|p| p.game_id == game_id && p.result.is_some())?;
        performances.sort_by(|a, b| {
            a.result
                .cmp(&b.result)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(performances)
    }
}
