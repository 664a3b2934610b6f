use uuid::Uuid;
use validator::Validate;

use crate::dto::catalog::CreateTeamRequest;
use crate::error::{Result, StorageError};
use crate::models::Team;
use crate::store::Store;

pub struct TeamRepository<'a> {
    store: &'a Store,
}

impl<'a> TeamRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreateTeamRequest) -> Result<Team> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        if self.store.teams.any(|t| t.name == req.name)? {
            return Err(StorageError::ConstraintViolation(
                "Team name already exists".to_string(),
            ));
        }

        let mut team = Team::new(req.name.clone());
        team.info = req.info.clone().unwrap_or_default();
        self.store.teams.insert(team.team_id, team.clone())?;

        Ok(team)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Team> {
        self.store.teams.get(id)?.ok_or(StorageError::NotFound)
    }

    /// Case-insensitive name lookup. Returns `None` unless exactly one team
    /// matches; a non-unique match is never resolved to an arbitrary row.
    pub fn find_unique_by_name(&self, name: &str) -> Result<Option<Team>> {
        let wanted = name.trim().to_lowercase();
        let matches = self
            .store
            .teams
            .select(|t| t.name.to_lowercase() == wanted)?;
        match matches.len() {
            1 => Ok(matches.into_iter().next()),
            _ => Ok(None),
        }
    }

    pub fn deactivate(&self, id: Uuid) -> Result<()> {
        self.store.teams.update_with(id, |t| t.is_active = false)
    }

    /// Hard delete. Refused while any performance or prediction event still
    /// references the team.
    pub fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.performances.any(|p| p.team_id == id)?
            || self.store.prediction_events.any(|e| e.team_id == id)?
        {
            return Err(StorageError::ConstraintViolation(
                "Team is referenced and cannot be deleted".to_string(),
            ));
        }
        self.store.teams.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::catalog::CreateTeamRequest;

    fn create_team(store: &Store, name: &str) -> Team {
        TeamRepository::new(store)
            .create(&CreateTeamRequest {
                name: name.to_string(),
                info: None,
            })
            .unwrap()
    }

    #[test]
    fn test_find_unique_by_name_case_insensitive() {
        let store = Store::new();
        let team = create_team(&store, "Red Foxes");

        let found = TeamRepository::new(&store)
            .find_unique_by_name("red foxes")
            .unwrap();
        assert_eq!(found.unwrap().team_id, team.team_id);
    }

    #[test]
    fn test_find_unique_by_name_missing() {
        let store = Store::new();
        create_team(&store, "Red Foxes");

        let found = TeamRepository::new(&store)
            .find_unique_by_name("Blue Owls")
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let store = Store::new();
        create_team(&store, "Red Foxes");

        let err = TeamRepository::new(&store)
            .create(&CreateTeamRequest {
                name: "Red Foxes".to_string(),
                info: None,
            })
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_referenced_team_deactivates_but_never_deletes() {
        use crate::dto::catalog::{CreateGameRequest, CreateSeasonRequest, CreateTournamentRequest};
        use crate::repository::{GameRepository, SeasonRepository, TournamentRepository};

        let store = Store::new();
        let team = create_team(&store, "Red Foxes");

        let season = SeasonRepository::new(&store)
            .create(&CreateSeasonRequest {
                name: "2023".to_string(),
                info: None,
                started_at: None,
            })
            .unwrap();
        let tournament = TournamentRepository::new(&store)
            .create(&CreateTournamentRequest {
                name: "Spring Cup".to_string(),
                info: None,
                season_id: season.season_id,
                started_at: None,
            })
            .unwrap();
        let game = GameRepository::new(&store)
            .create(&CreateGameRequest {
                name: "Final".to_string(),
                info: None,
                tournament_id: tournament.tournament_id,
                started_at: None,
            })
            .unwrap();
        GameRepository::new(&store)
            .record_performance(game.game_id, team.team_id, None)
            .unwrap();

        let repo = TeamRepository::new(&store);
        let err = repo.delete(team.team_id).unwrap_err();
        assert!(err.is_constraint_violation());

        repo.deactivate(team.team_id).unwrap();
        assert!(!repo.find_by_id(team.team_id).unwrap().is_active);
    }
}
