use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use storage::Store;
use storage::dto::catalog::{
    CreateGameRequest, CreateSeasonRequest, CreateTeamRequest, CreateTournamentRequest,
};
use storage::models::PodiumSlot;
use storage::repository::{GameRepository, SeasonRepository, TeamRepository, TournamentRepository};

use crate::{ImporterError, Result};

/// On-disk seed format: the full entity catalog a store is primed with
/// before ingestion runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub teams: Vec<TeamEntry>,
    pub seasons: Vec<SeasonEntry>,
}

impl CatalogFile {
    pub fn from_path(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonEntry {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub tournaments: Vec<TournamentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TournamentEntry {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    pub games: Vec<GameEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    pub name: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    /// Recorded outcomes, if the game already finished.
    #[serde(default)]
    pub performances: Vec<PerformanceEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceEntry {
    pub team: String,
    pub result: Option<PodiumSlot>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogSummary {
    pub teams: usize,
    pub seasons: usize,
    pub tournaments: usize,
    pub games: usize,
    pub performances: usize,
}

/// Writes a catalog file into the store through the repositories, teams
/// first so that game outcomes can reference them by name.
pub struct CatalogLoader<'a> {
    store: &'a Store,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn load(&self, catalog: &CatalogFile) -> Result<CatalogSummary> {
        let mut summary = CatalogSummary::default();

        let teams = TeamRepository::new(self.store);
        for entry in &catalog.teams {
            teams.create(&CreateTeamRequest {
                name: entry.name.clone(),
                info: entry.info.clone(),
            })?;
            summary.teams += 1;
        }

        for season_entry in &catalog.seasons {
            let season = SeasonRepository::new(self.store).create(&CreateSeasonRequest {
                name: season_entry.name.clone(),
                info: season_entry.info.clone(),
                started_at: season_entry.started_at,
            })?;
            summary.seasons += 1;

            for tournament_entry in &season_entry.tournaments {
                let tournament =
                    TournamentRepository::new(self.store).create(&CreateTournamentRequest {
                        name: tournament_entry.name.clone(),
                        info: tournament_entry.info.clone(),
                        season_id: season.season_id,
                        started_at: tournament_entry.started_at,
                    })?;
                summary.tournaments += 1;

                for game_entry in &tournament_entry.games {
                    self.load_game(game_entry, tournament.tournament_id, &mut summary)?;
                }
            }
        }

        info!(
            "Catalog loaded: {} teams, {} seasons, {} tournaments, {} games, {} performances",
            summary.teams, summary.seasons, summary.tournaments, summary.games, summary.performances
        );
        Ok(summary)
    }

    fn load_game(
        &self,
        entry: &GameEntry,
        tournament_id: uuid::Uuid,
        summary: &mut CatalogSummary,
    ) -> Result<()> {
        let games = GameRepository::new(self.store);
        let game = games.create(&CreateGameRequest {
            name: entry.name.clone(),
            info: entry.info.clone(),
            tournament_id,
            started_at: entry.started_at,
        })?;
        summary.games += 1;

        let teams = TeamRepository::new(self.store);
        for performance in &entry.performances {
            let team = teams.find_unique_by_name(&performance.team)?.ok_or_else(|| {
                ImporterError::ValidationError(format!(
                    "Unknown team '{}' in game '{}'",
                    performance.team, entry.name
                ))
            })?;
            games.record_performance(game.game_id, team.team_id, performance.result)?;
            summary.performances += 1;
        }

        Ok(())
    }
}
