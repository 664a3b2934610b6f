use std::collections::HashMap;
use std::collections::hash_map::Entry;

use uuid::Uuid;

use crate::dto::standings::{StandingsRow, StandingsScope};
use crate::error::Result;
use crate::repository::{GameRepository, PredictionRepository, PredictorRepository, TournamentRepository};
use crate::store::Store;

/// Builds the leaderboard for a scope: one row per predictor holding at
/// least one active prediction in scope, ordered by the strict comparator
/// on `StandingsRow`.
pub fn standings_for(store: &Store, scope: &StandingsScope) -> Result<Vec<StandingsRow>> {
    let game_ids = games_in_scope(store, scope)?;
    let predictions = PredictionRepository::new(store).list_active_for_games(&game_ids)?;

    let predictors = PredictorRepository::new(store);
    let mut rows: HashMap<Uuid, StandingsRow> = HashMap::new();

    for prediction in predictions {
        let row = match rows.entry(prediction.predictor_id) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let predictor = predictors.find_by_id(prediction.predictor_id)?;
                entry.insert(StandingsRow {
                    predictor_id: predictor.predictor_id,
                    predictor_name: predictor.name,
                    social_id: predictor.social_id,
                    count: 0,
                    total_points: 0.0,
                    winners: 0,
                    runners_up: 0,
                    third_places: 0,
                    prize_winners: 0,
                })
            }
        };

        row.count += 1;
        row.total_points += prediction.total_points;
        row.winners += prediction.winners;
        row.runners_up += prediction.runners_up;
        row.third_places += prediction.third_places;
        row.prize_winners += prediction.prize_winners;
    }

    let mut rows: Vec<StandingsRow> = rows.into_values().collect();
    rows.sort_by(|a, b| a.compare(b));
    Ok(rows)
}

fn games_in_scope(store: &Store, scope: &StandingsScope) -> Result<Vec<Uuid>> {
    let games = GameRepository::new(store);
    Ok(match scope {
        StandingsScope::Game(game_id) => vec![*game_id],
        StandingsScope::Tournament(tournament_id) => games
            .list_for_tournament(*tournament_id, None)?
            .into_iter()
            .map(|g| g.game_id)
            .collect(),
        StandingsScope::Season(season_id) => {
            let mut game_ids = Vec::new();
            for tournament in TournamentRepository::new(store).list_for_season(*season_id, None)? {
                game_ids.extend(
                    games
                        .list_for_tournament(tournament.tournament_id, None)?
                        .into_iter()
                        .map(|g| g.game_id),
                );
            }
            game_ids
        }
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::dto::catalog::{
        CreateGameRequest, CreateSeasonRequest, CreateTeamRequest, CreateTournamentRequest,
    };
    use crate::dto::prediction::{CreatePredictionRequest, CreatePredictorRequest};
    use crate::models::PodiumSlot;
    use crate::repository::TeamRepository;
    use crate::services::scoring;

    struct League {
        store: Store,
        season_id: Uuid,
        tournament_id: Uuid,
        games: Vec<Uuid>,
        team_a: Uuid,
        team_b: Uuid,
    }

    fn league(game_count: usize) -> League {
        let store = Store::new();
        let season = crate::repository::SeasonRepository::new(&store)
            .create(&CreateSeasonRequest {
                name: "2023".to_string(),
                info: None,
                started_at: None,
            })
            .unwrap();
        let tournament = TournamentRepository::new(&store)
            .create(&CreateTournamentRequest {
                name: "Autumn Cup".to_string(),
                info: None,
                season_id: season.season_id,
                started_at: None,
            })
            .unwrap();

        let games = (0..game_count)
            .map(|i| {
                GameRepository::new(&store)
                    .create(&CreateGameRequest {
                        name: format!("Game {}", i + 1),
                        info: None,
                        tournament_id: tournament.tournament_id,
                        started_at: None,
                    })
                    .unwrap()
                    .game_id
            })
            .collect();

        let teams = TeamRepository::new(&store);
        let team_a = teams
            .create(&CreateTeamRequest {
                name: "Alpha".to_string(),
                info: None,
            })
            .unwrap()
            .team_id;
        let team_b = teams
            .create(&CreateTeamRequest {
                name: "Bravo".to_string(),
                info: None,
            })
            .unwrap()
            .team_id;

        League {
            store,
            season_id: season.season_id,
            tournament_id: tournament.tournament_id,
            games,
            team_a,
            team_b,
        }
    }

    fn predictor(league: &League, name: &str) -> Uuid {
        PredictorRepository::new(&league.store)
            .create(&CreatePredictorRequest {
                name: name.to_string(),
                social_id: None,
            })
            .unwrap()
            .predictor_id
    }

    fn predict_winner(league: &League, predictor_id: Uuid, game_id: Uuid, team_id: Uuid, active: bool) {
        let repo = PredictionRepository::new(&league.store);
        let prediction = repo
            .create(&CreatePredictionRequest {
                predictor_id,
                game_id,
                submitted_at: Utc::now(),
                is_active: active,
            })
            .unwrap();
        repo.add_event(prediction.prediction_id, team_id, PodiumSlot::Winner)
            .unwrap();
    }

    #[test]
    fn test_rows_aggregate_across_tournament_games() {
        let league = league(2);
        let anna = predictor(&league, "Anna");

        for game_id in &league.games {
            GameRepository::new(&league.store)
                .record_performance(*game_id, league.team_a, Some(PodiumSlot::Winner))
                .unwrap();
            predict_winner(&league, anna, *game_id, league.team_a, true);
        }
        scoring::score_tournament(&league.store, league.tournament_id).unwrap();

        let rows = standings_for(
            &league.store,
            &StandingsScope::Tournament(league.tournament_id),
        )
        .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].total_points, 8.0);
        assert_eq!(rows[0].winners, 2);
    }

    #[test]
    fn test_ordering_rewards_points_then_efficiency() {
        let league = league(2);
        let anna = predictor(&league, "Anna");
        let boris = predictor(&league, "Boris");

        GameRepository::new(&league.store)
            .record_performance(league.games[0], league.team_a, Some(PodiumSlot::Winner))
            .unwrap();

        // Anna hits the winner in one prediction; Boris spends two
        // predictions for the same total.
        predict_winner(&league, anna, league.games[0], league.team_a, true);
        predict_winner(&league, boris, league.games[0], league.team_a, true);
        predict_winner(&league, boris, league.games[1], league.team_b, true);

        scoring::score_tournament(&league.store, league.tournament_id).unwrap();

        let rows = standings_for(
            &league.store,
            &StandingsScope::Tournament(league.tournament_id),
        )
        .unwrap();

        assert_eq!(rows[0].predictor_name, "Anna");
        assert_eq!(rows[1].predictor_name, "Boris");
        assert_eq!(rows[0].total_points, rows[1].total_points);
    }

    #[test]
    fn test_inactive_predictions_are_excluded() {
        let league = league(1);
        let anna = predictor(&league, "Anna");
        let boris = predictor(&league, "Boris");

        predict_winner(&league, anna, league.games[0], league.team_a, true);
        predict_winner(&league, boris, league.games[0], league.team_a, false);

        let rows = standings_for(&league.store, &StandingsScope::Game(league.games[0])).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].predictor_name, "Anna");
    }

    #[test]
    fn test_game_scope_ignores_other_games() {
        let league = league(2);
        let anna = predictor(&league, "Anna");

        predict_winner(&league, anna, league.games[0], league.team_a, true);
        predict_winner(&league, anna, league.games[1], league.team_b, true);

        let rows = standings_for(&league.store, &StandingsScope::Game(league.games[0])).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 1);

        let rows = standings_for(&league.store, &StandingsScope::Season(league.season_id)).unwrap();
        assert_eq!(rows[0].count, 2);
    }
}
