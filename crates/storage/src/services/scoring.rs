use uuid::Uuid;

use crate::error::Result;
use crate::models::{PodiumSlot, Prediction, PredictionEvent, TEAM_PLACED_POINTS};
use crate::repository::{GameRepository, PredictionRepository, TournamentRepository};
use crate::store::Store;

/// A resolved podium slot: the team that finished there and what an exact
/// call on it is worth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedSlot {
    pub team_id: Uuid,
    pub points: f64,
}

/// The derived podium of a game. An empty slot means the outcome for that
/// position has not been recorded; that is a normal state, not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PodiumRanking {
    pub winner: Option<RankedSlot>,
    pub runner_up: Option<RankedSlot>,
    pub third_place: Option<RankedSlot>,
}

impl PodiumRanking {
    pub fn slot(&self, slot: PodiumSlot) -> Option<RankedSlot> {
        match slot {
            PodiumSlot::Winner => self.winner,
            PodiumSlot::RunnerUp => self.runner_up,
            PodiumSlot::ThirdPlace => self.third_place,
        }
    }

    fn set(&mut self, slot: PodiumSlot, ranked: RankedSlot) {
        match slot {
            PodiumSlot::Winner => self.winner = Some(ranked),
            PodiumSlot::RunnerUp => self.runner_up = Some(ranked),
            PodiumSlot::ThirdPlace => self.third_place = Some(ranked),
        }
    }

    /// Filled slots in rank order.
    pub fn filled(&self) -> impl Iterator<Item = (PodiumSlot, RankedSlot)> + '_ {
        PodiumSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slot(slot).map(|ranked| (slot, ranked)))
    }
}

/// A fully recomputed score for one prediction: per-event points plus the
/// derived aggregates. Only this module constructs score sheets, which is
/// what keeps every write of the cached fields downstream of the scoring
/// algorithm.
pub struct ScoreSheet {
    pub(crate) event_points: Vec<(Uuid, f64)>,
    pub(crate) total_points: f64,
    pub(crate) winners: i32,
    pub(crate) runners_up: i32,
    pub(crate) third_places: i32,
    pub(crate) prize_winners: i32,
}

impl ScoreSheet {
    fn zeroed(events: &[PredictionEvent]) -> Self {
        Self {
            event_points: events.iter().map(|e| (e.event_id, 0.0)).collect(),
            total_points: 0.0,
            winners: 0,
            runners_up: 0,
            third_places: 0,
            prize_winners: 0,
        }
    }
}

/// Derives the podium for a game from its recorded performances.
///
/// Each slot resolves to the single performance carrying that result. A
/// slot claimed by more than one performance is a data-entry defect
/// upstream; the slot is left empty rather than resolved arbitrarily.
pub fn rank_podium(store: &Store, game_id: Uuid) -> Result<PodiumRanking> {
    let performances = GameRepository::new(store).podium_performances(game_id)?;

    let mut ranking = PodiumRanking::default();
    for slot in PodiumSlot::ALL {
        let mut claimants = performances.iter().filter(|p| p.result == Some(slot));
        if let (Some(performance), None) = (claimants.next(), claimants.next()) {
            ranking.set(
                slot,
                RankedSlot {
                    team_id: performance.team_id,
                    points: slot.exact_points(),
                },
            );
        }
    }

    Ok(ranking)
}

/// Rescores one prediction against the game's podium.
///
/// Pass a precomputed `ranking` when scoring many predictions of the same
/// game; `None` derives it from the store. Scoring is idempotent: every
/// point field is recomputed from scratch, so a rerun with unchanged
/// outcome data is a no-op.
pub fn score_prediction(
    store: &Store,
    prediction_id: Uuid,
    ranking: Option<&PodiumRanking>,
) -> Result<()> {
    let repo = PredictionRepository::new(store);
    let prediction = repo.find_by_id(prediction_id)?;

    let derived;
    let ranking = match ranking {
        Some(ranking) => ranking,
        None => {
            derived = rank_podium(store, prediction.game_id)?;
            &derived
        }
    };

    let events = repo.events_for_prediction(prediction_id)?;
    let sheet = compute_score_sheet(&events, ranking);
    repo.apply_score(prediction_id, &sheet)
}

/// Clears all derived points of one prediction without consulting outcomes.
pub fn reset_prediction(store: &Store, prediction_id: Uuid) -> Result<()> {
    let repo = PredictionRepository::new(store);
    repo.find_by_id(prediction_id)?;
    let events = repo.events_for_prediction(prediction_id)?;
    repo.apply_score(prediction_id, &ScoreSheet::zeroed(&events))
}

/// Recomputes every active prediction of a game. The podium is ranked once
/// and shared across the fan-out.
pub fn score_game(store: &Store, game_id: Uuid) -> Result<()> {
    let ranking = rank_podium(store, game_id)?;
    for prediction in active_predictions(store, game_id)? {
        score_prediction(store, prediction.prediction_id, Some(&ranking))?;
    }
    Ok(())
}

pub fn reset_game(store: &Store, game_id: Uuid) -> Result<()> {
    for prediction in active_predictions(store, game_id)? {
        reset_prediction(store, prediction.prediction_id)?;
    }
    Ok(())
}

pub fn score_tournament(store: &Store, tournament_id: Uuid) -> Result<()> {
    for game in GameRepository::new(store).list_for_tournament(tournament_id, None)? {
        score_game(store, game.game_id)?;
    }
    Ok(())
}

pub fn reset_tournament(store: &Store, tournament_id: Uuid) -> Result<()> {
    for game in GameRepository::new(store).list_for_tournament(tournament_id, None)? {
        reset_game(store, game.game_id)?;
    }
    Ok(())
}

pub fn score_season(store: &Store, season_id: Uuid) -> Result<()> {
    for tournament in TournamentRepository::new(store).list_for_season(season_id, None)? {
        score_tournament(store, tournament.tournament_id)?;
    }
    Ok(())
}

pub fn reset_season(store: &Store, season_id: Uuid) -> Result<()> {
    for tournament in TournamentRepository::new(store).list_for_season(season_id, None)? {
        reset_tournament(store, tournament.tournament_id)?;
    }
    Ok(())
}

fn active_predictions(store: &Store, game_id: Uuid) -> Result<Vec<Prediction>> {
    PredictionRepository::new(store).list_for_game(game_id, Some(true))
}

/// The scoring pass itself, over events in their stable slot order.
///
/// Exact hits are claimed first across all slots; the remaining filled
/// slots then award the partial podium bonus to the first still-unscored
/// event guessing that team. A team never earns credit twice within one
/// prediction.
fn compute_score_sheet(events: &[PredictionEvent], ranking: &PodiumRanking) -> ScoreSheet {
    let mut points = vec![0.0_f64; events.len()];
    let mut sheet = ScoreSheet::zeroed(events);

    let mut open_slots = Vec::new();
    for (slot, ranked) in ranking.filled() {
        let exact = events
            .iter()
            .position(|e| e.result == slot && e.team_id == ranked.team_id);
        match exact {
            Some(idx) => {
                points[idx] = ranked.points;
                match slot {
                    PodiumSlot::Winner => sheet.winners += 1,
                    PodiumSlot::RunnerUp => sheet.runners_up += 1,
                    PodiumSlot::ThirdPlace => sheet.third_places += 1,
                }
            }
            None => open_slots.push(ranked),
        }
    }

    for ranked in open_slots {
        let partial = events
            .iter()
            .enumerate()
            .find(|(idx, e)| e.team_id == ranked.team_id && points[*idx] == 0.0)
            .map(|(idx, _)| idx);
        if let Some(idx) = partial {
            points[idx] = TEAM_PLACED_POINTS;
            sheet.prize_winners += 1;
        }
    }

    sheet.total_points = points.iter().sum();
    sheet.event_points = events
        .iter()
        .zip(&points)
        .map(|(e, p)| (e.event_id, *p))
        .collect();
    sheet
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    use crate::dto::catalog::{
        CreateGameRequest, CreateSeasonRequest, CreateTeamRequest, CreateTournamentRequest,
    };
    use crate::dto::prediction::{CreatePredictionRequest, CreatePredictorRequest};
    use crate::repository::{PredictorRepository, TeamRepository};

    struct Fixture {
        store: Store,
        season_id: Uuid,
        tournament_id: Uuid,
        game_id: Uuid,
        team_a: Uuid,
        team_b: Uuid,
        team_c: Uuid,
        predictor_id: Uuid,
    }

    fn fixture() -> Fixture {
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
                started_at: Some(Utc::now() + Duration::hours(1)),
            })
            .unwrap();

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
        let team_c = teams
            .create(&CreateTeamRequest {
                name: "Charlie".to_string(),
                info: None,
            })
            .unwrap()
            .team_id;

        let predictor_id = PredictorRepository::new(&store)
            .create(&CreatePredictorRequest {
                name: "Dana".to_string(),
                social_id: None,
            })
            .unwrap()
            .predictor_id;

        Fixture {
            store,
            season_id: season.season_id,
            tournament_id: tournament.tournament_id,
            game_id: game.game_id,
            team_a,
            team_b,
            team_c,
            predictor_id,
        }
    }

    fn predict(fx: &Fixture, guesses: &[(PodiumSlot, Uuid)]) -> Uuid {
        let repo = PredictionRepository::new(&fx.store);
        let prediction = repo
            .create(&CreatePredictionRequest {
                predictor_id: fx.predictor_id,
                game_id: fx.game_id,
                submitted_at: Utc::now(),
                is_active: true,
            })
            .unwrap();
        for (slot, team_id) in guesses {
            repo.add_event(prediction.prediction_id, *team_id, *slot).unwrap();
        }
        prediction.prediction_id
    }

    fn record(fx: &Fixture, team_id: Uuid, result: PodiumSlot) {
        GameRepository::new(&fx.store)
            .record_performance(fx.game_id, team_id, Some(result))
            .unwrap();
    }

    fn event_points(fx: &Fixture, prediction_id: Uuid) -> Vec<f64> {
        PredictionRepository::new(&fx.store)
            .events_for_prediction(prediction_id)
            .unwrap()
            .iter()
            .map(|e| e.points)
            .collect()
    }

    #[test]
    fn test_exact_and_partial_hits() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);
        record(&fx, fx.team_b, PodiumSlot::RunnerUp);

        let prediction_id = predict(
            &fx,
            &[
                (PodiumSlot::Winner, fx.team_a),
                (PodiumSlot::RunnerUp, fx.team_c),
                (PodiumSlot::ThirdPlace, fx.team_b),
            ],
        );

        score_prediction(&fx.store, prediction_id, None).unwrap();

        assert_eq!(event_points(&fx, prediction_id), vec![4.0, 0.0, 2.0]);

        let prediction = PredictionRepository::new(&fx.store)
            .find_by_id(prediction_id)
            .unwrap();
        assert_eq!(prediction.total_points, 6.0);
        assert_eq!(prediction.winners, 1);
        assert_eq!(prediction.runners_up, 0);
        assert_eq!(prediction.third_places, 0);
        assert_eq!(prediction.prize_winners, 1);
    }

    #[test]
    fn test_total_matches_event_sum() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);
        record(&fx, fx.team_b, PodiumSlot::ThirdPlace);

        let prediction_id = predict(
            &fx,
            &[
                (PodiumSlot::Winner, fx.team_b),
                (PodiumSlot::RunnerUp, fx.team_a),
            ],
        );

        score_prediction(&fx.store, prediction_id, None).unwrap();

        let prediction = PredictionRepository::new(&fx.store)
            .find_by_id(prediction_id)
            .unwrap();
        let sum: f64 = event_points(&fx, prediction_id).iter().sum();
        assert_eq!(prediction.total_points, sum);
        assert_eq!(prediction.prize_winners, 2);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);
        record(&fx, fx.team_b, PodiumSlot::RunnerUp);
        record(&fx, fx.team_c, PodiumSlot::ThirdPlace);

        let prediction_id = predict(
            &fx,
            &[
                (PodiumSlot::Winner, fx.team_a),
                (PodiumSlot::RunnerUp, fx.team_c),
                (PodiumSlot::ThirdPlace, fx.team_b),
            ],
        );

        score_game(&fx.store, fx.game_id).unwrap();
        let repo = PredictionRepository::new(&fx.store);
        let first = repo.find_by_id(prediction_id).unwrap();
        let first_points = event_points(&fx, prediction_id);

        score_game(&fx.store, fx.game_id).unwrap();
        let second = repo.find_by_id(prediction_id).unwrap();

        assert_eq!(first.total_points, second.total_points);
        assert_eq!(first.winners, second.winners);
        assert_eq!(first.runners_up, second.runners_up);
        assert_eq!(first.third_places, second.third_places);
        assert_eq!(first.prize_winners, second.prize_winners);
        assert_eq!(first_points, event_points(&fx, prediction_id));
    }

    #[test]
    fn test_reset_zeroes_everything() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);

        let prediction_id = predict(&fx, &[(PodiumSlot::Winner, fx.team_a)]);
        score_game(&fx.store, fx.game_id).unwrap();

        reset_game(&fx.store, fx.game_id).unwrap();

        let prediction = PredictionRepository::new(&fx.store)
            .find_by_id(prediction_id)
            .unwrap();
        assert_eq!(prediction.total_points, 0.0);
        assert_eq!(prediction.winners, 0);
        assert_eq!(prediction.prize_winners, 0);
        assert_eq!(event_points(&fx, prediction_id), vec![0.0]);
    }

    #[test]
    fn test_same_team_credited_once() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);

        let prediction_id = predict(
            &fx,
            &[
                (PodiumSlot::RunnerUp, fx.team_a),
                (PodiumSlot::ThirdPlace, fx.team_a),
            ],
        );

        score_prediction(&fx.store, prediction_id, None).unwrap();

        assert_eq!(event_points(&fx, prediction_id), vec![2.0, 0.0]);
        let prediction = PredictionRepository::new(&fx.store)
            .find_by_id(prediction_id)
            .unwrap();
        assert_eq!(prediction.total_points, 2.0);
        assert_eq!(prediction.prize_winners, 1);
    }

    #[test]
    fn test_pending_game_scores_to_zero() {
        let fx = fixture();

        let prediction_id = predict(
            &fx,
            &[
                (PodiumSlot::Winner, fx.team_a),
                (PodiumSlot::RunnerUp, fx.team_b),
            ],
        );

        score_prediction(&fx.store, prediction_id, None).unwrap();

        assert_eq!(event_points(&fx, prediction_id), vec![0.0, 0.0]);
        let prediction = PredictionRepository::new(&fx.store)
            .find_by_id(prediction_id)
            .unwrap();
        assert_eq!(prediction.total_points, 0.0);
    }

    #[test]
    fn test_duplicated_slot_is_left_empty() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);
        record(&fx, fx.team_b, PodiumSlot::Winner);
        record(&fx, fx.team_c, PodiumSlot::RunnerUp);

        let ranking = rank_podium(&fx.store, fx.game_id).unwrap();
        assert!(ranking.winner.is_none());
        assert_eq!(
            ranking.runner_up,
            Some(RankedSlot {
                team_id: fx.team_c,
                points: 3.0
            })
        );
    }

    #[test]
    fn test_inactive_predictions_are_skipped() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);

        let repo = PredictionRepository::new(&fx.store);
        let late = repo
            .create(&CreatePredictionRequest {
                predictor_id: fx.predictor_id,
                game_id: fx.game_id,
                submitted_at: Utc::now(),
                is_active: false,
            })
            .unwrap();
        repo.add_event(late.prediction_id, fx.team_a, PodiumSlot::Winner)
            .unwrap();

        score_game(&fx.store, fx.game_id).unwrap();

        let prediction = repo.find_by_id(late.prediction_id).unwrap();
        assert_eq!(prediction.total_points, 0.0);
        assert_eq!(event_points(&fx, late.prediction_id), vec![0.0]);
    }

    #[test]
    fn test_season_cascade_reaches_every_game() {
        let fx = fixture();
        record(&fx, fx.team_a, PodiumSlot::Winner);

        let second_game = GameRepository::new(&fx.store)
            .create(&CreateGameRequest {
                name: "Semifinal".to_string(),
                info: None,
                tournament_id: fx.tournament_id,
                started_at: None,
            })
            .unwrap();
        GameRepository::new(&fx.store)
            .record_performance(second_game.game_id, fx.team_b, Some(PodiumSlot::Winner))
            .unwrap();

        let first = predict(&fx, &[(PodiumSlot::Winner, fx.team_a)]);
        let repo = PredictionRepository::new(&fx.store);
        let second = repo
            .create(&CreatePredictionRequest {
                predictor_id: fx.predictor_id,
                game_id: second_game.game_id,
                submitted_at: Utc::now(),
                is_active: true,
            })
            .unwrap();
        repo.add_event(second.prediction_id, fx.team_b, PodiumSlot::Winner)
            .unwrap();

        score_season(&fx.store, fx.season_id).unwrap();

        assert_eq!(repo.find_by_id(first).unwrap().total_points, 4.0);
        assert_eq!(repo.find_by_id(second.prediction_id).unwrap().total_points, 4.0);

        reset_season(&fx.store, fx.season_id).unwrap();

        assert_eq!(repo.find_by_id(first).unwrap().total_points, 0.0);
        assert_eq!(repo.find_by_id(second.prediction_id).unwrap().total_points, 0.0);
        assert_eq!(repo.find_by_id(first).unwrap().winners, 0);
    }
}
