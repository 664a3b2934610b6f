use uuid::Uuid;
use validator::Validate;

use crate::dto::prediction::CreatePredictorRequest;
use crate::error::{Result, StorageError};
use crate::models::Predictor;
use crate::store::Store;

/// Outcome of a case-insensitive predictor name lookup. The ambiguous case
/// is surfaced as such: two predictors sharing a name are never merged and
/// never resolved to an arbitrary one.
#[derive(Debug)]
pub enum NameMatch {
    None,
    Unique(Predictor),
    Ambiguous,
}

pub struct PredictorRepository<'a> {
    store: &'a Store,
}

impl<'a> PredictorRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn create(&self, req: &CreatePredictorRequest) -> Result<Predictor> {
        req.validate()
            .map_err(|e| StorageError::ConstraintViolation(e.to_string()))?;

        if let Some(social_id) = req.social_id
            && self.store.predictors.any(|p| p.social_id == Some(social_id))?
        {
            return Err(StorageError::ConstraintViolation(
                "Social id already registered".to_string(),
            ));
        }

        let predictor = Predictor::new(req.name.clone(), req.social_id);
        self.store
            .predictors
            .insert(predictor.predictor_id, predictor.clone())?;

        Ok(predictor)
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Predictor> {
        self.store.predictors.get(id)?.ok_or(StorageError::NotFound)
    }

    pub fn find_by_social_id(&self, social_id: i64) -> Result<Option<Predictor>> {
        let matches = self
            .store
            .predictors
            .select(|p| p.social_id == Some(social_id))?;
        Ok(matches.into_iter().next())
    }

    pub fn match_by_name(&self, name: &str) -> Result<NameMatch> {
        let wanted = name.trim().to_lowercase();
        let mut matches = self
            .store
            .predictors
            .select(|p| p.name.to_lowercase() == wanted)?
            .into_iter();
        Ok(match (matches.next(), matches.next()) {
            (None, _) => NameMatch::None,
            (Some(predictor), None) => NameMatch::Unique(predictor),
            _ => NameMatch::Ambiguous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(store: &Store, name: &str, social_id: Option<i64>) -> Predictor {
        PredictorRepository::new(store)
            .create(&CreatePredictorRequest {
                name: name.to_string(),
                social_id,
            })
            .unwrap()
    }

    #[test]
    fn test_match_by_name_unique() {
        let store = Store::new();
        let predictor = create(&store, "Alice", None);

        match PredictorRepository::new(&store).match_by_name("ALICE").unwrap() {
            NameMatch::Unique(found) => assert_eq!(found.predictor_id, predictor.predictor_id),
            other => panic!("expected unique match, got {:?}", other),
        }
    }

    #[test]
    fn test_match_by_name_ambiguous() {
        let store = Store::new();
        create(&store, "Alice", None);
        create(&store, "alice", Some(77));

        assert!(matches!(
            PredictorRepository::new(&store).match_by_name("Alice").unwrap(),
            NameMatch::Ambiguous
        ));
    }

    #[test]
    fn test_duplicate_social_id_rejected() {
        let store = Store::new();
        create(&store, "Alice", Some(77));

        let err = PredictorRepository::new(&store)
            .create(&CreatePredictorRequest {
                name: "Bob".to_string(),
                social_id: Some(77),
            })
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }
}
