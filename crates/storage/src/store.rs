use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard};

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{
    Game, Performance, Prediction, PredictionEvent, Predictor, RawPrediction, Season, Team,
    Tournament,
};

/// In-process queryable store backing the repositories.
///
/// One table per entity, each guarded by its own lock so that a
/// read-modify-write on a single record is atomic. Iteration order of a
/// table is unspecified; repositories sort every listing they return.
#[derive(Default)]
pub struct Store {
    pub(crate) seasons: Table<Season>,
    pub(crate) tournaments: Table<Tournament>,
    pub(crate) teams: Table<Team>,
    pub(crate) games: Table<Game>,
    pub(crate) performances: Table<Performance>,
    pub(crate) predictors: Table<Predictor>,
    pub(crate) predictions: Table<Prediction>,
    pub(crate) prediction_events: Table<PredictionEvent>,
    pub(crate) raw_predictions: Table<RawPrediction>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }
}

pub(crate) struct Table<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T: Clone> Table<T> {
    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, T>>> {
        self.rows.read().map_err(|_| StorageError::LockPoisoned)
    }

    pub(crate) fn get(&self, id: Uuid) -> Result<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    pub(crate) fn insert(&self, id: Uuid, row: T) -> Result<()> {
        self.rows
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .insert(id, row);
        Ok(())
    }

    /// Atomically mutates the row in place. `NotFound` if the id is absent.
    pub(crate) fn update_with(&self, id: Uuid, f: impl FnOnce(&mut T)) -> Result<()> {
        let mut rows = self.rows.write().map_err(|_| StorageError::LockPoisoned)?;
        let row = rows.get_mut(&id).ok_or(StorageError::NotFound)?;
        f(row);
        Ok(())
    }

    pub(crate) fn remove(&self, id: Uuid) -> Result<()> {
        self.rows
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    pub(crate) fn retain(&self, keep: impl Fn(&T) -> bool) -> Result<()> {
        self.rows
            .write()
            .map_err(|_| StorageError::LockPoisoned)?
            .retain(|_, row| keep(row));
        Ok(())
    }

    pub(crate) fn select(&self, pred: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        Ok(self
            .read()?
            .values()
            .filter(|row| pred(row))
            .cloned()
            .collect())
    }

    pub(crate) fn any(&self, pred: impl Fn(&T) -> bool) -> Result<bool> {
        Ok(self.read()?.values().any(|row| pred(row)))
    }
}
