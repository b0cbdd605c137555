use std::sync::{Mutex, MutexGuard};

use tracing::warn;

use super::{BirdStore, Result, StoreError};
use crate::models::{Bird, NewBird};

#[derive(Debug, Default)]
struct Records {
    birds: Vec<Bird>,
    last_id: i64,
}

/// Store that keeps records in process memory. Data is lost on drop.
#[derive(Debug)]
pub struct MemoryStore {
    records: Mutex<Option<Records>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            records: Mutex::new(Some(Records::default())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<Records>>> {
        self.records.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl BirdStore for MemoryStore {
    fn list_all(&self) -> Result<Vec<Bird>> {
        let guard = self.lock()?;
        let records = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(records.birds.clone())
    }

    fn list_by_flag(&self, is_female: bool) -> Result<Vec<Bird>> {
        let guard = self.lock()?;
        let records = guard.as_ref().ok_or(StoreError::Closed)?;
        Ok(records
            .birds
            .iter()
            .filter(|b| b.is_female == is_female)
            .cloned()
            .collect())
    }

    fn insert(&self, candidate: &NewBird) -> Result<Bird> {
        let mut guard = self.lock()?;
        let records = guard.as_mut().ok_or(StoreError::Closed)?;
        records.last_id += 1;
        let bird = candidate.clone().with_id(records.last_id);
        records.birds.push(bird.clone());
        Ok(bird)
    }

    fn update(&self, id: i64, replacement: &NewBird) -> Result<()> {
        let mut guard = self.lock()?;
        let records = guard.as_mut().ok_or(StoreError::Closed)?;
        match records.birds.iter_mut().find(|b| b.id == id) {
            Some(bird) => *bird = replacement.clone().with_id(id),
            None => warn!(id, "update matched no bird"),
        }
        Ok(())
    }

    fn close(&self) -> Result<()> {
        self.lock()?.take();
        Ok(())
    }
}
