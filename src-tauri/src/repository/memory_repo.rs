//! In-Memory Trip Repository
//!
//! Test double with the same contract as the SQLite store. Writes can be
//! made to fail on demand to exercise error handling.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, Entity, Trip};
use super::traits::Repository;

#[derive(Default)]
pub struct MemoryTripRepository {
    trips: Mutex<HashMap<String, Trip>>,
    fail_writes: AtomicBool,
}

impl MemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> DomainResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Storage("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<Trip> for MemoryTripRepository {
    async fn create(&self, entity: &Trip) -> DomainResult<Trip> {
        self.check_writable()?;
        let mut trips = self.trips.lock().await;
        if trips.contains_key(&entity.id) {
            return Err(DomainError::Storage(format!("Trip '{}' already stored", entity.id)));
        }
        trips.insert(entity.id.clone(), entity.clone());
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: String) -> DomainResult<Option<Trip>> {
        Ok(self.trips.lock().await.get(&id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Trip>> {
        let mut trips: Vec<Trip> = self.trips.lock().await.values().cloned().collect();
        trips.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.title.cmp(&b.title)));
        Ok(trips)
    }

    async fn update(&self, entity: &Trip) -> DomainResult<Trip> {
        self.check_writable()?;
        let mut trips = self.trips.lock().await;
        match trips.get_mut(&entity.id) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity.clone())
            }
            None => Err(DomainError::not_found(Trip::KIND, entity.id.clone())),
        }
    }

    async fn delete(&self, id: String) -> DomainResult<()> {
        self.check_writable()?;
        self.trips.lock().await.remove(&id);
        Ok(())
    }
}
