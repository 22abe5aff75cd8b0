//! Persistence adapter contract
//!
//! The trip service writes through this trait and never sees SQL, so the
//! SQLite store and the in-memory store are interchangeable.

use async_trait::async_trait;
use crate::domain::{DomainError, DomainResult, Entity};

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new row; an existing id is a storage error
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// Every stored entity visible to this adapter
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Overwrite a stored row; `NotFound` when nothing matched
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Idempotent: removing a missing id succeeds
    async fn delete(&self, id: T::Id) -> DomainResult<()>;

    /// Like `find_by_id`, but a miss is `NotFound`
    async fn require(&self, id: T::Id) -> DomainResult<T> {
        let label = id.to_string();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(T::KIND, label))
    }
}
