//! Generic repository contract implemented by every entity module.

use async_trait::async_trait;

use crate::DbError;

/// Pass-through persistence operations for one entity type.
///
/// Identities are database-generated `i64`s. `save` inserts when the entity
/// carries no identity and updates the existing row otherwise.
#[async_trait]
pub trait Repository<E>: Send + Sync
where
    E: Send + Sync + 'static,
{
    /// Insert or update `entity`, returning it as stored.
    async fn save(&self, entity: E) -> Result<E, DbError>;

    /// All entities in ascending identity order.
    async fn find_all(&self) -> Result<Vec<E>, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<E>, DbError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, DbError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Delete by identity. Deleting a missing identity is not an error.
    async fn delete_by_id(&self, id: i64) -> Result<(), DbError>;

    async fn count(&self) -> Result<i64, DbError>;
}
