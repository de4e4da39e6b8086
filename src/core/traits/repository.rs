use async_trait::async_trait;

use crate::core::Result;

/// Outcome of deleting a record that transactions may link to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedDelete {
    Deleted,
    NotFound,
    /// Left in place; holds the number of linked transactions
    Referenced(i64),
}

/// Base repository trait shared by every owned record kind.
///
/// All lookups are scoped by the owning user's id so a caller can never touch
/// another user's rows; a row owned by someone else behaves as absent.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Persist a new entity
    async fn create(&self, entity: &T) -> Result<()>;

    /// Find entity by ID within the owner's partition
    async fn find_by_id(&self, id: &str, user_id: &str) -> Result<Option<T>>;

    /// Overwrite an existing entity; returns false when no row matched
    async fn update(&self, entity: &T) -> Result<bool>;

    /// Delete an entity by ID; returns false when no row matched
    async fn delete(&self, id: &str, user_id: &str) -> Result<bool>;

    /// List all entities owned by a user, in the entity's natural listing order
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<T>>;
}
