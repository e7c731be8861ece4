//! Trait definitions for the engine's persistence seams

use std::collections::HashMap;
use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Memory, MemoryUnlock, User};
use crate::storage::errors::StorageResult;
use crate::storage::filters::MemoryFilter;

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> StorageResult<bool>;

    /// Clear all data in the store
    async fn clear(&self) -> StorageResult<()>;
}

/// Trait for memory record operations
#[async_trait]
pub trait MemoryStore: BaseStore {
    /// Persist a new memory.
    ///
    /// Rejects a blank title or emotion with a validation error; the draft
    /// layer has usually caught these already, but the store is the last line.
    async fn create_memory(&self, memory: Memory) -> StorageResult<Memory>;

    /// Get a memory by its ID
    async fn get_memory(&self, id: &Uuid) -> StorageResult<Option<Memory>>;

    /// List memories matching an optional filter.
    ///
    /// Results are in (created_at, id) ascending order, stable for a fixed
    /// record set; callers wanting "most recent first" reverse-sort.
    async fn list_memories(
        &self,
        filter: Option<MemoryFilter>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Memory>>;

    /// Count memories matching an optional filter
    async fn count_memories(&self, filter: Option<MemoryFilter>) -> StorageResult<usize>;

    /// Count active memories grouped by exact emotion label.
    ///
    /// Spans every owner and every access type; this feeds global analytics,
    /// not personal discovery.
    async fn count_active_by_emotion(&self) -> StorageResult<HashMap<String, u64>>;

    /// Add exactly 1 to a memory's unlock counter and return the new value.
    ///
    /// The add must be a single atomic read-modify-write: two concurrent
    /// increments on the same memory must both be observed.
    async fn increment_unlock_count(&self, id: &Uuid) -> StorageResult<u32>;

    /// Toggle the active flag, leaving every other field untouched.
    ///
    /// Returns whether the record existed.
    async fn set_active(&self, id: &Uuid, active: bool) -> StorageResult<bool>;

    /// Delete a memory by its ID, returning whether it existed
    async fn delete_memory(&self, id: &Uuid) -> StorageResult<bool>;
}

/// Trait for unlock record operations
#[async_trait]
pub trait UnlockStore: BaseStore {
    /// Persist a new unlock record
    async fn create_unlock(&self, unlock: MemoryUnlock) -> StorageResult<MemoryUnlock>;

    /// List unlocks of a memory in (unlocked_at, id) ascending order
    async fn list_by_memory(&self, memory_id: &Uuid) -> StorageResult<Vec<MemoryUnlock>>;

    /// List unlocks performed by a user in (unlocked_at, id) ascending order
    async fn list_by_unlocker(&self, user_id: &Uuid) -> StorageResult<Vec<MemoryUnlock>>;

    /// Check whether a user has unlocked a memory at least once
    async fn exists_for(&self, memory_id: &Uuid, user_id: &Uuid) -> StorageResult<bool>;

    /// Count unlocks of a memory
    async fn count_by_memory(&self, memory_id: &Uuid) -> StorageResult<u64>;

    /// Count unlocks performed by a user
    async fn count_by_unlocker(&self, user_id: &Uuid) -> StorageResult<u64>;
}

/// Trait for user record operations
#[async_trait]
pub trait UserStore: BaseStore {
    /// Persist a new user.
    ///
    /// Username and email are unique; a collision fails with AlreadyExists.
    async fn create_user(&self, user: User) -> StorageResult<User>;

    /// Get a user by their ID
    async fn get_user(&self, id: &Uuid) -> StorageResult<Option<User>>;

    /// Find a user by exact username
    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Find a user by exact email
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>>;
}
