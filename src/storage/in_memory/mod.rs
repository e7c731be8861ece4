//! In-memory reference backend
//!
//! A process-local store backed by concurrent hash maps, one per record type.
//! It is the backend used by tests and by embedded deployments that do not
//! need durability; anything heavier plugs in behind the same traits.
//!
//! Per-key mutation goes through the map's exclusive guard, so the unlock
//! counter increment is a single atomic add even under concurrent unlocks.

mod memory;
mod unlock;
mod user;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{Memory, MemoryUnlock, User};
use crate::storage::errors::StorageResult;
use crate::storage::traits::BaseStore;

/// In-memory store implementing all three record stores
#[derive(Debug, Default)]
pub struct InMemoryStore {
    memories: DashMap<Uuid, Memory>,
    unlocks: DashMap<Uuid, MemoryUnlock>,
    users: DashMap<Uuid, User>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseStore for InMemoryStore {
    async fn health_check(&self) -> StorageResult<bool> {
        Ok(true)
    }

    async fn clear(&self) -> StorageResult<()> {
        self.memories.clear();
        self.unlocks.clear();
        self.users.clear();
        Ok(())
    }
}
