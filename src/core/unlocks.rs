//! The unlock workflow and its query surface
//!
//! Unlocking converts a discovery into a permanent record and bumps the
//! memory's denormalized counter. Record write and counter update are two
//! independent persistence operations, not a transaction: if the increment
//! fails after the record is written, the inconsistency is logged and the
//! unlock still succeeds.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{EchoDraft, MemoryUnlock};
use crate::storage::traits::{MemoryStore, UnlockStore, UserStore};
use crate::{EchomapError, Result};

/// Records unlock events and maintains the unlock counter
#[derive(Debug, Clone)]
pub struct UnlockEngine {
    memories: Arc<dyn MemoryStore>,
    unlocks: Arc<dyn UnlockStore>,
    users: Arc<dyn UserStore>,
}

impl UnlockEngine {
    /// Create a new unlock engine
    pub fn new(
        memories: Arc<dyn MemoryStore>,
        unlocks: Arc<dyn UnlockStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self { memories, unlocks, users }
    }

    /// Unlock a memory on behalf of a user, recording their echo.
    ///
    /// Repeat unlocks by the same user are allowed: each call writes a new
    /// record and adds 1 to the counter. [`Self::has_unlocked`] exists for
    /// callers that want to gate on a prior unlock themselves.
    pub async fn unlock(
        &self,
        memory_id: Uuid,
        unlocker_id: Uuid,
        echo: EchoDraft,
    ) -> Result<MemoryUnlock> {
        let memory = self
            .memories
            .get_memory(&memory_id)
            .await?
            .ok_or_else(|| EchomapError::NotFound(format!("memory '{memory_id}'")))?;

        let unlocker = self
            .users
            .get_user(&unlocker_id)
            .await?
            .ok_or_else(|| EchomapError::NotFound(format!("user '{unlocker_id}'")))?;

        let unlock = self
            .unlocks
            .create_unlock(MemoryUnlock::new(memory.id, unlocker.id, echo))
            .await?;

        // Best-effort: the unlock record is already durable and is not
        // rolled back if the counter update fails.
        match self.memories.increment_unlock_count(&memory_id).await {
            Ok(count) => {
                tracing::debug!(
                    memory_id = %memory_id,
                    unlocked_by = %unlocker_id,
                    unlock_count = count,
                    "memory unlocked"
                );
            }
            Err(err) => {
                tracing::warn!(
                    memory_id = %memory_id,
                    unlock_id = %unlock.id,
                    error = %err,
                    "unlock recorded but counter increment failed"
                );
            }
        }

        Ok(unlock)
    }

    /// All unlocks of a memory, oldest first
    pub async fn list_for_memory(&self, memory_id: Uuid) -> Result<Vec<MemoryUnlock>> {
        Ok(self.unlocks.list_by_memory(&memory_id).await?)
    }

    /// All unlocks performed by a user, oldest first
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<MemoryUnlock>> {
        Ok(self.unlocks.list_by_unlocker(&user_id).await?)
    }

    /// Whether a user has unlocked a memory at least once.
    ///
    /// Not consulted by [`Self::unlock`] itself.
    pub async fn has_unlocked(&self, memory_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.unlocks.exists_for(&memory_id, &user_id).await?)
    }

    /// Number of unlock records referencing a memory
    pub async fn count_for_memory(&self, memory_id: Uuid) -> Result<u64> {
        Ok(self.unlocks.count_by_memory(&memory_id).await?)
    }

    /// Number of unlocks a user has performed
    pub async fn count_by_user(&self, user_id: Uuid) -> Result<u64> {
        Ok(self.unlocks.count_by_unlocker(&user_id).await?)
    }
}
