//! Unlock record operations for the in-memory backend

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::MemoryUnlock;
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::in_memory::InMemoryStore;
use crate::storage::traits::UnlockStore;

fn sorted(mut unlocks: Vec<MemoryUnlock>) -> Vec<MemoryUnlock> {
    unlocks.sort_by(|a, b| a.unlocked_at.cmp(&b.unlocked_at).then(a.id.cmp(&b.id)));
    unlocks
}

#[async_trait]
impl UnlockStore for InMemoryStore {
    async fn create_unlock(&self, unlock: MemoryUnlock) -> StorageResult<MemoryUnlock> {
        if self.unlocks.contains_key(&unlock.id) {
            return Err(StorageError::AlreadyExists(format!("unlock '{}'", unlock.id)));
        }

        self.unlocks.insert(unlock.id, unlock.clone());
        Ok(unlock)
    }

    async fn list_by_memory(&self, memory_id: &Uuid) -> StorageResult<Vec<MemoryUnlock>> {
        let unlocks = self
            .unlocks
            .iter()
            .filter(|entry| entry.value().memory_id == *memory_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(sorted(unlocks))
    }

    async fn list_by_unlocker(&self, user_id: &Uuid) -> StorageResult<Vec<MemoryUnlock>> {
        let unlocks = self
            .unlocks
            .iter()
            .filter(|entry| entry.value().unlocked_by == *user_id)
            .map(|entry| entry.value().clone())
            .collect();
        Ok(sorted(unlocks))
    }

    async fn exists_for(&self, memory_id: &Uuid, user_id: &Uuid) -> StorageResult<bool> {
        Ok(self.unlocks.iter().any(|entry| {
            entry.value().memory_id == *memory_id && entry.value().unlocked_by == *user_id
        }))
    }

    async fn count_by_memory(&self, memory_id: &Uuid) -> StorageResult<u64> {
        Ok(self
            .unlocks
            .iter()
            .filter(|entry| entry.value().memory_id == *memory_id)
            .count() as u64)
    }

    async fn count_by_unlocker(&self, user_id: &Uuid) -> StorageResult<u64> {
        Ok(self
            .unlocks
            .iter()
            .filter(|entry| entry.value().unlocked_by == *user_id)
            .count() as u64)
    }
}
