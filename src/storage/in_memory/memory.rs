//! Memory record operations for the in-memory backend

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::Memory;
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::filters::MemoryFilter;
use crate::storage::in_memory::InMemoryStore;
use crate::storage::traits::MemoryStore;

#[async_trait]
impl MemoryStore for InMemoryStore {
    async fn create_memory(&self, memory: Memory) -> StorageResult<Memory> {
        if memory.title.trim().is_empty() {
            return Err(StorageError::Validation("Title is required".to_string()));
        }
        if memory.emotion.trim().is_empty() {
            return Err(StorageError::Validation("Emotion is required".to_string()));
        }
        if self.memories.contains_key(&memory.id) {
            return Err(StorageError::AlreadyExists(format!("memory '{}'", memory.id)));
        }

        self.memories.insert(memory.id, memory.clone());
        Ok(memory)
    }

    async fn get_memory(&self, id: &Uuid) -> StorageResult<Option<Memory>> {
        Ok(self.memories.get(id).map(|entry| entry.value().clone()))
    }

    async fn list_memories(
        &self,
        filter: Option<MemoryFilter>,
        limit: Option<usize>,
    ) -> StorageResult<Vec<Memory>> {
        let filter = filter.unwrap_or_default();
        let mut results: Vec<Memory> = self
            .memories
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        // Map iteration order is arbitrary; sort for a stable result set.
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        if let Some(limit) = limit {
            results.truncate(limit);
        }

        Ok(results)
    }

    async fn count_memories(&self, filter: Option<MemoryFilter>) -> StorageResult<usize> {
        let filter = filter.unwrap_or_default();
        Ok(self
            .memories
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count())
    }

    async fn count_active_by_emotion(&self) -> StorageResult<HashMap<String, u64>> {
        let mut counts = HashMap::new();
        for entry in self.memories.iter() {
            let memory = entry.value();
            if memory.active {
                *counts.entry(memory.emotion.clone()).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn increment_unlock_count(&self, id: &Uuid) -> StorageResult<u32> {
        // get_mut holds the shard write lock for the whole read-modify-write.
        match self.memories.get_mut(id) {
            Some(mut memory) => {
                memory.unlock_count += 1;
                Ok(memory.unlock_count)
            }
            None => Err(StorageError::NotFound(format!("memory '{id}'"))),
        }
    }

    async fn set_active(&self, id: &Uuid, active: bool) -> StorageResult<bool> {
        match self.memories.get_mut(id) {
            Some(mut memory) => {
                memory.active = active;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_memory(&self, id: &Uuid) -> StorageResult<bool> {
        Ok(self.memories.remove(id).is_some())
    }
}
