//! Core memory operations
//!
//! Creation, retrieval, and owner-side mutation of memory records. Discovery
//! and unlocking live in their own components.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::{Memory, MemoryDraft};
use crate::storage::filters::MemoryFilter;
use crate::storage::traits::MemoryStore;
use crate::{EchomapError, Result};

/// Memory CRUD handler
#[derive(Debug, Clone)]
pub struct MemoryOperations {
    storage: Arc<dyn MemoryStore>,
}

impl MemoryOperations {
    /// Create a new memory operations handler
    pub fn new(storage: Arc<dyn MemoryStore>) -> Self {
        Self { storage }
    }

    /// Validate a draft and persist it as a new memory owned by `owner_id`.
    ///
    /// The id and creation timestamp are assigned here; the draft cannot
    /// carry either.
    pub async fn create_memory(&self, owner_id: Uuid, draft: MemoryDraft) -> Result<Memory> {
        let title = match draft.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err(EchomapError::Validation("Title is required".to_string())),
        };
        let emotion = match draft.emotion {
            Some(emotion) if !emotion.trim().is_empty() => emotion,
            _ => return Err(EchomapError::Validation("Emotion is required".to_string())),
        };
        let latitude = draft
            .latitude
            .ok_or_else(|| EchomapError::Validation("Latitude is required".to_string()))?;
        let longitude = draft
            .longitude
            .ok_or_else(|| EchomapError::Validation("Longitude is required".to_string()))?;

        let mut memory = Memory::new(owner_id, title, emotion, latitude, longitude);
        memory.description = draft.description;
        memory.content = draft.content;
        memory.audio_data = draft.audio_data;
        memory.audio_url = draft.audio_url;
        memory.location_name = draft.location_name;
        memory.emotion_confidence = draft.emotion_confidence.unwrap_or(0.0);
        memory.duration_secs = draft.duration_secs.unwrap_or(0);
        memory.access_type = draft.access_type.unwrap_or_default();
        memory.active = draft.active.unwrap_or(true);

        let created = self.storage.create_memory(memory).await?;
        tracing::debug!(memory_id = %created.id, owner_id = %owner_id, emotion = %created.emotion, "memory created");
        Ok(created)
    }

    /// Retrieve a memory, failing when the id is unknown
    pub async fn get_memory(&self, id: Uuid) -> Result<Memory> {
        self.storage
            .get_memory(&id)
            .await?
            .ok_or_else(|| EchomapError::NotFound(format!("memory '{id}'")))
    }

    /// List a user's own memories, oldest first
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Memory>> {
        let filter = MemoryFilter { owner: Some(owner_id), ..Default::default() };
        Ok(self.storage.list_memories(Some(filter), None).await?)
    }

    /// List a user's own memories, most recent first
    pub async fn list_owned_recent(&self, owner_id: Uuid) -> Result<Vec<Memory>> {
        let mut memories = self.list_owned(owner_id).await?;
        memories.reverse();
        Ok(memories)
    }

    /// Hide a memory from every discovery surface.
    ///
    /// Returns whether the memory existed; a missing id is not an error.
    pub async fn deactivate_memory(&self, id: Uuid) -> Result<bool> {
        let found = self.storage.set_active(&id, false).await?;
        if found {
            tracing::debug!(memory_id = %id, "memory deactivated");
        }
        Ok(found)
    }

    /// Make a previously deactivated memory discoverable again
    pub async fn activate_memory(&self, id: Uuid) -> Result<bool> {
        let found = self.storage.set_active(&id, true).await?;
        if found {
            tracing::debug!(memory_id = %id, "memory activated");
        }
        Ok(found)
    }

    /// Delete a memory record, returning whether it existed.
    ///
    /// Unlock records referencing it are left in place.
    pub async fn delete_memory(&self, id: Uuid) -> Result<bool> {
        let deleted = self.storage.delete_memory(&id).await?;
        if deleted {
            tracing::debug!(memory_id = %id, "memory deleted");
        }
        Ok(deleted)
    }
}
