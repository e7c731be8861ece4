//! Echo Manager interface
//!
//! This module provides the primary interface for interacting with the
//! echomap engine. It orchestrates the memory, discovery, and unlock
//! components over injected stores; there is no ambient global state.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::config::EchomapConfig;
use crate::core::discovery::{AccessPolicy, DiscoveryEngine, GlobalMapSnapshot, PublicOnly};
use crate::core::operations::MemoryOperations;
use crate::core::unlocks::UnlockEngine;
use crate::identity::IdentityResolver;
use crate::models::{EchoDraft, Memory, MemoryDraft, MemoryUnlock, User};
use crate::storage::traits::{MemoryStore, UnlockStore, UserStore};
use crate::{EchomapError, Result};

/// The primary interface for interacting with the echomap engine.
///
/// `EchoManager` composes the memory store, unlock store, user store, and
/// identity resolver into a single operation surface. All collaborators are
/// injected, so tests run against in-memory fakes and deployments swap
/// backends without touching the engine.
#[derive(Debug)]
pub struct EchoManager {
    /// Memory CRUD operations
    memory_ops: MemoryOperations,

    /// Visibility and proximity filtering
    discovery: DiscoveryEngine,

    /// Unlock workflow and queries
    unlocks: UnlockEngine,

    /// Credential to user-id resolution
    identity: Arc<dyn IdentityResolver>,

    /// User records, consumed read-only
    users: Arc<dyn UserStore>,

    /// Engine configuration
    config: EchomapConfig,
}

impl EchoManager {
    /// Create a manager with the default PUBLIC-only access policy
    pub fn new(
        memories: Arc<dyn MemoryStore>,
        unlocks: Arc<dyn UnlockStore>,
        users: Arc<dyn UserStore>,
        identity: Arc<dyn IdentityResolver>,
        config: EchomapConfig,
    ) -> Self {
        Self::with_access_policy(memories, unlocks, users, identity, Arc::new(PublicOnly), config)
    }

    /// Create a manager with a custom access policy
    pub fn with_access_policy(
        memories: Arc<dyn MemoryStore>,
        unlocks: Arc<dyn UnlockStore>,
        users: Arc<dyn UserStore>,
        identity: Arc<dyn IdentityResolver>,
        policy: Arc<dyn AccessPolicy>,
        config: EchomapConfig,
    ) -> Self {
        let memory_ops = MemoryOperations::new(Arc::clone(&memories));
        let discovery =
            DiscoveryEngine::with_policy(Arc::clone(&memories), policy, config.discovery.clone());
        let unlocks = UnlockEngine::new(memories, unlocks, Arc::clone(&users));

        Self { memory_ops, discovery, unlocks, identity, users, config }
    }

    /// Get the engine configuration
    pub fn config(&self) -> &EchomapConfig {
        &self.config
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Resolve a bearer credential to its user record.
    ///
    /// Fails `Unauthenticated` for an unknown credential and `NotFound` when
    /// the credential maps to a user that no longer exists.
    pub async fn authenticate(&self, credential: &str) -> Result<User> {
        let user_id = self.identity.resolve(credential).await?;
        self.users
            .get_user(&user_id)
            .await?
            .ok_or_else(|| EchomapError::NotFound(format!("user '{user_id}'")))
    }

    // =========================================================================
    // Memory operations (delegated to MemoryOperations)
    // =========================================================================

    /// Create a memory owned by `owner_id` from a validated draft
    pub async fn create_memory(&self, owner_id: Uuid, draft: MemoryDraft) -> Result<Memory> {
        self.memory_ops.create_memory(owner_id, draft).await
    }

    /// Retrieve a memory, failing `NotFound` for an unknown id
    pub async fn get_memory(&self, id: Uuid) -> Result<Memory> {
        self.memory_ops.get_memory(id).await
    }

    /// List a user's own memories, oldest first
    pub async fn list_owned(&self, owner_id: Uuid) -> Result<Vec<Memory>> {
        self.memory_ops.list_owned(owner_id).await
    }

    /// List a user's own memories, most recent first
    pub async fn list_owned_recent(&self, owner_id: Uuid) -> Result<Vec<Memory>> {
        self.memory_ops.list_owned_recent(owner_id).await
    }

    /// Hide a memory from every discovery surface
    pub async fn deactivate_memory(&self, id: Uuid) -> Result<bool> {
        self.memory_ops.deactivate_memory(id).await
    }

    /// Make a deactivated memory discoverable again
    pub async fn activate_memory(&self, id: Uuid) -> Result<bool> {
        self.memory_ops.activate_memory(id).await
    }

    /// Delete a memory record
    pub async fn delete_memory(&self, id: Uuid) -> Result<bool> {
        self.memory_ops.delete_memory(id).await
    }

    // =========================================================================
    // Discovery (delegated to DiscoveryEngine)
    // =========================================================================

    /// Visible memories near a coordinate, excluding the viewer's own
    pub async fn discover_nearby(
        &self,
        viewer_id: Uuid,
        latitude: f64,
        longitude: f64,
        radius: Option<f64>,
        emotion: Option<&str>,
    ) -> Result<Vec<Memory>> {
        self.discovery
            .discover_nearby(viewer_id, latitude, longitude, radius, emotion)
            .await
    }

    /// Every visible memory, optionally filtered by emotion and/or excluding
    /// a viewer's own
    pub async fn discover_all_public(
        &self,
        emotion: Option<&str>,
        exclude_viewer: Option<Uuid>,
    ) -> Result<Vec<Memory>> {
        self.discovery.discover_all_public(emotion, exclude_viewer).await
    }

    /// The most recently created visible memories, newest first
    pub async fn discover_recent_public(&self, limit: usize) -> Result<Vec<Memory>> {
        self.discovery.discover_recent_public(limit).await
    }

    /// Active memories per emotion label, across all owners and access types
    pub async fn emotion_counts(&self) -> Result<HashMap<String, u64>> {
        self.discovery.emotion_counts().await
    }

    /// Emotion counts plus every visible memory, for map rendering
    pub async fn global_map_snapshot(&self) -> Result<GlobalMapSnapshot> {
        self.discovery.global_map_snapshot().await
    }

    // =========================================================================
    // Unlocks (delegated to UnlockEngine)
    // =========================================================================

    /// Unlock a memory on behalf of a user, recording their echo
    pub async fn unlock(
        &self,
        memory_id: Uuid,
        unlocker_id: Uuid,
        echo: EchoDraft,
    ) -> Result<MemoryUnlock> {
        self.unlocks.unlock(memory_id, unlocker_id, echo).await
    }

    /// All unlocks of a memory, oldest first
    pub async fn list_unlocks_for_memory(&self, memory_id: Uuid) -> Result<Vec<MemoryUnlock>> {
        self.unlocks.list_for_memory(memory_id).await
    }

    /// All unlocks performed by a user, oldest first
    pub async fn list_unlocks_by_user(&self, user_id: Uuid) -> Result<Vec<MemoryUnlock>> {
        self.unlocks.list_by_user(user_id).await
    }

    /// Whether a user has unlocked a memory at least once
    pub async fn has_unlocked(&self, memory_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.unlocks.has_unlocked(memory_id, user_id).await
    }

    /// Number of unlock records referencing a memory
    pub async fn unlock_count_for_memory(&self, memory_id: Uuid) -> Result<u64> {
        self.unlocks.count_for_memory(memory_id).await
    }

    /// Number of unlocks a user has performed
    pub async fn unlock_count_by_user(&self, user_id: Uuid) -> Result<u64> {
        self.unlocks.count_by_user(user_id).await
    }
}
