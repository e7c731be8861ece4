//! Visibility and proximity filtering
//!
//! Decides which memories a viewer may see. Personal discovery applies three
//! gates: the memory is active, the access policy permits it, and the viewer
//! is not its owner. The global map surface is analytics, not discovery, and
//! deliberately counts memories the viewer could never unlock.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::Result;
use crate::config::DiscoveryConfig;
use crate::models::{AccessType, Memory};
use crate::storage::filters::{MemoryFilter, Proximity};
use crate::storage::traits::MemoryStore;

/// Per-access-type visibility decision.
///
/// One hook point per policy tag; a custom policy can relax the reserved
/// variants without touching the discovery queries.
pub trait AccessPolicy: Send + Sync + 'static + Debug {
    /// Whether the viewer may discover this memory
    fn permits(&self, memory: &Memory, viewer: Option<Uuid>) -> bool;
}

/// Default policy: PUBLIC memories only
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicOnly;

impl AccessPolicy for PublicOnly {
    fn permits(&self, memory: &Memory, _viewer: Option<Uuid>) -> bool {
        match memory.access_type {
            AccessType::Public => true,
            AccessType::Friends => false,
            AccessType::EmotionMatch => false,
            AccessType::Private => false,
        }
    }
}

/// Everything the global map needs in one response
#[derive(Debug, Clone, Serialize)]
pub struct GlobalMapSnapshot {
    /// Active memories per emotion label, across all owners and access types
    pub emotion_counts: HashMap<String, u64>,

    /// Every active, publicly visible memory
    pub memories: Vec<Memory>,
}

/// Computes the candidate set of memories visible to a viewer
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    storage: Arc<dyn MemoryStore>,
    policy: Arc<dyn AccessPolicy>,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    /// Create a discovery engine with the default PUBLIC-only policy
    pub fn new(storage: Arc<dyn MemoryStore>, config: DiscoveryConfig) -> Self {
        Self::with_policy(storage, Arc::new(PublicOnly), config)
    }

    /// Create a discovery engine with a custom access policy
    pub fn with_policy(
        storage: Arc<dyn MemoryStore>,
        policy: Arc<dyn AccessPolicy>,
        config: DiscoveryConfig,
    ) -> Self {
        Self { storage, policy, config }
    }

    /// Memories visible to the viewer within `radius` degree-units of the
    /// given coordinate, never including the viewer's own.
    ///
    /// Falls back to the configured default radius when none is supplied.
    pub async fn discover_nearby(
        &self,
        viewer_id: Uuid,
        latitude: f64,
        longitude: f64,
        radius: Option<f64>,
        emotion: Option<&str>,
    ) -> Result<Vec<Memory>> {
        let radius = radius.unwrap_or(self.config.default_radius);
        let filter = MemoryFilter {
            active: Some(true),
            emotion: emotion.map(str::to_string),
            exclude_owner: Some(viewer_id),
            near: Some(Proximity { latitude, longitude, radius }),
            ..Default::default()
        };

        let mut memories = self.storage.list_memories(Some(filter), None).await?;
        memories.retain(|memory| self.policy.permits(memory, Some(viewer_id)));

        tracing::debug!(
            viewer_id = %viewer_id,
            radius,
            results = memories.len(),
            "nearby discovery"
        );
        Ok(memories)
    }

    /// Every visible memory regardless of location, optionally narrowed to
    /// one emotion and/or excluding a viewer's own memories
    pub async fn discover_all_public(
        &self,
        emotion: Option<&str>,
        exclude_viewer: Option<Uuid>,
    ) -> Result<Vec<Memory>> {
        let filter = MemoryFilter {
            active: Some(true),
            emotion: emotion.map(str::to_string),
            exclude_owner: exclude_viewer,
            ..Default::default()
        };

        let mut memories = self.storage.list_memories(Some(filter), None).await?;
        memories.retain(|memory| self.policy.permits(memory, exclude_viewer));
        Ok(memories)
    }

    /// The most recently created visible memories, newest first
    pub async fn discover_recent_public(&self, limit: usize) -> Result<Vec<Memory>> {
        let filter = MemoryFilter { active: Some(true), ..Default::default() };

        let mut memories = self.storage.list_memories(Some(filter), None).await?;
        memories.retain(|memory| self.policy.permits(memory, None));
        memories.reverse();
        memories.truncate(limit);
        Ok(memories)
    }

    /// Count of active memories per emotion label.
    ///
    /// Includes non-public memories and every owner's records; this aggregate
    /// backs global analytics rather than personal discovery.
    pub async fn emotion_counts(&self) -> Result<HashMap<String, u64>> {
        Ok(self.storage.count_active_by_emotion().await?)
    }

    /// Emotion counts plus every visible memory, for map rendering
    pub async fn global_map_snapshot(&self) -> Result<GlobalMapSnapshot> {
        let emotion_counts = self.emotion_counts().await?;

        let filter = MemoryFilter { active: Some(true), ..Default::default() };
        let mut memories = self.storage.list_memories(Some(filter), None).await?;
        memories.retain(|memory| self.policy.permits(memory, None));

        Ok(GlobalMapSnapshot { emotion_counts, memories })
    }
}
