//! Filter types for memory queries

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Memory;

/// Planar Euclidean distance between two (latitude, longitude) pairs.
///
/// Coordinates are compared as raw degree values on a flat plane, so the
/// result is in degree-units, not kilometers. This is the engine's distance
/// contract: callers that tune a radius tune it against this formula, and a
/// geodesic metric would change which memories every existing radius matches.
pub fn planar_distance(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    ((lat1 - lat2).powi(2) + (lng1 - lng2).powi(2)).sqrt()
}

/// A circular search area in degree-units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Proximity {
    /// Center latitude in degrees
    pub latitude: f64,

    /// Center longitude in degrees
    pub longitude: f64,

    /// Radius in degree-units, inclusive
    pub radius: f64,
}

impl Proximity {
    /// Check whether a memory's coordinate lies within the area
    pub fn contains(&self, memory: &Memory) -> bool {
        planar_distance(memory.latitude, memory.longitude, self.latitude, self.longitude)
            <= self.radius
    }
}

/// Filter for memory queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MemoryFilter {
    /// Filter by the active flag
    pub active: Option<bool>,

    /// Filter by emotion label (exact, case-sensitive)
    pub emotion: Option<String>,

    /// Only memories owned by this user
    pub owner: Option<Uuid>,

    /// Only memories NOT owned by this user
    pub exclude_owner: Option<Uuid>,

    /// Only memories within this search area
    pub near: Option<Proximity>,
}

impl MemoryFilter {
    /// Evaluate the filter against a single memory
    pub fn matches(&self, memory: &Memory) -> bool {
        if let Some(active) = self.active
            && memory.active != active
        {
            return false;
        }

        if let Some(ref emotion) = self.emotion
            && memory.emotion != *emotion
        {
            return false;
        }

        if let Some(owner) = self.owner
            && memory.owner_id != owner
        {
            return false;
        }

        if let Some(excluded) = self.exclude_owner
            && memory.owner_id == excluded
        {
            return false;
        }

        if let Some(near) = self.near
            && !near.contains(memory)
        {
            return false;
        }

        true
    }
}
