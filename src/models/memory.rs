//! Memory model representing a geotagged, emotion-labeled note

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who may discover a memory
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    /// Discoverable by anyone
    Public,
    /// Reserved: discoverable by the owner's friends
    Friends,
    /// Reserved: discoverable by viewers sharing the memory's emotion
    EmotionMatch,
    /// Reserved: discoverable by the owner only
    Private,
}

impl Default for AccessType {
    fn default() -> Self {
        Self::Public
    }
}

impl std::fmt::Display for AccessType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public => write!(f, "PUBLIC"),
            Self::Friends => write!(f, "FRIENDS"),
            Self::EmotionMatch => write!(f, "EMOTION_MATCH"),
            Self::Private => write!(f, "PRIVATE"),
        }
    }
}

/// Core memory structure for all stored memories
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Memory {
    /// Unique identifier for the memory
    pub id: Uuid,

    /// The user that dropped the memory
    pub owner_id: Uuid,

    /// Short title, never empty
    pub title: String,

    /// Longer free-text description
    pub description: Option<String>,

    /// Transcribed or typed note content
    pub content: Option<String>,

    /// Inline audio payload, interpreted by the caller
    pub audio_data: Option<String>,

    /// External audio reference, interpreted by the caller
    pub audio_url: Option<String>,

    /// Free-text emotion label, never empty
    pub emotion: String,

    /// Confidence of the emotion label, 0.0 when unknown
    pub emotion_confidence: f64,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Human-readable place name
    pub location_name: Option<String>,

    /// Audio duration in seconds
    pub duration_secs: u32,

    /// Discovery policy tag
    pub access_type: AccessType,

    /// Inactive memories are hidden from every discovery surface
    pub active: bool,

    /// Denormalized count of unlock records referencing this memory
    pub unlock_count: u32,

    /// When the memory was created, set once
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create a new memory with the required fields
    pub fn new(
        owner_id: Uuid,
        title: impl Into<String>,
        emotion: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            title: title.into(),
            description: None,
            content: None,
            audio_data: None,
            audio_url: None,
            emotion: emotion.into(),
            emotion_confidence: 0.0,
            latitude,
            longitude,
            location_name: None,
            duration_secs: 0,
            access_type: AccessType::default(),
            active: true,
            unlock_count: 0,
            created_at: Utc::now(),
        }
    }
}

/// Creation request for a memory.
///
/// Required fields are `Option` so that absence is representable and rejected
/// with a validation error instead of silently defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub audio_data: Option<String>,
    pub audio_url: Option<String>,
    pub emotion: Option<String>,
    pub emotion_confidence: Option<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_name: Option<String>,
    pub duration_secs: Option<u32>,
    pub access_type: Option<AccessType>,
    pub active: Option<bool>,
}

impl MemoryDraft {
    /// Create a draft carrying only the required fields
    pub fn new(
        title: impl Into<String>,
        emotion: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            title: Some(title.into()),
            emotion: Some(emotion.into()),
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Self::default()
        }
    }

    /// Set the discovery policy tag
    pub fn access_type(mut self, access_type: AccessType) -> Self {
        self.access_type = Some(access_type);
        self
    }

    /// Set the note content
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set the active flag
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }
}
