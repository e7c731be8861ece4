//! Unlock records: the permanent trace of a viewer revealing a memory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A one-way reveal event.
///
/// Unlock records are written once and never mutated or deleted. Several
/// records may exist for the same (memory, unlocker) pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryUnlock {
    /// Unique identifier for the unlock
    pub id: Uuid,

    /// The memory that was unlocked
    pub memory_id: Uuid,

    /// The user that unlocked it
    pub unlocked_by: Uuid,

    /// Text response left by the unlocker
    pub echo_content: Option<String>,

    /// Audio response reference left by the unlocker
    pub echo_audio_url: Option<String>,

    /// When the unlock happened, set once
    pub unlocked_at: DateTime<Utc>,
}

impl MemoryUnlock {
    /// Create a new unlock record for a memory
    pub fn new(memory_id: Uuid, unlocked_by: Uuid, echo: EchoDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            memory_id,
            unlocked_by,
            echo_content: echo.echo_content,
            echo_audio_url: echo.echo_audio_url,
            unlocked_at: Utc::now(),
        }
    }
}

/// The response payload a viewer attaches when unlocking a memory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoDraft {
    pub echo_content: Option<String>,
    pub echo_audio_url: Option<String>,
}

impl EchoDraft {
    /// Create an echo with text content only
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            echo_content: Some(content.into()),
            echo_audio_url: None,
        }
    }
}
