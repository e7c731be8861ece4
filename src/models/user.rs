//! User identity reference
//!
//! The engine consumes users read-only: ownership checks, viewer exclusion,
//! and unlocker resolution. Account lifecycle beyond that (passwords,
//! profiles, sessions) belongs to the embedding application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as seen by the engine
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique display name
    pub username: String,

    /// Unique contact address
    pub email: String,

    /// When the account was created, set once
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user reference
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
