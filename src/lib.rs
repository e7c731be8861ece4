//! # echomap
//!
//! Location-based memory discovery and unlock engine. Users drop geotagged
//! "memories" (short audio/text notes labeled with an emotion); other users
//! discover nearby ones and unlock them, leaving an "echo" response behind.
//! The engine owns proximity/emotion filtering, the visibility gate, and the
//! unlock workflow with its denormalized counter.
//!
//! ## Quick Start
//!
//! ```rust
//! use echomap::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let store = Arc::new(InMemoryStore::new());
//!     let tokens = Arc::new(TokenRegistry::new());
//!     let config = ConfigBuilder::new().without_stdout_logging().build()?;
//!     let manager =
//!         EchoManager::new(store.clone(), store.clone(), store.clone(), tokens.clone(), config);
//!
//!     // Seed two users; account management lives outside the engine.
//!     let mara = store.create_user(User::new("mara", "mara@example.com")).await?;
//!     let jon = store.create_user(User::new("jon", "jon@example.com")).await?;
//!
//!     // Mara drops a memory.
//!     let draft = MemoryDraft::new("first snow", "wonder", 59.91, 10.75);
//!     let memory = manager.create_memory(mara.id, draft).await?;
//!
//!     // Jon discovers it nearby (radius is in degree-units) and unlocks it.
//!     let nearby = manager.discover_nearby(jon.id, 59.91, 10.75, Some(1.0), None).await?;
//!     assert_eq!(nearby.len(), 1);
//!
//!     let unlock = manager.unlock(memory.id, jon.id, EchoDraft::text("felt this too")).await?;
//!     assert_eq!(unlock.memory_id, memory.id);
//!     assert_eq!(manager.get_memory(memory.id).await?.unlock_count, 1);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Models**: [`models::Memory`], [`models::MemoryUnlock`], [`models::User`]
//! - **Storage seams**: [`storage::MemoryStore`], [`storage::UnlockStore`],
//!   [`storage::UserStore`], with [`storage::InMemoryStore`] as the reference
//!   backend
//! - **Identity seam**: [`identity::IdentityResolver`], with
//!   [`identity::TokenRegistry`] as the reference resolver
//! - **Engine**: [`core::EchoManager`] composes everything; collaborators are
//!   injected rather than ambient
//!
//! The distance contract is planar: coordinates compare as raw degree pairs,
//! so radii are degree-units (see [`storage::planar_distance`]).

pub mod config;
pub mod core;
pub mod identity;
pub mod logging;
pub mod models;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export core initialization functions
    pub use crate::{init, init_with_defaults};

    // Re-export config types
    pub use crate::config::{
        ConfigBuilder, DiscoveryConfig, EchomapConfig, LogFormat, LogLevel, LoggingConfig,
    };

    // Re-export model types
    pub use crate::models::{AccessType, EchoDraft, Memory, MemoryDraft, MemoryUnlock, User};

    // Re-export engine types
    pub use crate::core::{
        AccessPolicy, DiscoveryEngine, EchoManager, GlobalMapSnapshot, PublicOnly, UnlockEngine,
    };

    // Re-export identity types
    pub use crate::identity::{IdentityResolver, TokenRegistry};

    // Re-export storage types
    pub use crate::storage::{
        BaseStore, InMemoryStore, MemoryFilter, MemoryStore, Proximity, StorageError, UnlockStore,
        UserStore, planar_distance,
    };

    // Re-export essential result type
    pub use crate::{EchomapError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for echomap operations
#[derive(Debug, thiserror::Error)]
pub enum EchomapError {
    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// A required field is missing or invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown memory or user id
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credential missing, invalid, or revoked
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// State collision. Raised for uniqueness violations at the store layer;
    /// reserved for the unlock path, which currently allows repeats.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging setup error
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// Other unclassified errors
    #[error("{0}")]
    Other(String),
}

impl From<storage::StorageError> for EchomapError {
    fn from(err: storage::StorageError) -> Self {
        match err {
            storage::StorageError::Validation(msg) => EchomapError::Validation(msg),
            storage::StorageError::NotFound(msg) => EchomapError::NotFound(msg),
            storage::StorageError::AlreadyExists(msg) => EchomapError::Conflict(msg),
            other => EchomapError::Storage(other.to_string()),
        }
    }
}

impl From<config::ConfigError> for EchomapError {
    fn from(err: config::ConfigError) -> Self {
        EchomapError::Configuration(err.to_string())
    }
}

/// Result type for echomap operations
pub type Result<T> = std::result::Result<T, EchomapError>;

/// Initialize the engine with the provided configuration.
///
/// Wires an [`storage::InMemoryStore`] behind every store seam and an empty
/// [`identity::TokenRegistry`] as the resolver, and installs logging per the
/// configuration. Deployments with their own backends should construct
/// [`core::EchoManager`] directly instead.
pub async fn init(config: config::EchomapConfig) -> Result<core::EchoManager> {
    // Ignore errors if tracing is already initialized.
    let _ = logging::init(&config.logging);

    let store = std::sync::Arc::new(storage::InMemoryStore::new());
    let identity = std::sync::Arc::new(identity::TokenRegistry::new());

    Ok(core::EchoManager::new(
        store.clone(),
        store.clone(),
        store,
        identity,
        config,
    ))
}

/// Initialize the engine with default configuration
pub async fn init_with_defaults() -> Result<core::EchoManager> {
    let config = config::ConfigBuilder::new().build()?;
    init(config).await
}
