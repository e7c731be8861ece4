//! Core engine components: the manager, discovery, and unlock machinery

pub mod discovery;
pub mod manager;
pub mod operations;
pub mod unlocks;

pub use discovery::{AccessPolicy, DiscoveryEngine, GlobalMapSnapshot, PublicOnly};
pub use manager::EchoManager;
pub use operations::MemoryOperations;
pub use unlocks::UnlockEngine;
