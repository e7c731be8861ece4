//! Storage layer: persistence traits, filters, and the in-memory backend

pub mod errors;
pub mod filters;
pub mod in_memory;
pub mod traits;

pub use errors::{StorageError, StorageResult};
pub use filters::{MemoryFilter, Proximity, planar_distance};
pub use in_memory::InMemoryStore;
pub use traits::{BaseStore, MemoryStore, UnlockStore, UserStore};
