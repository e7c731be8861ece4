//! Identity resolution for viewer-facing operations
//!
//! The engine never interprets credentials itself: it asks an
//! [`IdentityResolver`] to map an opaque bearer credential to a user id and
//! fails `Unauthenticated` when that mapping does not exist. Token format,
//! signing, and expiry policy live in the resolver implementation supplied
//! by the embedding application.

use std::fmt::Debug;

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{EchomapError, Result};

/// Maps an opaque bearer credential to a user id
#[async_trait]
pub trait IdentityResolver: Send + Sync + 'static + Debug {
    /// Resolve a credential, failing `Unauthenticated` when it is unknown,
    /// malformed, or revoked
    async fn resolve(&self, credential: &str) -> Result<Uuid>;
}

/// Reference resolver backed by a process-local table of opaque tokens.
///
/// Suitable for tests and embedded deployments; a production deployment
/// would put a signed-token verifier behind [`IdentityResolver`] instead.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    tokens: DashMap<String, Uuid>,
}

impl TokenRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh opaque token for a user
    pub fn issue(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().to_string();
        self.tokens.insert(token.clone(), user_id);
        token
    }

    /// Revoke a token, returning whether it was known
    pub fn revoke(&self, credential: &str) -> bool {
        self.tokens.remove(Self::strip_bearer(credential)).is_some()
    }

    fn strip_bearer(credential: &str) -> &str {
        credential.strip_prefix("Bearer ").unwrap_or(credential)
    }
}

#[async_trait]
impl IdentityResolver for TokenRegistry {
    async fn resolve(&self, credential: &str) -> Result<Uuid> {
        self.tokens
            .get(Self::strip_bearer(credential))
            .map(|entry| *entry.value())
            .ok_or_else(|| {
                EchomapError::Unauthenticated("invalid or expired credential".to_string())
            })
    }
}
