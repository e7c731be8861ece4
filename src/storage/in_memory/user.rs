//! User record operations for the in-memory backend

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::User;
use crate::storage::errors::{StorageError, StorageResult};
use crate::storage::in_memory::InMemoryStore;
use crate::storage::traits::UserStore;

#[async_trait]
impl UserStore for InMemoryStore {
    async fn create_user(&self, user: User) -> StorageResult<User> {
        if user.username.trim().is_empty() {
            return Err(StorageError::Validation("Username is required".to_string()));
        }
        if user.email.trim().is_empty() {
            return Err(StorageError::Validation("Email is required".to_string()));
        }
        if self.find_by_username(&user.username).await?.is_some() {
            return Err(StorageError::AlreadyExists(format!(
                "username '{}'",
                user.username
            )));
        }
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(StorageError::AlreadyExists(format!("email '{}'", user.email)));
        }

        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &Uuid) -> StorageResult<Option<User>> {
        Ok(self.users.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().username == username)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }
}
