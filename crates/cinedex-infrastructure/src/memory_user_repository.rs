//! In-memory UserRepository implementation.

use async_trait::async_trait;
use cinedex_core::error::{CinedexError, Result};
use cinedex_core::user::{UserProfile, UserRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Keeps users in a map keyed by id.
///
/// Used by tests and as the default store for short-lived processes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, UserProfile>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|user| user.username_matches(username))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>> {
        let users = self.users.read().await;
        let mut all: Vec<UserProfile> = users.values().cloned().collect();
        all.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));
        Ok(all)
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile> {
        let mut users = self.users.write().await;
        if users.values().any(|user| user.username_matches(&profile.username)) {
            return Err(CinedexError::DuplicateUsername(profile.username.clone()));
        }
        if users.contains_key(&profile.id) {
            return Err(CinedexError::data_access(format!(
                "User id '{}' already exists",
                profile.id
            )));
        }

        users.insert(profile.id.clone(), profile.clone());
        Ok(profile.clone())
    }

    async fn persist(&self, profile: &UserProfile) -> Result<UserProfile> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|user| user.id != profile.id && user.username_matches(&profile.username))
        {
            return Err(CinedexError::DuplicateUsername(profile.username.clone()));
        }

        let stored = users
            .get_mut(&profile.id)
            .ok_or_else(|| CinedexError::UserNotFound(profile.username.clone()))?;

        if stored.revision != profile.revision {
            return Err(CinedexError::StorageConflict {
                id: profile.id.clone(),
                expected: profile.revision,
            });
        }

        let mut next = profile.clone();
        next.revision += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        let mut users = self.users.write().await;
        Ok(users.remove(user_id).is_some())
    }
}
