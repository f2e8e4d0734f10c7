//! User repository trait.
//!
//! Defines the interface for user persistence operations.

use super::model::UserProfile;
use crate::error::Result;

/// An abstract repository for managing user persistence.
///
/// This trait defines the contract the account use cases rely on,
/// decoupling them from the specific storage mechanism (in-memory map,
/// TOML directory, document store).
///
/// # Implementation Notes
///
/// Implementations must:
/// - Match usernames case-insensitively
/// - Enforce username uniqueness on insert
/// - Treat `UserProfile::revision` as a compare-and-swap token on persist
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>>;

    /// Finds a user by username, ignoring case.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UserProfile))`: User found
    /// - `Ok(None)`: No such user
    /// - `Err(CinedexError)`: Error occurred during retrieval
    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>>;

    /// Lists all stored users.
    async fn list_all(&self) -> Result<Vec<UserProfile>>;

    /// Stores a new user.
    ///
    /// # Returns
    ///
    /// - `Ok(UserProfile)`: The stored profile
    /// - `Err(CinedexError::DuplicateUsername)`: Username already taken
    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Replaces a stored user if its revision still matches.
    ///
    /// # Returns
    ///
    /// - `Ok(UserProfile)`: The stored profile, with its revision bumped
    /// - `Err(CinedexError::StorageConflict)`: Someone else persisted first
    /// - `Err(CinedexError::UserNotFound)`: The user was deleted meanwhile
    async fn persist(&self, profile: &UserProfile) -> Result<UserProfile>;

    /// Deletes a user by id.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: User deleted
    /// - `Ok(false)`: There was nothing to delete
    async fn delete(&self, user_id: &str) -> Result<bool>;
}
