//! UserProfile domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credential::Secret;

/// A user account as stored.
///
/// Holds the hashed secret, so it deliberately does not implement
/// `Serialize`. Anything leaving the core goes through
/// [`crate::credential::redact`] and becomes a [`PublicProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Opaque unique id, assigned at creation
    pub id: String,
    /// Unique, case-insensitive login name
    pub username: String,
    /// Hashed password
    pub secret: Secret,
    pub email: String,
    pub birthday: Option<NaiveDate>,
    /// Favorite movie ids, no duplicates, insertion order kept
    pub favorite_movie_ids: Vec<String>,
    /// Storage revision used for compare-and-swap. Only storage changes it.
    pub revision: u64,
}

impl UserProfile {
    /// Creates a fresh profile with a new id and no favorites.
    pub fn new(
        username: String,
        secret: Secret,
        email: String,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            secret,
            email,
            birthday,
            favorite_movie_ids: Vec::new(),
            revision: 0,
        }
    }

    /// Returns true if `movie_id` is already a favorite.
    pub fn has_favorite(&self, movie_id: &str) -> bool {
        self.favorite_movie_ids.iter().any(|id| id == movie_id)
    }

    /// Case-insensitive username comparison used by lookups.
    pub fn username_matches(&self, username: &str) -> bool {
        self.username.to_lowercase() == username.trim().to_lowercase()
    }
}

/// Outward-facing view of a user. Has no secret field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    pub favorite_movie_ids: Vec<String>,
}
