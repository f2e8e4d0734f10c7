//! Account use cases.
//!
//! `UserAccountUsecase` wires the credential guard, the profile merger and the
//! favorites ledger to the user and movie repositories. Every mutation of an
//! account follows the same shape:
//!
//! 1. take the per-username lock
//! 2. fetch the active profile
//! 3. apply a pure core rule
//! 4. persist with a revision check, refetching and reapplying on conflict

use crate::user_locks::UserLocks;
use cinedex_core::credential::{CredentialGuard, redact};
use cinedex_core::error::{CinedexError, Result};
use cinedex_core::movie::{MovieRecord, MovieRepository};
use cinedex_core::user::{
    NewUser, ProfileUpdate, PublicProfile, UserProfile, UserRepository, add_favorite,
    apply_update, remove_favorite, require_active,
};
use std::sync::Arc;

pub struct UserAccountUsecase {
    /// Repository for user profiles
    user_repository: Arc<dyn UserRepository>,
    /// Read-only catalog used to resolve favorite references
    movie_repository: Arc<dyn MovieRepository>,
    /// Hashes and verifies passwords
    guard: Arc<dyn CredentialGuard>,
    locks: UserLocks,
    /// Attempts per mutation before a storage conflict is surfaced
    max_conflict_retries: u32,
}

impl UserAccountUsecase {
    /// Creates a new `UserAccountUsecase`.
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Storage for user profiles
    /// * `movie_repository` - Catalog lookups for favorites
    /// * `guard` - Password hashing
    /// * `max_conflict_retries` - Attempts per mutation (at least one is always made)
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        movie_repository: Arc<dyn MovieRepository>,
        guard: Arc<dyn CredentialGuard>,
        max_conflict_retries: u32,
    ) -> Self {
        Self {
            user_repository,
            movie_repository,
            guard,
            locks: UserLocks::new(),
            max_conflict_retries: max_conflict_retries.max(1),
        }
    }

    /// Registers a new account and returns its public view.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when a field fails validation
    /// - `DuplicateUsername` when the name is taken (case-insensitive)
    pub async fn register(&self, request: NewUser) -> Result<PublicProfile> {
        request.validate()?;
        let username = request.username.trim().to_string();
        let _lock = self.locks.acquire(&username).await;

        if self
            .user_repository
            .find_by_username(&username)
            .await?
            .is_some()
        {
            return Err(CinedexError::DuplicateUsername(username));
        }

        let secret = self.guard.hash(&request.password)?;
        let profile = UserProfile::new(username, secret, request.email, request.birthday);
        let stored = self.user_repository.insert(&profile).await?;

        tracing::info!("Registered user '{}'", stored.username);
        Ok(redact(&stored))
    }

    /// Checks a username/password pair.
    ///
    /// An unknown user and a wrong password fail the same way.
    pub async fn login(&self, username: &str, password: &str) -> Result<PublicProfile> {
        let profile = self
            .user_repository
            .find_by_username(username.trim())
            .await?;

        match profile {
            Some(profile) if self.guard.verify(password, &profile.secret) => {
                tracing::debug!("Login succeeded for '{}'", profile.username);
                Ok(redact(&profile))
            }
            _ => {
                tracing::debug!("Login rejected for '{}'", username.trim());
                Err(CinedexError::InvalidCredentials)
            }
        }
    }

    pub async fn get_profile(&self, identifier: &str) -> Result<PublicProfile> {
        let profile = self.active_profile(identifier).await?;
        Ok(redact(&profile))
    }

    pub async fn list_profiles(&self) -> Result<Vec<PublicProfile>> {
        let profiles = self.user_repository.list_all().await?;
        Ok(profiles.iter().map(redact).collect())
    }

    /// Applies a partial update.
    ///
    /// Replacement favorites must all exist in the catalog.
    pub async fn update_profile(
        &self,
        identifier: &str,
        payload: ProfileUpdate,
    ) -> Result<PublicProfile> {
        let identifier = identifier.trim();
        let _lock = self.locks.acquire(identifier).await;

        let current = self.active_profile(identifier).await?;
        let merged = apply_update(identifier, &current, &payload, self.guard.as_ref())?;

        if let Some(ids) = payload.favorite_movie_ids() {
            for movie_id in ids {
                if self.movie_repository.find_by_id(movie_id).await?.is_none() {
                    return Err(CinedexError::MovieNotFound(movie_id.clone()));
                }
            }
        }

        let stored = self
            .persist_with_retry(identifier, merged, |fresh| {
                apply_update(identifier, fresh, &payload, self.guard.as_ref())
            })
            .await?;

        tracing::info!("Updated profile of '{}'", stored.username);
        Ok(redact(&stored))
    }

    /// Adds a movie to the favorites of `identifier`.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` when there is no such account
    /// - `MovieNotFound` when the id is not in the catalog
    /// - `AlreadyFavorited` when it is already in the list
    pub async fn add_favorite(&self, identifier: &str, movie_id: &str) -> Result<PublicProfile> {
        let identifier = identifier.trim();
        let _lock = self.locks.acquire(identifier).await;

        let current = self.active_profile(identifier).await?;
        let resolved = self.movie_repository.find_by_id(movie_id).await?;
        let updated = add_favorite(&current, movie_id, resolved.as_ref())?;

        let stored = self
            .persist_with_retry(identifier, updated, |fresh| {
                add_favorite(fresh, movie_id, resolved.as_ref())
            })
            .await?;

        tracing::info!("'{}' favorited '{}'", stored.username, movie_id);
        Ok(redact(&stored))
    }

    /// Removes a movie from the favorites of `identifier`.
    ///
    /// The catalog is not consulted, so ids of movies that have since left
    /// the catalog can still be removed.
    pub async fn remove_favorite(&self, identifier: &str, movie_id: &str) -> Result<PublicProfile> {
        let identifier = identifier.trim();
        let _lock = self.locks.acquire(identifier).await;

        let current = self.active_profile(identifier).await?;
        let updated = remove_favorite(&current, movie_id)?;

        let stored = self
            .persist_with_retry(identifier, updated, |fresh| remove_favorite(fresh, movie_id))
            .await?;

        tracing::info!("'{}' unfavorited '{}'", stored.username, movie_id);
        Ok(redact(&stored))
    }

    /// Like [`Self::add_favorite`], addressing the movie by title.
    pub async fn add_favorite_by_title(
        &self,
        identifier: &str,
        title: &str,
    ) -> Result<PublicProfile> {
        let movie = self.movie_by_title(title).await?;
        self.add_favorite(identifier, &movie.id).await
    }

    /// Like [`Self::remove_favorite`], addressing the movie by title.
    pub async fn remove_favorite_by_title(
        &self,
        identifier: &str,
        title: &str,
    ) -> Result<PublicProfile> {
        let movie = self.movie_by_title(title).await?;
        self.remove_favorite(identifier, &movie.id).await
    }

    /// Deletes the account. Deleted accounts behave as if they never existed.
    pub async fn delete_account(&self, identifier: &str) -> Result<()> {
        let identifier = identifier.trim();
        let _lock = self.locks.acquire(identifier).await;

        let profile = self.active_profile(identifier).await?;
        if !self.user_repository.delete(&profile.id).await? {
            return Err(CinedexError::UserNotFound(identifier.to_string()));
        }

        tracing::info!("Deleted account '{}'", profile.username);
        Ok(())
    }

    /// Resolves the favorites of `identifier` in list order.
    ///
    /// Ids that no longer resolve are skipped.
    pub async fn favorite_movies(&self, identifier: &str) -> Result<Vec<MovieRecord>> {
        let profile = self.active_profile(identifier).await?;

        let mut movies = Vec::with_capacity(profile.favorite_movie_ids.len());
        for movie_id in &profile.favorite_movie_ids {
            match self.movie_repository.find_by_id(movie_id).await? {
                Some(movie) => movies.push(movie),
                None => tracing::debug!(
                    "Skipping stale favorite '{}' of '{}'",
                    movie_id,
                    profile.username
                ),
            }
        }
        Ok(movies)
    }

    async fn active_profile(&self, identifier: &str) -> Result<UserProfile> {
        let identifier = identifier.trim();
        let found = self.user_repository.find_by_username(identifier).await?;
        require_active(identifier, found)
    }

    async fn movie_by_title(&self, title: &str) -> Result<MovieRecord> {
        self.movie_repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| CinedexError::MovieNotFound(title.trim().to_string()))
    }

    /// Persists `candidate`; on a revision conflict refetches the profile and
    /// rebuilds the candidate with `reapply`.
    ///
    /// The caller must hold the lock for `identifier`. Conflicts then only come
    /// from writers outside this process.
    async fn persist_with_retry<F>(
        &self,
        identifier: &str,
        candidate: UserProfile,
        mut reapply: F,
    ) -> Result<UserProfile>
    where
        F: FnMut(&UserProfile) -> Result<UserProfile> + Send,
    {
        let mut candidate = candidate;
        let mut attempt = 1;

        loop {
            match self.user_repository.persist(&candidate).await {
                Ok(stored) => return Ok(stored),
                Err(err) if err.is_conflict() && attempt < self.max_conflict_retries => {
                    tracing::warn!(
                        "Conflict persisting '{}' (attempt {}/{}): {}",
                        identifier,
                        attempt,
                        self.max_conflict_retries,
                        err
                    );
                    attempt += 1;

                    let fresh = self.active_profile(identifier).await?;
                    candidate = reapply(&fresh)?;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
