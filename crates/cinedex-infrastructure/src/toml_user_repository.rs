//! TOML directory UserRepository implementation.

use crate::dto::UserRecord;
use crate::paths::CinedexPaths;
use crate::storage::{AtomicTomlFile, FileLock};
use async_trait::async_trait;
use cinedex_core::error::{CinedexError, Result};
use cinedex_core::user::{UserProfile, UserRepository};
use std::fs;
use std::path::{Path, PathBuf};

/// One TOML file per user.
///
/// Directory structure:
/// ```text
/// base_dir/
/// └── users/
///     ├── .users.lock
///     ├── 550e8400-e29b-41d4-a716-446655440000.toml
///     └── 6ba7b810-9dad-11d1-80b4-00c04fd430c8.toml
/// ```
///
/// Reads go straight to the files (writes are atomic renames, so a reader
/// never sees a torn file). Every mutation holds the directory lock, which
/// makes the username uniqueness check and the revision check race-free
/// across processes.
#[derive(Debug, Clone)]
pub struct TomlUserRepository {
    users_dir: PathBuf,
}

impl TomlUserRepository {
    /// Creates a repository under `base_dir` (or the platform data directory).
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let paths = CinedexPaths::new(base_dir)?;
        Ok(Self::with_dir(paths.users_dir()))
    }

    /// Creates a repository that stores user files directly in `users_dir`.
    pub fn with_dir(users_dir: PathBuf) -> Self {
        Self { users_dir }
    }

    pub fn users_dir(&self) -> &Path {
        &self.users_dir
    }
}

async fn blocking<R, F>(f: F) -> Result<R>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| CinedexError::internal(format!("Storage task failed: {}", e)))?
}

/// Ids become file names, so only plain tokens are accepted.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn user_file(dir: &Path, id: &str) -> AtomicTomlFile<UserRecord> {
    AtomicTomlFile::new(dir.join(format!("{}.toml", id)))
}

fn lock_dir(dir: &Path) -> Result<FileLock> {
    FileLock::acquire(&dir.join("users"))
}

fn load_one(dir: &Path, id: &str) -> Result<Option<UserProfile>> {
    if !is_safe_id(id) {
        return Ok(None);
    }
    user_file(dir, id)
        .load()?
        .map(UserRecord::into_domain)
        .transpose()
}

fn load_all(dir: &Path) -> Result<Vec<UserProfile>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut users = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_record = path.extension().is_some_and(|ext| ext == "toml")
            && !path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with('.'));
        if !is_record {
            continue;
        }

        match AtomicTomlFile::<UserRecord>::new(path.clone()).load()? {
            Some(record) => users.push(record.into_domain()?),
            None => tracing::warn!("Skipping empty user file {:?}", path),
        }
    }

    users.sort_by(|a, b| a.username.to_lowercase().cmp(&b.username.to_lowercase()));
    Ok(users)
}

fn ensure_username_free(users: &[UserProfile], profile: &UserProfile) -> Result<()> {
    if users
        .iter()
        .any(|user| user.id != profile.id && user.username_matches(&profile.username))
    {
        return Err(CinedexError::DuplicateUsername(profile.username.clone()));
    }
    Ok(())
}

#[async_trait]
impl UserRepository for TomlUserRepository {
    async fn find_by_id(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let dir = self.users_dir.clone();
        let id = user_id.to_string();
        blocking(move || load_one(&dir, &id)).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<UserProfile>> {
        let dir = self.users_dir.clone();
        let username = username.to_string();
        tracing::debug!("Looking up user {:?} in {:?}", username, dir);
        blocking(move || {
            Ok(load_all(&dir)?
                .into_iter()
                .find(|user| user.username_matches(&username)))
        })
        .await
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>> {
        let dir = self.users_dir.clone();
        blocking(move || load_all(&dir)).await
    }

    async fn insert(&self, profile: &UserProfile) -> Result<UserProfile> {
        if !is_safe_id(&profile.id) {
            return Err(CinedexError::invalid_input("id", "User id is not a plain token"));
        }

        let dir = self.users_dir.clone();
        let profile = profile.clone();
        blocking(move || {
            let _lock = lock_dir(&dir)?;
            ensure_username_free(&load_all(&dir)?, &profile)?;

            let file = user_file(&dir, &profile.id);
            if file.path().exists() {
                return Err(CinedexError::data_access(format!(
                    "User id '{}' already exists",
                    profile.id
                )));
            }

            file.save(&UserRecord::from(&profile))?;
            tracing::info!("Created user '{}' ({})", profile.username, profile.id);
            Ok(profile)
        })
        .await
    }

    async fn persist(&self, profile: &UserProfile) -> Result<UserProfile> {
        let dir = self.users_dir.clone();
        let profile = profile.clone();
        blocking(move || {
            let _lock = lock_dir(&dir)?;

            let stored = load_one(&dir, &profile.id)?
                .ok_or_else(|| CinedexError::UserNotFound(profile.username.clone()))?;
            if stored.revision != profile.revision {
                return Err(CinedexError::StorageConflict {
                    id: profile.id.clone(),
                    expected: profile.revision,
                });
            }
            if !stored.username_matches(&profile.username) {
                ensure_username_free(&load_all(&dir)?, &profile)?;
            }

            let mut next = profile;
            next.revision += 1;
            user_file(&dir, &next.id).save(&UserRecord::from(&next))?;
            tracing::debug!("Persisted user '{}' at revision {}", next.username, next.revision);
            Ok(next)
        })
        .await
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        if !is_safe_id(user_id) {
            return Ok(false);
        }

        let dir = self.users_dir.clone();
        let id = user_id.to_string();
        blocking(move || {
            let _lock = lock_dir(&dir)?;
            let removed = user_file(&dir, &id).remove()?;
            if removed {
                tracing::info!("Deleted user {}", id);
            }
            Ok(removed)
        })
        .await
    }
}
