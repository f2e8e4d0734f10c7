//! Configuration loading.
//!
//! Reads `config.toml` (by default from the platform config directory) and
//! caches the parsed result.

use crate::paths::CinedexPaths;
use crate::storage::AtomicTomlFile;
use cinedex_core::config::CinedexConfig;
use cinedex_core::error::Result;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Loads and caches the application configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<CinedexConfig>>>,
}

impl ConfigService {
    /// Uses the default config file location.
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(CinedexPaths::config_file()?))
    }

    /// Uses an explicit config file (e.g. from `--config`).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Returns the configuration, loading it on first access.
    ///
    /// A missing or empty file yields defaults. A present but invalid file
    /// is an error rather than a silent fallback.
    pub fn get_config(&self) -> Result<CinedexConfig> {
        if let Ok(read_lock) = self.config.read() {
            if let Some(cached) = read_lock.as_ref() {
                return Ok(cached.clone());
            }
        }

        let loaded = AtomicTomlFile::<CinedexConfig>::new(self.path.clone())
            .load()?
            .unwrap_or_default();
        loaded.validate()?;
        tracing::debug!("Loaded configuration from {:?}", self.path);

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));

        assert_eq!(service.get_config().unwrap(), CinedexConfig::default());
    }

    #[test]
    fn test_reads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[security]\nbcrypt_cost = 6\n").unwrap();

        let service = ConfigService::with_path(path.clone());
        assert_eq!(service.get_config().unwrap().security.bcrypt_cost, 6);

        std::fs::write(&path, "[security]\nbcrypt_cost = 8\n").unwrap();
        assert_eq!(service.get_config().unwrap().security.bcrypt_cost, 6);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().security.bcrypt_cost, 8);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\nmax_conflict_retries = 0\n").unwrap();

        assert!(ConfigService::with_path(path).get_config().is_err());
    }
}
