//! Unified path management for cinedex files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/cinedex/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/cinedex/      # Data directory (or `data_dir` from config)
//! ├── catalog.toml             # Movie and genre catalog
//! └── users/                   # One TOML file per user
//!     └── <user-id>.toml
//! ```

use cinedex_core::error::{CinedexError, Result};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "cinedex";

/// Resolves every path the application touches.
///
/// A base directory override replaces the platform data directory, which
/// is how tests and `--data-dir` keep everything in one place.
#[derive(Debug, Clone)]
pub struct CinedexPaths {
    data_dir: PathBuf,
}

impl CinedexPaths {
    /// Uses `base_dir` if given, otherwise the platform data directory.
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_data_dir()?,
        };
        Ok(Self { data_dir })
    }

    /// `~/.config/cinedex` or the platform equivalent.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| CinedexError::config("Cannot determine the config directory"))
    }

    /// `~/.config/cinedex/config.toml` or the platform equivalent.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// `~/.local/share/cinedex` or the platform equivalent.
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| CinedexError::config("Cannot determine the data directory"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn users_dir(&self) -> PathBuf {
        self.data_dir.join("users")
    }

    pub fn catalog_file(&self) -> PathBuf {
        self.data_dir.join("catalog.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_base_dir() {
        let paths = CinedexPaths::new(Some(Path::new("/tmp/cinedex-test"))).unwrap();
        assert_eq!(paths.users_dir(), PathBuf::from("/tmp/cinedex-test/users"));
        assert_eq!(
            paths.catalog_file(),
            PathBuf::from("/tmp/cinedex-test/catalog.toml")
        );
    }
}
