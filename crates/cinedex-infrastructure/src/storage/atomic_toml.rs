//! Atomic TOML file operations.
//!
//! One record per file. Writes go through a temp file and an atomic rename,
//! and read-modify-write sequences run under an exclusive lock file.

use cinedex_core::error::{CinedexError, Result};
use fs2::FileExt;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A handle to a TOML file holding a single `T`.
///
/// Provides:
/// - **Atomicity**: Writes are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: [`AtomicTomlFile::locked`] serializes read-modify-write across processes
/// - **Durability**: Explicit fsync before rename
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new handle. Nothing touches the disk until it is used.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Writes `data` atomically, creating parent directories as needed.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Removes the file. Returns `false` if it was already gone.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Runs `f` while holding this file's exclusive lock.
    pub fn locked<R>(&self, f: impl FnOnce(&Self) -> Result<R>) -> Result<R> {
        let _lock = FileLock::acquire(&self.path)?;
        f(self)
    }

    /// `.{name}.tmp` next to the target, so the rename stays on one filesystem.
    fn temp_path(&self) -> Result<PathBuf> {
        let (parent, file_name) = split_path(&self.path)?;
        Ok(parent.join(format!(".{}.tmp", file_name)))
    }
}

/// An exclusive advisory lock, released when dropped.
///
/// Lock files are hidden (`.{name}.lock`) and left in place after unlock:
/// deleting them would let a waiter and a newcomer lock different inodes.
pub struct FileLock {
    file: File,
}

impl FileLock {
    /// Blocks until the lock guarding `path` is held.
    pub fn acquire(path: &Path) -> Result<Self> {
        let (parent, file_name) = split_path(path)?;
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let lock_path = parent.join(format!(".{}.lock", file_name));

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| CinedexError::io(format!("Failed to acquire lock {:?}: {}", lock_path, e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

fn split_path(path: &Path) -> Result<(&Path, String)> {
    let parent = path
        .parent()
        .ok_or_else(|| CinedexError::io(format!("Path has no parent directory: {:?}", path)))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| CinedexError::io(format!("Path has no file name: {:?}", path)))?;
    Ok((parent, file_name.to_string_lossy().into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        let counter = Counter {
            name: "views".to_string(),
            count: 42,
        };
        file.save(&counter).unwrap();

        assert_eq!(file.load().unwrap(), Some(counter));
    }

    #[test]
    fn test_load_missing_and_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("counter.toml");
        let file = AtomicTomlFile::<Counter>::new(path.clone());

        file.save(&Counter {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join(".counter.toml.tmp").exists());
    }

    #[test]
    fn test_locked_read_modify_write() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        for _ in 0..3 {
            file.locked(|f| {
                let mut counter = f.load()?.unwrap_or(Counter {
                    name: "hits".to_string(),
                    count: 0,
                });
                counter.count += 5;
                f.save(&counter)
            })
            .unwrap();
        }

        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Counter>::new(temp_dir.path().join("counter.toml"));

        assert!(!file.remove().unwrap());
        file.save(&Counter {
            name: "x".to_string(),
            count: 1,
        })
        .unwrap();
        assert!(file.remove().unwrap());
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_parse_error_is_serialization() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.toml");
        fs::write(&path, "name = ").unwrap();

        let err = AtomicTomlFile::<Counter>::new(path).load().unwrap_err();
        assert!(matches!(err, CinedexError::Serialization { .. }));
    }
}
