//! Error types for Cinedex.

use thiserror::Error;

/// A shared error type for the entire Cinedex workspace.
///
/// The first group of variants is produced by the core rules (credential guard,
/// profile merger, favorites ledger). The rest come from the collaborators
/// around it: storage, configuration and the surrounding plumbing.
///
/// No variant ever carries a plaintext password or a hashed secret.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CinedexError {
    /// A field failed validation (empty password, malformed email, ...)
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// The identifier and the payload username disagree
    #[error("Identifier '{identifier}' does not match payload username '{username}'")]
    IdentifierMismatch { identifier: String, username: String },

    /// No active profile exists for the identifier
    #[error("User not found: '{0}'")]
    UserNotFound(String),

    /// The movie reference does not resolve to a catalog entry
    #[error("Movie not found: '{0}'")]
    MovieNotFound(String),

    /// The movie is already in the user's favorites
    #[error("Movie '{movie_id}' is already a favorite of '{username}'")]
    AlreadyFavorited { username: String, movie_id: String },

    /// The movie is not in the user's favorites
    #[error("Movie '{movie_id}' is not a favorite of '{username}'")]
    NotFavorited { username: String, movie_id: String },

    /// Optimistic-concurrency failure reported by storage
    #[error("Storage conflict on '{id}': expected revision {expected}")]
    StorageConflict { id: String, expected: u64 },

    /// Username already taken (case-insensitive)
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Login failed. Deliberately does not say which half was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (repository/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CinedexError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an optimistic-concurrency conflict
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::StorageConflict { .. })
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Check if this error indicates a user, movie or other entity was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::UserNotFound(_) | Self::MovieNotFound(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for CinedexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for CinedexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CinedexError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for CinedexError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, CinedexError>`.
pub type Result<T> = std::result::Result<T, CinedexError>;
