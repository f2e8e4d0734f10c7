//! Credential guard.
//!
//! Turns plaintext passwords into storable secrets, verifies login attempts
//! against them, and strips secrets from profiles before they leave the core.

use std::fmt;

use crate::error::{CinedexError, Result};
use crate::user::validation::validate_password;
use crate::user::{PublicProfile, UserProfile};

/// Lowest and highest cost accepted by bcrypt.
pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

/// Cost used when nothing is configured.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// bcrypt only reads this many bytes of input. Longer passwords are refused
/// rather than silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// One-way hashed representation of a password.
///
/// The wrapped string is a self-describing hash (algorithm, cost and salt are
/// embedded), so verification needs nothing else. `Debug` never prints it,
/// and it is not serializable: storage goes through [`Secret::as_hashed`].
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wraps an already-hashed value loaded from storage.
    pub fn from_hashed(hashed: impl Into<String>) -> Self {
        Self(hashed.into())
    }

    /// Returns the hashed value for persistence.
    pub fn as_hashed(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(<redacted>)")
    }
}

/// Hashes and verifies passwords.
///
/// Implementations must salt every call, so hashing the same plaintext twice
/// yields two different secrets that both verify.
pub trait CredentialGuard: Send + Sync {
    /// Hashes a plaintext password.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the plaintext is empty or longer than
    /// [`MAX_PASSWORD_BYTES`].
    fn hash(&self, plaintext: &str) -> Result<Secret>;

    /// Returns true iff `plaintext` reproduces `secret`.
    ///
    /// Never fails: a malformed secret simply does not verify.
    fn verify(&self, plaintext: &str, secret: &Secret) -> bool;
}

/// bcrypt-backed guard.
#[derive(Debug, Clone, Copy)]
pub struct BcryptGuard {
    cost: u32,
}

impl BcryptGuard {
    /// Creates a guard with the given work factor.
    ///
    /// # Errors
    ///
    /// `Config` when `cost` is outside what bcrypt accepts.
    pub fn new(cost: u32) -> Result<Self> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
            return Err(CinedexError::config(format!(
                "bcrypt cost must be between {} and {}, got {}",
                MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
            )));
        }
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptGuard {
    fn default() -> Self {
        Self {
            cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl CredentialGuard for BcryptGuard {
    fn hash(&self, plaintext: &str) -> Result<Secret> {
        validate_password(plaintext)?;

        // The bcrypt error never includes the input, only the failure kind.
        let hashed = bcrypt::hash(plaintext, self.cost)
            .map_err(|e| CinedexError::internal(format!("Failed to hash password: {}", e)))?;
        Ok(Secret(hashed))
    }

    fn verify(&self, plaintext: &str, secret: &Secret) -> bool {
        // No stored secret can come from an over-long plaintext.
        if plaintext.len() > MAX_PASSWORD_BYTES {
            return false;
        }
        bcrypt::verify(plaintext, &secret.0).unwrap_or(false)
    }
}

/// Returns the outward-facing copy of a profile, with the secret removed.
///
/// `PublicProfile` has no secret field at all, so nothing downstream can
/// serialize one by accident.
pub fn redact(profile: &UserProfile) -> PublicProfile {
    PublicProfile {
        id: profile.id.clone(),
        username: profile.username.clone(),
        email: profile.email.clone(),
        birthday: profile.birthday,
        favorite_movie_ids: profile.favorite_movie_ids.clone(),
    }
}
