//! Persisted user record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cinedex_core::credential::Secret;
use cinedex_core::error::{CinedexError, Result};
use cinedex_core::user::UserProfile;

/// Current on-disk schema version.
pub const USER_RECORD_SCHEMA_VERSION: u32 = 1;

/// One user file (`users/<id>.toml`).
///
/// Unlike [`UserProfile`], this type is serializable and includes the
/// password hash, so it must never leave the storage layer. No `Debug` for
/// the same reason.
#[derive(Clone, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub favorite_movie_ids: Vec<String>,
    #[serde(default)]
    pub revision: u64,
}

fn default_schema_version() -> u32 {
    USER_RECORD_SCHEMA_VERSION
}

impl UserRecord {
    /// Converts to the domain model, rejecting files written by a newer schema.
    pub fn into_domain(self) -> Result<UserProfile> {
        if self.schema_version > USER_RECORD_SCHEMA_VERSION {
            return Err(CinedexError::Serialization {
                format: "TOML".to_string(),
                message: format!(
                    "user record '{}' has schema version {}, newest supported is {}",
                    self.id, self.schema_version, USER_RECORD_SCHEMA_VERSION
                ),
            });
        }

        Ok(UserProfile {
            id: self.id,
            username: self.username,
            secret: Secret::from_hashed(self.password_hash),
            email: self.email,
            birthday: self.birthday,
            favorite_movie_ids: self.favorite_movie_ids,
            revision: self.revision,
        })
    }
}

impl From<&UserProfile> for UserRecord {
    fn from(profile: &UserProfile) -> Self {
        UserRecord {
            schema_version: USER_RECORD_SCHEMA_VERSION,
            id: profile.id.clone(),
            username: profile.username.clone(),
            password_hash: profile.secret.as_hashed().to_string(),
            email: profile.email.clone(),
            birthday: profile.birthday,
            favorite_movie_ids: profile.favorite_movie_ids.clone(),
            revision: profile.revision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_optional_fields() {
        let record: UserRecord = toml::from_str(
            r#"
            id = "u-1"
            username = "alice"
            password_hash = "$2b$04$abcdefghijklmnopqrstuu"
            email = "alice@example.com"
            "#,
        )
        .unwrap();

        let profile = record.into_domain().unwrap();
        assert_eq!(profile.username, "alice");
        assert!(profile.favorite_movie_ids.is_empty());
        assert_eq!(profile.revision, 0);
        assert_eq!(profile.birthday, None);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let record: UserRecord = toml::from_str(
            r#"
            schema_version = 99
            id = "u-1"
            username = "alice"
            password_hash = "x"
            email = "alice@example.com"
            "#,
        )
        .unwrap();

        assert!(record.into_domain().is_err());
    }

    #[test]
    fn test_birthday_written_as_string() {
        let profile = UserProfile {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            secret: Secret::from_hashed("hash"),
            email: "alice@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 4, 1),
            favorite_movie_ids: vec!["m1".to_string()],
            revision: 3,
        };

        let text = toml::to_string_pretty(&UserRecord::from(&profile)).unwrap();
        assert!(text.contains("birthday = \"1990-04-01\""));

        let back: UserRecord = toml::from_str(&text).unwrap();
        assert_eq!(back.into_domain().unwrap(), profile);
    }

    #[test]
    fn test_record_carries_hash_only() {
        let secret = Secret::from_hashed("$2b$04$stored");
        let profile = UserProfile::new(
            "alice".to_string(),
            secret.clone(),
            "alice@example.com".to_string(),
            None,
        );

        let record = UserRecord::from(&profile);
        assert_eq!(record.password_hash, secret.as_hashed());
        assert_eq!(record.into_domain().unwrap().secret, secret);
    }
}
