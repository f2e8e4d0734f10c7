//! Profile merger.
//!
//! Applies a partial update to a stored profile with coalesce semantics:
//! each field in the payload replaces the current value only when it is
//! present and non-empty.

use super::model::UserProfile;
use super::request::ProfileUpdate;
use super::validation;
use crate::credential::CredentialGuard;
use crate::error::{CinedexError, Result};

/// Merges `payload` into a copy of `current`.
///
/// `identifier` is the username the caller addressed. If the payload carries
/// a username it must equal the identifier exactly, otherwise the update is
/// rejected with `IdentifierMismatch`.
///
/// The favorites list in a payload replaces the stored list wholesale
/// (repeated ids are dropped, first occurrence wins). Incremental changes go
/// through [`super::favorites`] instead.
///
/// A non-empty password is hashed with `guard` and replaces the secret.
///
/// Either every field is merged or the call fails before anything is built;
/// `current` is never touched. The result is not persisted.
pub fn apply_update(
    identifier: &str,
    current: &UserProfile,
    payload: &ProfileUpdate,
    guard: &dyn CredentialGuard,
) -> Result<UserProfile> {
    let identifier = identifier.trim();

    if let Some(username) = payload.username() {
        if username != identifier {
            return Err(CinedexError::IdentifierMismatch {
                identifier: identifier.to_string(),
                username: username.to_string(),
            });
        }
        validation::validate_username(username)?;
    }
    if let Some(email) = payload.email() {
        validation::validate_email(email)?;
    }

    let secret = match payload.password() {
        Some(password) => guard.hash(password)?,
        None => current.secret.clone(),
    };

    let favorite_movie_ids = match payload.favorite_movie_ids() {
        Some(ids) => dedup_preserving_order(ids),
        None => current.favorite_movie_ids.clone(),
    };

    Ok(UserProfile {
        id: current.id.clone(),
        username: payload
            .username()
            .map(str::to_string)
            .unwrap_or_else(|| current.username.clone()),
        secret,
        email: payload
            .email()
            .map(str::to_string)
            .unwrap_or_else(|| current.email.clone()),
        birthday: payload.birthday.or(current.birthday),
        favorite_movie_ids,
        revision: current.revision,
    })
}

fn dedup_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter()
        .filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::{BcryptGuard, Secret};
    use chrono::NaiveDate;

    /// Deterministic guard so tests skip bcrypt work.
    struct TaggingGuard;

    impl CredentialGuard for TaggingGuard {
        fn hash(&self, plaintext: &str) -> Result<Secret> {
            if plaintext.is_empty() {
                return Err(CinedexError::invalid_input("password", "Password is required"));
            }
            Ok(Secret::from_hashed(format!("tagged:{}", plaintext.len())))
        }

        fn verify(&self, plaintext: &str, secret: &Secret) -> bool {
            secret.as_hashed() == format!("tagged:{}", plaintext.len())
        }
    }

    fn alice() -> UserProfile {
        UserProfile {
            id: "u-alice".to_string(),
            username: "alice".to_string(),
            secret: Secret::from_hashed("stored-secret"),
            email: "alice@example.com".to_string(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 2),
            favorite_movie_ids: vec!["m1".to_string(), "m2".to_string()],
            revision: 7,
        }
    }

    #[test]
    fn test_email_only_update() {
        let current = alice();
        let payload = ProfileUpdate {
            email: Some("a@b.com".to_string()),
            ..Default::default()
        };

        let merged = apply_update("alice", &current, &payload, &TaggingGuard).unwrap();

        assert_eq!(merged.email, "a@b.com");
        assert_eq!(merged.secret, current.secret);
        assert_eq!(merged.favorite_movie_ids, current.favorite_movie_ids);
        assert_eq!(merged.username, "alice");
        assert_eq!(merged.birthday, current.birthday);
        assert_eq!(merged.revision, 7);
    }

    #[test]
    fn test_username_mismatch_rejected() {
        let current = alice();
        let payload = ProfileUpdate {
            username: Some("bob".to_string()),
            ..Default::default()
        };

        let err = apply_update("alice", &current, &payload, &TaggingGuard).unwrap_err();

        assert_eq!(
            err,
            CinedexError::IdentifierMismatch {
                identifier: "alice".to_string(),
                username: "bob".to_string(),
            }
        );
        assert_eq!(current, alice());
    }

    #[test]
    fn test_matching_username_is_accepted() {
        let payload = ProfileUpdate {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        let merged = apply_update(" alice ", &alice(), &payload, &TaggingGuard).unwrap();
        assert_eq!(merged.username, "alice");
    }

    #[test]
    fn test_absent_password_keeps_secret() {
        let current = alice();
        let payloads = [
            ProfileUpdate::default(),
            ProfileUpdate {
                password: Some(String::new()),
                ..Default::default()
            },
            ProfileUpdate {
                birthday: NaiveDate::from_ymd_opt(2000, 5, 5),
                favorite_movie_ids: Some(vec!["m9".to_string()]),
                ..Default::default()
            },
        ];

        for payload in &payloads {
            let merged = apply_update("alice", &current, payload, &TaggingGuard).unwrap();
            assert_eq!(merged.secret, current.secret);
        }
    }

    #[test]
    fn test_password_is_hashed() {
        let guard = BcryptGuard::new(4).unwrap();
        let payload = ProfileUpdate {
            password: Some("new-password".to_string()),
            ..Default::default()
        };

        let merged = apply_update("alice", &alice(), &payload, &guard).unwrap();

        assert_ne!(merged.secret.as_hashed(), "new-password");
        assert_ne!(merged.secret, alice().secret);
        assert!(guard.verify("new-password", &merged.secret));
    }

    #[test]
    fn test_favorites_replace_not_union() {
        let payload = ProfileUpdate {
            favorite_movie_ids: Some(vec![
                "m3".to_string(),
                "m1".to_string(),
                "m3".to_string(),
            ]),
            ..Default::default()
        };

        let merged = apply_update("alice", &alice(), &payload, &TaggingGuard).unwrap();

        assert_eq!(merged.favorite_movie_ids, vec!["m3", "m1"]);
    }

    #[test]
    fn test_empty_favorites_keep_current() {
        let payload = ProfileUpdate {
            favorite_movie_ids: Some(Vec::new()),
            ..Default::default()
        };
        let merged = apply_update("alice", &alice(), &payload, &TaggingGuard).unwrap();
        assert_eq!(merged.favorite_movie_ids, vec!["m1", "m2"]);
    }

    #[test]
    fn test_invalid_email_fails_before_hashing() {
        let payload = ProfileUpdate {
            email: Some("broken".to_string()),
            password: Some("new-password".to_string()),
            ..Default::default()
        };

        let err = apply_update("alice", &alice(), &payload, &TaggingGuard).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
