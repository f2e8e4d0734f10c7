//! Registration and update payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::validation;
use crate::error::Result;

/// Request to register a new user.
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    /// Plaintext password; hashed before it is stored
    pub password: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    /// Validate the request.
    ///
    /// # Errors
    ///
    /// `InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        validation::validate_username(&self.username)?;
        validation::validate_password(&self.password)?;
        validation::validate_email(&self.email)?;
        Ok(())
    }
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .finish()
    }
}

/// Partial update payload.
///
/// Every field is optional. A field that is absent or empty leaves the
/// current value in place; see [`super::merge::apply_update`].
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    /// Replaces the whole favorites list when non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite_movie_ids: Option<Vec<String>>,
}

impl ProfileUpdate {
    /// The username carried by the payload, if present and non-empty.
    pub fn username(&self) -> Option<&str> {
        non_empty(self.username.as_deref())
    }

    /// The plaintext password carried by the payload, if present and non-empty.
    pub fn password(&self) -> Option<&str> {
        non_empty(self.password.as_deref())
    }

    /// The email carried by the payload, if present and non-empty.
    pub fn email(&self) -> Option<&str> {
        non_empty(self.email.as_deref())
    }

    /// The replacement favorites list, if present and non-empty.
    pub fn favorite_movie_ids(&self) -> Option<&[String]> {
        self.favorite_movie_ids
            .as_deref()
            .filter(|ids| !ids.is_empty())
    }
}

impl fmt::Debug for ProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdate")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("birthday", &self.birthday)
            .field("favorite_movie_ids", &self.favorite_movie_ids)
            .finish()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_read_as_absent() {
        let payload = ProfileUpdate {
            username: Some(String::new()),
            password: Some(String::new()),
            email: Some(String::new()),
            birthday: None,
            favorite_movie_ids: Some(Vec::new()),
        };

        assert_eq!(payload.username(), None);
        assert_eq!(payload.password(), None);
        assert_eq!(payload.email(), None);
        assert_eq!(payload.favorite_movie_ids(), None);
    }

    #[test]
    fn test_debug_hides_password() {
        let payload = ProfileUpdate {
            password: Some("s3cret-value".to_string()),
            ..Default::default()
        };
        let printed = format!("{:?}", payload);
        assert!(!printed.contains("s3cret-value"));

        let new_user = NewUser {
            username: "alice1".to_string(),
            password: "s3cret-value".to_string(),
            email: "alice@example.com".to_string(),
            birthday: None,
        };
        assert!(!format!("{:?}", new_user).contains("s3cret-value"));
    }

    #[test]
    fn test_payload_deserializes_camel_case() {
        let payload: ProfileUpdate = serde_json::from_str(
            r#"{"email":"a@b.com","favoriteMovieIds":["m1","m2"],"birthday":"1990-04-01"}"#,
        )
        .unwrap();

        assert_eq!(payload.email(), Some("a@b.com"));
        assert_eq!(payload.favorite_movie_ids().map(|ids| ids.len()), Some(2));
        assert_eq!(payload.birthday, NaiveDate::from_ymd_opt(1990, 4, 1));
    }

    #[test]
    fn test_new_user_validate() {
        let mut request = NewUser {
            username: "alice1".to_string(),
            password: "pw".to_string(),
            email: "alice@example.com".to_string(),
            birthday: None,
        };
        assert!(request.validate().is_ok());

        request.email = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }
}
