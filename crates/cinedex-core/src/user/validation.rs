//! Field rules shared by registration and profile updates.

use regex::Regex;
use std::sync::LazyLock;

use crate::credential::MAX_PASSWORD_BYTES;
use crate::error::{CinedexError, Result};

/// Minimum username length, in characters.
pub const MIN_USERNAME_LEN: usize = 5;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Usernames are at least five ASCII letters or digits.
pub fn validate_username(username: &str) -> Result<()> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Err(CinedexError::invalid_input(
            "username",
            format!("Username must be at least {} characters long", MIN_USERNAME_LEN),
        ));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CinedexError::invalid_input(
            "username",
            "Username contains non-alphanumeric characters - not allowed.",
        ));
    }
    Ok(())
}

/// Passwords must be present and fit in what bcrypt reads. The value is
/// never echoed back.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(CinedexError::invalid_input("password", "Password is required"));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(CinedexError::invalid_input(
            "password",
            format!("Password must be at most {} bytes long", MAX_PASSWORD_BYTES),
        ));
    }
    Ok(())
}

/// Emails must look like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_SHAPE.is_match(email) {
        return Err(CinedexError::invalid_input(
            "email",
            "Email does not appear to be valid",
        ));
    }
    Ok(())
}
