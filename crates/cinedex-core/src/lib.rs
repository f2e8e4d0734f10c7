//! Account rules for the Cinedex movie catalog.
//!
//! The core is pure and synchronous: it takes values fetched from storage,
//! applies the credential, merge and favorites rules, and hands values back.
//! Storage and transport live in other crates.

pub mod config;
pub mod credential;
pub mod error;
pub mod movie;
pub mod repository;
pub mod user;

// Re-export common error type
pub use error::{CinedexError, Result};
