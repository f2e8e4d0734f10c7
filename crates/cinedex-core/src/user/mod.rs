//! User domain module.
//!
//! This module contains the account model and the rules that mutate it:
//! the profile merger (partial updates) and the favorites ledger.
//!
//! # Module Structure
//!
//! - `model`: `UserProfile` and its outward-facing `PublicProfile`
//! - `request`: `NewUser` and `ProfileUpdate` payloads
//! - `validation`: field rules shared by registration and updates
//! - `merge`: coalescing partial updates into a profile
//! - `favorites`: add/remove favorite movie references
//! - `repository`: user repository trait for persistence
//!
//! # Usage
//!
//! ```ignore
//! use cinedex_core::user::{apply_update, add_favorite, remove_favorite};
//! use cinedex_core::user::{UserProfile, ProfileUpdate, UserRepository};
//! ```

pub mod favorites;
pub mod merge;
mod model;
pub mod repository;
mod request;
pub mod validation;

// Re-export public API
pub use favorites::{add_favorite, remove_favorite, require_active};
pub use merge::apply_update;
pub use model::{PublicProfile, UserProfile};
pub use repository::UserRepository;
pub use request::{NewUser, ProfileUpdate};
