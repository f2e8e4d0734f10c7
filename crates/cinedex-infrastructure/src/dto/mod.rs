//! On-disk representations.
//!
//! Domain models stay free of storage concerns; these DTOs carry the
//! persisted shape and convert to and from the domain.

mod catalog;
mod user;

pub use catalog::CatalogFile;
pub use user::{UserRecord, USER_RECORD_SCHEMA_VERSION};
