//! Movie catalog domain module.
//!
//! The catalog is read-mostly and owned by an external store. The account
//! rules only ever look movies up to validate favorite references.
//!
//! # Module Structure
//!
//! - `model`: `MovieRecord`, `Genre`, `Director` and the `DirectorSummary` view
//! - `repository`: catalog lookup traits

mod model;
pub mod repository;

// Re-export public API
pub use model::{Director, DirectorSummary, Genre, MovieRecord};
pub use repository::{GenreRepository, MovieRepository};
