//! Repository trait re-exports.
//!
//! Storage collaborators implement these; everything else depends on them
//! only through `Arc<dyn ...>`.

pub use crate::movie::{GenreRepository, MovieRepository};
pub use crate::user::UserRepository;
