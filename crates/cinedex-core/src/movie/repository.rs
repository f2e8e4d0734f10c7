//! Catalog repository traits.
//!
//! Defines the lookups the account rules and catalog queries need from the
//! movie store of record.

use super::model::{Genre, MovieRecord};
use crate::error::Result;

/// Read access to movies.
///
/// # Implementation Notes
///
/// Title and director lookups are case-insensitive and must treat the
/// caller's text literally (no pattern injection).
#[async_trait::async_trait]
pub trait MovieRepository: Send + Sync {
    /// Finds a movie by its id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(MovieRecord))`: Movie found
    /// - `Ok(None)`: No movie with that id
    /// - `Err(CinedexError)`: Error occurred during retrieval
    async fn find_by_id(&self, movie_id: &str) -> Result<Option<MovieRecord>>;

    /// Finds the first movie whose title starts with `title`, ignoring case.
    async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>>;

    /// Finds the first movie whose director name contains `name`, ignoring case.
    async fn find_by_director(&self, name: &str) -> Result<Option<MovieRecord>>;

    /// Lists every movie in catalog order.
    async fn list_all(&self) -> Result<Vec<MovieRecord>>;
}

/// Read access to genres.
#[async_trait::async_trait]
pub trait GenreRepository: Send + Sync {
    /// Finds a genre by its id.
    async fn find_by_id(&self, genre_id: &str) -> Result<Option<Genre>>;

    /// Finds the first genre whose name starts with `name`, ignoring case.
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>>;

    /// Lists every genre.
    async fn list_all(&self) -> Result<Vec<Genre>>;
}
