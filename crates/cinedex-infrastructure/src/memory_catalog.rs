//! In-memory movie and genre catalog.

use crate::dto::CatalogFile;
use crate::lookup::TextMatcher;
use async_trait::async_trait;
use cinedex_core::error::Result;
use cinedex_core::movie::{Genre, GenreRepository, MovieRecord, MovieRepository};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Catalog held in memory, in insertion order.
///
/// Implements both [`MovieRepository`] and [`GenreRepository`]. Typically
/// filled from a [`CatalogFile`] via [`crate::catalog_seed`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    movies: Arc<RwLock<Vec<MovieRecord>>>,
    genres: Arc<RwLock<Vec<Genre>>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(catalog: CatalogFile) -> Self {
        Self {
            movies: Arc::new(RwLock::new(catalog.movies)),
            genres: Arc::new(RwLock::new(catalog.genres)),
        }
    }

    /// Adds or replaces a movie (matched by id).
    pub async fn upsert_movie(&self, movie: MovieRecord) {
        let mut movies = self.movies.write().await;
        match movies.iter_mut().find(|m| m.id == movie.id) {
            Some(existing) => *existing = movie,
            None => movies.push(movie),
        }
    }

    /// Removes a movie. Favorites pointing at it are left as they are.
    pub async fn remove_movie(&self, movie_id: &str) -> bool {
        let mut movies = self.movies.write().await;
        let before = movies.len();
        movies.retain(|m| m.id != movie_id);
        movies.len() != before
    }

    pub async fn upsert_genre(&self, genre: Genre) {
        let mut genres = self.genres.write().await;
        match genres.iter_mut().find(|g| g.id == genre.id) {
            Some(existing) => *existing = genre,
            None => genres.push(genre),
        }
    }
}

#[async_trait]
impl MovieRepository for InMemoryCatalog {
    async fn find_by_id(&self, movie_id: &str) -> Result<Option<MovieRecord>> {
        let movies = self.movies.read().await;
        Ok(movies.iter().find(|m| m.id == movie_id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<MovieRecord>> {
        let matcher = TextMatcher::prefix(title)?;
        let movies = self.movies.read().await;
        tracing::debug!("Looking up movie by title prefix {:?}", title);
        Ok(movies.iter().find(|m| matcher.is_match(&m.title)).cloned())
    }

    async fn find_by_director(&self, name: &str) -> Result<Option<MovieRecord>> {
        let matcher = TextMatcher::contains(name)?;
        let movies = self.movies.read().await;
        Ok(movies
            .iter()
            .find(|m| matcher.is_match(&m.director.name))
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.movies.read().await.clone())
    }
}

#[async_trait]
impl GenreRepository for InMemoryCatalog {
    async fn find_by_id(&self, genre_id: &str) -> Result<Option<Genre>> {
        let genres = self.genres.read().await;
        Ok(genres.iter().find(|g| g.id == genre_id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>> {
        let matcher = TextMatcher::prefix(name)?;
        let genres = self.genres.read().await;
        Ok(genres.iter().find(|g| matcher.is_match(&g.name)).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_seed::default_catalog;

    async fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::from_catalog(default_catalog().unwrap())
    }

    #[tokio::test]
    async fn test_find_by_title_prefix() {
        let catalog = catalog().await;

        let movie = catalog.find_by_title("the godf").await.unwrap().unwrap();
        assert_eq!(movie.id, "the-godfather");

        assert!(catalog.find_by_title("godfather").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_director_substring() {
        let catalog = catalog().await;

        let movie = catalog.find_by_director("nolan").await.unwrap().unwrap();
        assert_eq!(movie.director.name, "Christopher Nolan");
        assert!(catalog.find_by_director("Kubrick").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_genre_lookup() {
        let catalog = catalog().await;

        let genre = GenreRepository::find_by_name(&catalog, "sci")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(genre.id, "sci-fi");

        let by_id = GenreRepository::find_by_id(&catalog, "drama").await.unwrap();
        assert_eq!(by_id.map(|g| g.name), Some("Drama".to_string()));
    }

    #[tokio::test]
    async fn test_remove_movie() {
        let catalog = catalog().await;

        assert!(catalog.remove_movie("inception").await);
        assert!(!catalog.remove_movie("inception").await);
        assert!(MovieRepository::find_by_id(&catalog, "inception")
            .await
            .unwrap()
            .is_none());
    }
}
