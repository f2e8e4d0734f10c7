//! Read-only catalog queries.

use cinedex_core::error::{CinedexError, Result};
use cinedex_core::movie::{DirectorSummary, Genre, GenreRepository, MovieRecord, MovieRepository};
use std::sync::Arc;

pub struct CatalogUsecase {
    movie_repository: Arc<dyn MovieRepository>,
    genre_repository: Arc<dyn GenreRepository>,
}

impl CatalogUsecase {
    pub fn new(
        movie_repository: Arc<dyn MovieRepository>,
        genre_repository: Arc<dyn GenreRepository>,
    ) -> Self {
        Self {
            movie_repository,
            genre_repository,
        }
    }

    pub async fn list_movies(&self) -> Result<Vec<MovieRecord>> {
        self.movie_repository.list_all().await
    }

    /// First movie whose title starts with `title`, ignoring case.
    pub async fn movie_by_title(&self, title: &str) -> Result<MovieRecord> {
        self.movie_repository
            .find_by_title(title)
            .await?
            .ok_or_else(|| CinedexError::MovieNotFound(title.trim().to_string()))
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>> {
        self.genre_repository.list_all().await
    }

    pub async fn genre_by_name(&self, name: &str) -> Result<Genre> {
        self.genre_repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| CinedexError::not_found("genre", name.trim()))
    }

    /// Director details taken from the first movie whose director name
    /// contains `name`.
    pub async fn director_by_name(&self, name: &str) -> Result<DirectorSummary> {
        self.movie_repository
            .find_by_director(name)
            .await?
            .map(|movie| movie.director.summary())
            .ok_or_else(|| CinedexError::not_found("director", name.trim()))
    }
}
