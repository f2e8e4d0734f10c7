//! Catalog seeding.
//!
//! The movie catalog is owned by an external store of record; this module
//! loads it from a TOML file and ships a small default catalog for fresh
//! installs.

use crate::dto::CatalogFile;
use crate::storage::AtomicTomlFile;
use cinedex_core::error::{CinedexError, Result};
use std::collections::HashSet;
use std::path::Path;

const DEFAULT_CATALOG: &str = include_str!("../catalog/default_catalog.toml");

/// Parses the bundled default catalog.
pub fn default_catalog() -> Result<CatalogFile> {
    let catalog: CatalogFile = toml::from_str(DEFAULT_CATALOG)?;
    check_catalog(&catalog)?;
    Ok(catalog)
}

/// Loads a catalog file, returning `None` if it does not exist.
pub fn load_catalog(path: &Path) -> Result<Option<CatalogFile>> {
    let catalog = AtomicTomlFile::<CatalogFile>::new(path.to_path_buf()).load()?;
    if let Some(catalog) = &catalog {
        check_catalog(catalog)?;
    }
    Ok(catalog)
}

/// Loads the catalog at `path`, writing the default catalog there first if
/// nothing exists yet.
pub fn load_or_seed(path: &Path) -> Result<CatalogFile> {
    let file = AtomicTomlFile::<CatalogFile>::new(path.to_path_buf());
    file.locked(|file| match file.load()? {
        Some(catalog) => {
            check_catalog(&catalog)?;
            Ok(catalog)
        }
        None => {
            let catalog = default_catalog()?;
            file.save(&catalog)?;
            tracing::info!(
                "Seeded default catalog ({} movies, {} genres) at {:?}",
                catalog.movies.len(),
                catalog.genres.len(),
                path
            );
            Ok(catalog)
        }
    })
}

/// Ids must be unique. Unknown genre references are tolerated but logged.
fn check_catalog(catalog: &CatalogFile) -> Result<()> {
    let mut genre_ids = HashSet::new();
    for genre in &catalog.genres {
        if !genre_ids.insert(genre.id.as_str()) {
            return Err(CinedexError::data_access(format!(
                "Duplicate genre id '{}' in catalog",
                genre.id
            )));
        }
    }

    let mut movie_ids = HashSet::new();
    for movie in &catalog.movies {
        if !movie_ids.insert(movie.id.as_str()) {
            return Err(CinedexError::data_access(format!(
                "Duplicate movie id '{}' in catalog",
                movie.id
            )));
        }
        for genre_ref in &movie.genre_refs {
            if !genre_ids.contains(genre_ref.as_str()) {
                tracing::warn!(
                    "Movie '{}' references unknown genre '{}'",
                    movie.id,
                    genre_ref
                );
            }
        }
    }
    Ok(())
}
