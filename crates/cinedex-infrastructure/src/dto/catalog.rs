//! Catalog seed file.

use serde::{Deserialize, Serialize};

use cinedex_core::movie::{Genre, MovieRecord};

/// A catalog file: `[[genre]]` and `[[movie]]` tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default, rename = "genre")]
    pub genres: Vec<Genre>,
    #[serde(default, rename = "movie")]
    pub movies: Vec<MovieRecord>,
}
