//! Movie catalog domain models.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Director details embedded in a movie record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    pub name: String,
    #[serde(default)]
    pub bio: String,
    /// Birth date, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<NaiveDate>,
    /// Death date; `None` when unknown or living
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death: Option<NaiveDate>,
}

impl Director {
    /// Projects the director into the year-only view returned by director lookups.
    pub fn summary(&self) -> DirectorSummary {
        DirectorSummary {
            name: self.name.clone(),
            bio: self.bio.clone(),
            birth_year: self.birth.map(|d| d.year()),
            death_year: self.death.map(|d| d.year()),
        }
    }
}

/// Year-only view of a director.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectorSummary {
    pub name: String,
    pub bio: String,
    pub birth_year: Option<i32>,
    pub death_year: Option<i32>,
}

/// A genre in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A movie in the catalog.
///
/// User profiles reference movies by `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Ids of the genres this movie belongs to
    #[serde(default)]
    pub genre_refs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub featured: bool,
    // Kept last so TOML writes it as a trailing sub-table.
    pub director: Director,
}
