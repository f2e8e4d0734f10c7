//! Favorites ledger.
//!
//! Incremental add/remove of favorite movie references. Both operations
//! reject redundant calls with a typed error instead of silently succeeding.

use super::model::UserProfile;
use crate::error::{CinedexError, Result};
use crate::movie::MovieRecord;

/// Returns the profile, or `UserNotFound` if storage had nothing for `identifier`.
///
/// Deleted profiles are removed from storage, so they arrive here as `None`
/// exactly like profiles that never existed.
pub fn require_active(identifier: &str, profile: Option<UserProfile>) -> Result<UserProfile> {
    profile.ok_or_else(|| CinedexError::UserNotFound(identifier.trim().to_string()))
}

/// Appends `movie_id` to the profile's favorites.
///
/// `resolved` is the result of looking `movie_id` up in the catalog.
///
/// # Errors
///
/// - `MovieNotFound` if the lookup found nothing (or a different movie)
/// - `AlreadyFavorited` if the id is already in the list
pub fn add_favorite(
    profile: &UserProfile,
    movie_id: &str,
    resolved: Option<&MovieRecord>,
) -> Result<UserProfile> {
    match resolved {
        Some(movie) if movie.id == movie_id => {}
        _ => return Err(CinedexError::MovieNotFound(movie_id.to_string())),
    }

    if profile.has_favorite(movie_id) {
        return Err(CinedexError::AlreadyFavorited {
            username: profile.username.clone(),
            movie_id: movie_id.to_string(),
        });
    }

    let mut updated = profile.clone();
    updated.favorite_movie_ids.push(movie_id.to_string());
    Ok(updated)
}

/// Removes `movie_id` from the profile's favorites.
///
/// Does not consult the catalog, so references to deleted movies can still
/// be removed.
///
/// # Errors
///
/// `NotFavorited` if the id is not in the list.
pub fn remove_favorite(profile: &UserProfile, movie_id: &str) -> Result<UserProfile> {
    let position = profile
        .favorite_movie_ids
        .iter()
        .position(|id| id == movie_id)
        .ok_or_else(|| CinedexError::NotFavorited {
            username: profile.username.clone(),
            movie_id: movie_id.to_string(),
        })?;

    let mut updated = profile.clone();
    updated.favorite_movie_ids.remove(position);
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::Secret;
    use crate::movie::Director;

    fn profile(favorites: &[&str]) -> UserProfile {
        UserProfile {
            id: "u-1".to_string(),
            username: "alice".to_string(),
            secret: Secret::from_hashed("stored"),
            email: "alice@example.com".to_string(),
            birthday: None,
            favorite_movie_ids: favorites.iter().map(|s| s.to_string()).collect(),
            revision: 0,
        }
    }

    fn movie(id: &str) -> MovieRecord {
        MovieRecord {
            id: id.to_string(),
            title: format!("Movie {}", id),
            description: String::new(),
            genre_refs: Vec::new(),
            director: Director {
                name: "Someone".to_string(),
                bio: String::new(),
                birth: None,
                death: None,
            },
            image_path: None,
            featured: false,
        }
    }

    #[test]
    fn test_add_then_add_again() {
        let m1 = movie("m1");
        let first = add_favorite(&profile(&[]), "m1", Some(&m1)).unwrap();
        assert_eq!(first.favorite_movie_ids, vec!["m1"]);

        let err = add_favorite(&first, "m1", Some(&m1)).unwrap_err();
        assert_eq!(
            err,
            CinedexError::AlreadyFavorited {
                username: "alice".to_string(),
                movie_id: "m1".to_string(),
            }
        );
        assert_eq!(first.favorite_movie_ids, vec!["m1"]);
    }

    #[test]
    fn test_add_appends_at_end() {
        let m3 = movie("m3");
        let updated = add_favorite(&profile(&["m1", "m2"]), "m3", Some(&m3)).unwrap();
        assert_eq!(updated.favorite_movie_ids, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_add_unknown_movie() {
        let err = add_favorite(&profile(&[]), "m404", None).unwrap_err();
        assert_eq!(err, CinedexError::MovieNotFound("m404".to_string()));

        let other = movie("m2");
        let err = add_favorite(&profile(&[]), "m1", Some(&other)).unwrap_err();
        assert_eq!(err, CinedexError::MovieNotFound("m1".to_string()));
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let original = profile(&["m1", "m2"]);
        let m5 = movie("m5");

        let added = add_favorite(&original, "m5", Some(&m5)).unwrap();
        let removed = remove_favorite(&added, "m5").unwrap();

        assert_eq!(removed.favorite_movie_ids, original.favorite_movie_ids);
    }

    #[test]
    fn test_remove_middle_keeps_order() {
        let removed = remove_favorite(&profile(&["m1", "m2", "m3"]), "m2").unwrap();
        assert_eq!(removed.favorite_movie_ids, vec!["m1", "m3"]);
    }

    #[test]
    fn test_remove_never_added() {
        let original = profile(&["m1"]);
        let err = remove_favorite(&original, "m2").unwrap_err();

        assert!(matches!(err, CinedexError::NotFavorited { .. }));
        assert_eq!(original.favorite_movie_ids, vec!["m1"]);
    }

    #[test]
    fn test_require_active() {
        let err = require_active("ghost", None).unwrap_err();
        assert_eq!(err, CinedexError::UserNotFound("ghost".to_string()));

        let found = require_active("alice", Some(profile(&[]))).unwrap();
        assert_eq!(found.username, "alice");
    }
}
