//! Mapping from domain errors to HTTP-style status codes.
//!
//! The core never returns status codes. Transports that want them (or a CLI
//! that wants to report them) use [`status_code`].

use cinedex_core::error::CinedexError;

pub fn status_code(error: &CinedexError) -> u16 {
    match error {
        CinedexError::IdentifierMismatch { .. }
        | CinedexError::DuplicateUsername(_)
        | CinedexError::InvalidCredentials => 400,
        CinedexError::UserNotFound(_)
        | CinedexError::MovieNotFound(_)
        | CinedexError::NotFavorited { .. }
        | CinedexError::NotFound { .. } => 404,
        CinedexError::AlreadyFavorited { .. } => 409,
        CinedexError::InvalidInput { .. } => 422,
        _ => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                CinedexError::IdentifierMismatch {
                    identifier: "alice".into(),
                    username: "bob".into(),
                },
                400,
            ),
            (CinedexError::InvalidCredentials, 400),
            (CinedexError::UserNotFound("alice".into()), 404),
            (CinedexError::MovieNotFound("m1".into()), 404),
            (
                CinedexError::NotFavorited {
                    username: "alice".into(),
                    movie_id: "m1".into(),
                },
                404,
            ),
            (
                CinedexError::AlreadyFavorited {
                    username: "alice".into(),
                    movie_id: "m1".into(),
                },
                409,
            ),
            (CinedexError::invalid_input("email", "bad"), 422),
            (
                CinedexError::StorageConflict {
                    id: "u1".into(),
                    expected: 2,
                },
                500,
            ),
            (CinedexError::io("disk full"), 500),
        ];

        for (error, expected) in cases {
            assert_eq!(status_code(&error), expected, "{}", error);
        }
    }
}
