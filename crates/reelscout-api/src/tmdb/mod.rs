//! TMDB API client module.
//!
//! Describes TMDB v3 list endpoints, sends them with Bearer auth,
//! and decodes the paginated movie, person, and keyword envelopes.

mod api;
mod client;
mod endpoint;
mod error;
mod params;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalTmdbApi, TmdbApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_TIMEOUT, TmdbClient, TmdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use endpoint::{RequestTask, TmdbEndpoint};
#[allow(clippy::module_name_repetitions)]
pub use error::TmdbError;
pub use params::{
    DEFAULT_LANGUAGE, DiscoverMoviesParams, QueryPairs, SearchKeywordsParams, SearchMoviesParams,
    SearchPeopleParams,
};
#[allow(clippy::module_name_repetitions)]
pub use types::{
    GenreListResponse, KeywordListResponse, MovieListResponse, PagedResponse, PersonListResponse,
    TmdbGenre, TmdbKeyword, TmdbKnownFor, TmdbMovie, TmdbPerson,
};

/// Base URL for poster and profile images (500px wide).
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Builds an image URL from a TMDB image path (e.g. `/abc.jpg`).
#[must_use]
pub fn image_url(path: &str) -> String {
    if path.starts_with('/') {
        format!("{IMAGE_BASE_URL}{path}")
    } else {
        format!("{IMAGE_BASE_URL}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_url_with_leading_slash() {
        // Arrange & Act & Assert
        assert_eq!(
            image_url("/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_image_url_without_leading_slash() {
        // Arrange & Act & Assert
        assert_eq!(
            image_url("abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }
}
