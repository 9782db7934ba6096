//! TMDB API response types.

use serde::Deserialize;

// --- Paged envelope ---

/// Paginated response envelope shared by every list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PagedResponse<T> {
    /// Current page number.
    pub page: u32,
    /// Results on this page.
    pub results: Vec<T>,
    /// Total number of pages.
    pub total_pages: u32,
    /// Total number of results.
    pub total_results: u32,
}

/// Response from `discover/movie` and `search/movie`.
pub type MovieListResponse = PagedResponse<TmdbMovie>;

/// Response from `search/person`.
pub type PersonListResponse = PagedResponse<TmdbPerson>;

/// Response from `search/keyword`.
pub type KeywordListResponse = PagedResponse<TmdbKeyword>;

// --- Movie ---

/// A single movie record.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: Option<String>,
    /// Original title.
    pub original_title: Option<String>,
    /// Original language (ISO 639-1).
    pub original_language: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    pub release_date: Option<String>,
    /// Overview text.
    pub overview: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Vote average.
    pub vote_average: Option<f64>,
    /// Vote count.
    pub vote_count: Option<u32>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Adult flag.
    pub adult: Option<bool>,
    /// Video flag.
    pub video: Option<bool>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
}

// --- Person ---

/// A single person record from `search/person`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPerson {
    /// TMDB person ID.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Original name.
    pub original_name: Option<String>,
    /// Gender code (0-3).
    pub gender: Option<u8>,
    /// Department the person is known for (e.g., "Acting").
    pub known_for_department: Option<String>,
    /// Popularity score.
    pub popularity: Option<f64>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Works the person is known for.
    #[serde(default)]
    pub known_for: Vec<TmdbKnownFor>,
}

/// A credit listed under `known_for`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKnownFor {
    /// TMDB ID of the work.
    pub id: u64,
    /// Media type ("movie" or "tv").
    pub media_type: Option<String>,
    /// Movie title (absent for TV).
    pub title: Option<String>,
    /// TV name (absent for movies).
    pub name: Option<String>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Release date.
    pub release_date: Option<String>,
}

// --- Keyword ---

/// A single keyword record from `search/keyword`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbKeyword {
    /// TMDB keyword ID.
    pub id: u64,
    /// Keyword text.
    pub name: String,
}

// --- Genre list ---

/// Response from `genre/movie/list`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenreListResponse {
    /// Movie genres.
    pub genres: Vec<TmdbGenre>,
}

/// Genre entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    /// Genre ID.
    pub id: u32,
    /// Genre name.
    pub name: String,
}

// --- Error Response ---

/// TMDB API error response body.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbErrorResponse {
    /// TMDB error code.
    pub status_code: u32,
    /// Error message.
    pub status_message: String,
    /// Success flag (always false for errors).
    #[serde(default)]
    pub success: bool,
}
