//! `TmdbEndpoint` - request descriptions for the TMDB API.

use reqwest::Method;

use super::params::{
    DiscoverMoviesParams, QueryPairs, SearchKeywordsParams, SearchMoviesParams,
    SearchPeopleParams,
};

/// How the request payload is encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTask {
    /// URL query string.
    Query(QueryPairs),
}

/// A TMDB API request: path, method, and payload.
///
/// Headers and the base URL are owned by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbEndpoint {
    /// `discover/movie`
    DiscoverMovies(DiscoverMoviesParams),
    /// `genre/movie/list`
    MovieGenres {
        /// Response language.
        language: String,
    },
    /// `search/keyword`
    SearchKeywords(SearchKeywordsParams),
    /// `search/person`
    SearchPeople(SearchPeopleParams),
    /// `search/movie`
    SearchMovies(SearchMoviesParams),
}

impl TmdbEndpoint {
    /// Path relative to the API base URL.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::DiscoverMovies(_) => "discover/movie",
            Self::MovieGenres { .. } => "genre/movie/list",
            Self::SearchKeywords(_) => "search/keyword",
            Self::SearchPeople(_) => "search/person",
            Self::SearchMovies(_) => "search/movie",
        }
    }

    /// HTTP method. Every TMDB read endpoint is a GET.
    #[must_use]
    pub const fn method(&self) -> Method {
        Method::GET
    }

    /// Request payload.
    #[must_use]
    pub fn task(&self) -> RequestTask {
        match self {
            Self::DiscoverMovies(params) => RequestTask::Query(params.to_query()),
            Self::MovieGenres { language } => {
                RequestTask::Query(vec![("language", language.clone())])
            }
            Self::SearchKeywords(params) => RequestTask::Query(params.to_query()),
            Self::SearchPeople(params) => RequestTask::Query(params.to_query()),
            Self::SearchMovies(params) => RequestTask::Query(params.to_query()),
        }
    }
}
