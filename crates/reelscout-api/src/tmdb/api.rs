//! `TmdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::TmdbError;
use super::params::{
    DiscoverMoviesParams, SearchKeywordsParams, SearchMoviesParams, SearchPeopleParams,
};
use super::types::{GenreListResponse, KeywordListResponse, MovieListResponse, PersonListResponse};

/// TMDB API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait;
/// implement `TmdbApi` and `LocalTmdbApi` comes for free.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(TmdbApi: Send)]
pub trait LocalTmdbApi {
    /// Lists movies matching cast/keyword filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn discover_movies(
        &self,
        params: &DiscoverMoviesParams,
    ) -> Result<MovieListResponse, TmdbError>;

    /// Searches for keywords.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_keywords(
        &self,
        params: &SearchKeywordsParams,
    ) -> Result<KeywordListResponse, TmdbError>;

    /// Searches for people.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_people(
        &self,
        params: &SearchPeopleParams,
    ) -> Result<PersonListResponse, TmdbError>;

    /// Searches for movies by title.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<MovieListResponse, TmdbError>;

    /// Fetches the official movie genre list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn movie_genres(&self, language: &str) -> Result<GenreListResponse, TmdbError>;
}
