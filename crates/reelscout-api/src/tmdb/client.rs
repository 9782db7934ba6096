//! `TmdbClient` - TMDB API client implementation.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::endpoint::{RequestTask, TmdbEndpoint};
use super::error::TmdbError;
use super::params::{
    DiscoverMoviesParams, SearchKeywordsParams, SearchMoviesParams, SearchPeopleParams,
};
use super::types::{
    GenreListResponse, KeywordListResponse, MovieListResponse, PersonListResponse,
    TmdbErrorResponse,
};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Bearer API token.
    api_token: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_token: Option<String>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API bearer token (required).
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the per-request timeout (default: 10s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_token` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_token = self.api_token.context("api_token is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_token,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Sends the endpoint's request with Bearer auth and decodes the JSON body.
    ///
    /// No retry: every failure is returned to the caller as-is.
    #[instrument(skip_all, fields(path = endpoint.path()))]
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &TmdbEndpoint,
    ) -> Result<T, TmdbError> {
        let path = endpoint.path();
        let url = self
            .base_url
            .join(path)
            .map_err(|source| TmdbError::InvalidRequest { path, source })?;

        let RequestTask::Query(query) = endpoint.task();
        let request = self
            .http_client
            .request(endpoint.method(), url)
            .bearer_auth(&self.api_token)
            .header(ACCEPT, "application/json")
            .query(&query)
            .build()
            .map_err(|source| TmdbError::Encoding { path, source })?;

        tracing::debug!(url = %request.url(), "TMDB API request");

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|source| TmdbError::Transport { path, source })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| TmdbError::Transport { path, source })?;

        if !status.is_success() {
            let message = serde_json::from_str::<TmdbErrorResponse>(&body).map_or(
                body,
                |error_response| {
                    format!(
                        "code={}, message={}",
                        error_response.status_code, error_response.status_message
                    )
                },
            );
            tracing::warn!(status = status.as_u16(), path, "TMDB API returned an error status");
            return Err(TmdbError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| TmdbError::Decoding { path, source })
    }
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all)]
    async fn discover_movies(
        &self,
        params: &DiscoverMoviesParams,
    ) -> Result<MovieListResponse, TmdbError> {
        self.get_json(&TmdbEndpoint::DiscoverMovies(params.clone()))
            .await
    }

    #[instrument(skip_all)]
    async fn search_keywords(
        &self,
        params: &SearchKeywordsParams,
    ) -> Result<KeywordListResponse, TmdbError> {
        self.get_json(&TmdbEndpoint::SearchKeywords(params.clone()))
            .await
    }

    #[instrument(skip_all)]
    async fn search_people(
        &self,
        params: &SearchPeopleParams,
    ) -> Result<PersonListResponse, TmdbError> {
        self.get_json(&TmdbEndpoint::SearchPeople(params.clone()))
            .await
    }

    #[instrument(skip_all)]
    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<MovieListResponse, TmdbError> {
        self.get_json(&TmdbEndpoint::SearchMovies(params.clone()))
            .await
    }

    #[instrument(skip_all)]
    async fn movie_genres(&self, language: &str) -> Result<GenreListResponse, TmdbError> {
        self.get_json(&TmdbEndpoint::MovieGenres {
            language: String::from(language),
        })
        .await
    }
}
