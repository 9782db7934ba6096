//! Transport-level error taxonomy.

/// Errors returned by TMDB requests.
#[derive(Debug, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum TmdbError {
    /// The request URL could not be built.
    #[error("invalid request URL for {path}: {source}")]
    InvalidRequest {
        /// Endpoint path.
        path: &'static str,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request (headers, query string) could not be encoded.
    #[error("failed to encode request for {path}: {source}")]
    Encoding {
        /// Endpoint path.
        path: &'static str,
        /// Underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode JSON response from {path}: {source}")]
    Decoding {
        /// Endpoint path.
        path: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Network failure, timeout, or unreadable body.
    #[error("request failed for {path}: {source}")]
    Transport {
        /// Endpoint path.
        path: &'static str,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// TMDB answered with a non-success status.
    #[error("TMDB API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// `status_message` from the body, or the raw body.
        message: String,
    },
}

impl TmdbError {
    /// Returns true for network-layer failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
