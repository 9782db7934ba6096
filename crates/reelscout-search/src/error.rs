//! User-facing search errors.

use reelscout_api::tmdb::TmdbError;

/// Title shown above every search error message.
pub const ERROR_TITLE: &str = "NOTICE";

/// Screen an error is rendered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorScreen {
    /// Result list.
    Results,
    /// Input screen (history and suggestions).
    Input,
}

/// Errors surfaced to the user by result and input screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum SearchError {
    /// Nothing to show.
    #[error("no data")]
    NoData,
    /// A request failed.
    #[error("fetch failed")]
    FetchFailed,
}

impl SearchError {
    /// Message shown for this error on `screen`.
    #[must_use]
    pub const fn message(self, screen: ErrorScreen) -> &'static str {
        match (self, screen) {
            (Self::NoData, ErrorScreen::Results) => "No Result, Try Another search keyword",
            (Self::NoData, ErrorScreen::Input) => "No Search History",
            (Self::FetchFailed, _) => "Something Wrong. Try Again Later...",
        }
    }
}

impl From<&TmdbError> for SearchError {
    fn from(_: &TmdbError) -> Self {
        Self::FetchFailed
    }
}
