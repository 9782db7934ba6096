//! Search pipeline for reelscout.
//!
//! Decides which TMDB endpoint serves a result screen, pages through the
//! replies, builds as-you-type suggestions, and remembers recent selections.
//! Result and input screens run as actor tasks that publish snapshots over
//! `tokio::sync::watch`.

/// Search categories and modes.
pub mod category;
/// Endpoint selection and reply parsing.
pub mod dispatcher;
mod error;
/// Recent-search history.
pub mod history;
/// Input screen session.
pub mod input;
/// Display items.
pub mod item;
/// Result list state machine.
pub mod pagination;
/// Result screen actor.
pub mod results;

#[cfg(test)]
mod testing;

pub use category::{SearchCategory, SearchContext, SearchIcon, SearchMode};
pub use dispatcher::{SearchDispatcher, SearchRequest, SearchResponse};
#[allow(clippy::module_name_repetitions)]
pub use error::{ERROR_TITLE, ErrorScreen, SearchError};
pub use history::{HistoryBackend, HistoryStore, SearchHistoryItem};
pub use input::{InputOptions, InputSnapshot, SearchInputHandle, SectionKind, spawn_search_input};
pub use item::{DisplayItem, SearchTarget, SuggestionItem};
pub use pagination::{FetchAction, LayoutType, ResultSnapshot, SearchResultController};
pub use results::{SearchResultHandle, spawn_search_results};
