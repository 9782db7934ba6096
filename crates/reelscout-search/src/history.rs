//! Recent-search history persisted as one JSON document.

use anyhow::{Context, Result};
use reelscout_db::KvStore;
use serde::{Deserialize, Serialize};

use crate::category::SearchCategory;
use crate::item::{
    ActorInfo, ActorSuggestion, HashtagInfo, HashtagSuggestion, KeywordSuggestion, SuggestionItem,
};

/// Storage key of the history document.
pub const HISTORY_KEY: &str = "searchHistory";

/// Maximum number of remembered entries.
pub const MAX_HISTORY: usize = 5;

/// Where the history document lives.
pub trait HistoryBackend {
    /// Reads the raw document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be written.
    fn store(&self, key: &str, value: &str) -> Result<()>;
}

impl HistoryBackend for KvStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.get(key)
    }

    fn store(&self, key: &str, value: &str) -> Result<()> {
        self.set(key, value)
    }
}

/// One remembered selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::module_name_repetitions)]
pub struct SearchHistoryItem {
    /// Category of the selection.
    pub category: SearchCategory,
    /// Selection was a "search as" option.
    pub is_search_option: bool,
    /// Entity ID, absent for keywords and options.
    pub id: Option<u64>,
    /// Entity name or typed text.
    pub name: Option<String>,
    /// Person profile image path.
    pub profile_path: Option<String>,
    /// Person department.
    pub known_for_department: Option<String>,
}

/// Entries match when their kinds match and then by name for keywords,
/// by id otherwise. Two id-less hashtag or actor options compare by name,
/// so options typed for different text are kept as separate entries.
impl PartialEq for SearchHistoryItem {
    fn eq(&self, other: &Self) -> bool {
        if !self.category.same_kind(&other.category) {
            return false;
        }
        match (&self.category, self.id, other.id) {
            (SearchCategory::Keyword(_), _, _) | (_, None, None) => self.name == other.name,
            (_, l, r) => l == r,
        }
    }
}

impl Eq for SearchHistoryItem {}

impl SearchHistoryItem {
    /// Entry for typed text searched as movie titles.
    #[must_use]
    pub fn keyword(text: &str) -> Self {
        SuggestionItem::Keyword(KeywordSuggestion {
            keyword: String::from(text),
            is_search_option: false,
            is_from_history: false,
        })
        .into()
    }

    /// Rebuilds the input-screen row for this entry.
    #[must_use]
    pub fn to_suggestion(&self) -> Option<SuggestionItem> {
        match self.category {
            SearchCategory::Hashtag(_) => Some(SuggestionItem::Hashtag(HashtagSuggestion {
                hashtag: Some(HashtagInfo {
                    id: self.id,
                    name: self.name.clone(),
                }),
                keyword: String::new(),
                is_search_option: self.is_search_option,
                is_from_history: true,
            })),
            SearchCategory::Actor(_) => {
                let actor = self.id.map(|id| ActorInfo {
                    id,
                    name: self.name.clone(),
                    profile_path: self.profile_path.clone(),
                    known_for_department: self.known_for_department.clone(),
                });
                let keyword = if actor.is_some() {
                    String::new()
                } else {
                    self.name.clone().unwrap_or_default()
                };
                Some(SuggestionItem::Actor(ActorSuggestion {
                    actor,
                    keyword,
                    is_search_option: self.is_search_option,
                    is_from_history: true,
                }))
            }
            SearchCategory::Keyword(_) => Some(SuggestionItem::Keyword(KeywordSuggestion {
                keyword: self.name.clone().unwrap_or_default(),
                is_search_option: false,
                is_from_history: true,
            })),
            SearchCategory::None => None,
        }
    }
}

impl From<&SuggestionItem> for SearchHistoryItem {
    fn from(item: &SuggestionItem) -> Self {
        let category = item.category();
        let is_search_option = item.is_search_option();
        match item {
            SuggestionItem::Actor(s) => {
                let actor = s.actor.as_ref();
                Self {
                    category,
                    is_search_option,
                    id: actor.map(|a| a.id),
                    name: actor
                        .and_then(|a| a.name.clone())
                        .or_else(|| Some(s.keyword.clone())),
                    profile_path: actor.and_then(|a| a.profile_path.clone()),
                    known_for_department: actor.and_then(|a| a.known_for_department.clone()),
                }
            }
            SuggestionItem::Hashtag(s) => {
                let hashtag = s.hashtag.as_ref();
                let name = if s.is_search_option && !s.keyword.is_empty() {
                    Some(s.keyword.clone())
                } else {
                    hashtag
                        .and_then(|h| h.name.clone())
                        .or_else(|| Some(s.keyword.clone()))
                };
                Self {
                    category,
                    is_search_option,
                    id: if s.is_search_option {
                        None
                    } else {
                        hashtag.and_then(|h| h.id)
                    },
                    name,
                    profile_path: None,
                    known_for_department: None,
                }
            }
            SuggestionItem::Keyword(s) => Self {
                category,
                is_search_option,
                id: None,
                name: Some(s.keyword.clone()),
                profile_path: None,
                known_for_department: None,
            },
        }
    }
}

impl From<SuggestionItem> for SearchHistoryItem {
    fn from(item: SuggestionItem) -> Self {
        Self::from(&item)
    }
}

/// Most-recent-first history, persisted on every change.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct HistoryStore<B> {
    backend: B,
    items: Vec<SearchHistoryItem>,
}

impl<B: HistoryBackend> HistoryStore<B> {
    /// Loads the stored history.
    ///
    /// A document that cannot be decoded is logged and treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    pub fn open(backend: B) -> Result<Self> {
        let raw = backend
            .load(HISTORY_KEY)
            .context("failed to load search history")?;
        let items = match raw {
            None => Vec::new(),
            Some(raw) => match serde_json::from_str::<Vec<SearchHistoryItem>>(&raw) {
                Ok(mut items) => {
                    items.truncate(MAX_HISTORY);
                    items
                }
                Err(e) => {
                    tracing::warn!(error = %e, "discarding unreadable search history");
                    Vec::new()
                }
            },
        };
        tracing::debug!(count = items.len(), "search history loaded");
        Ok(Self { backend, items })
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn items(&self) -> &[SearchHistoryItem] {
        &self.items
    }

    /// Backing store.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Moves `item` to the front, dropping an equal entry and the oldest
    /// entries beyond the cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn add(&mut self, item: SearchHistoryItem) -> Result<()> {
        self.items.retain(|existing| *existing != item);
        self.items.insert(0, item);
        self.items.truncate(MAX_HISTORY);
        self.persist()
    }

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.persist()
    }

    /// Entries as input-screen rows.
    #[must_use]
    pub fn list(&self) -> Vec<SuggestionItem> {
        self.items
            .iter()
            .filter_map(SearchHistoryItem::to_suggestion)
            .collect()
    }

    /// Remembers a selected row.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn record_selection(&mut self, item: &SuggestionItem) -> Result<()> {
        self.add(SearchHistoryItem::from(item))
    }

    /// Remembers typed text submitted as a movie title search.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be persisted.
    pub fn record_keyword(&mut self, text: &str) -> Result<()> {
        self.add(SearchHistoryItem::keyword(text))
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.items).context("failed to encode search history")?;
        self.backend
            .store(HISTORY_KEY, &raw)
            .context("failed to save search history")
    }
}
