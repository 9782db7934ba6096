//! Display items: movie results and input suggestions.

use reelscout_api::tmdb::{TmdbKeyword, TmdbMovie, TmdbPerson, image_url};

use crate::category::{SearchCategory, SearchContext, SearchIcon, SearchMode};

/// A movie result row or card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieItem {
    /// TMDB movie ID.
    pub id: u64,
    /// Title.
    pub title: Option<String>,
    /// Release date (`YYYY-MM-DD`).
    pub release_date: Option<String>,
    /// Plot summary.
    pub overview: Option<String>,
    /// Poster path relative to the image base URL.
    pub poster_path: Option<String>,
}

impl From<TmdbMovie> for MovieItem {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date,
            overview: movie.overview,
            poster_path: movie.poster_path,
        }
    }
}

impl MovieItem {
    /// Full poster URL.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        self.poster_path.as_deref().map(image_url)
    }
}

/// Person fields kept for suggestion rows and history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorInfo {
    /// TMDB person ID.
    pub id: u64,
    /// Display name.
    pub name: Option<String>,
    /// Profile image path.
    pub profile_path: Option<String>,
    /// Department the person is known for (e.g. "Acting").
    pub known_for_department: Option<String>,
}

impl From<TmdbPerson> for ActorInfo {
    fn from(person: TmdbPerson) -> Self {
        Self {
            id: person.id,
            name: person.name,
            profile_path: person.profile_path,
            known_for_department: person.known_for_department,
        }
    }
}

/// Hashtag (TMDB keyword entity) fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagInfo {
    /// TMDB keyword ID. Absent for hashtags restored from option history.
    pub id: Option<u64>,
    /// Keyword name.
    pub name: Option<String>,
}

impl From<TmdbKeyword> for HashtagInfo {
    fn from(keyword: TmdbKeyword) -> Self {
        Self {
            id: Some(keyword.id),
            name: Some(keyword.name),
        }
    }
}

/// Person suggestion, or the "search actors" option when `actor` is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSuggestion {
    /// Person, if this row names one.
    pub actor: Option<ActorInfo>,
    /// Typed text.
    pub keyword: String,
    /// Row offers "search as actor" for `keyword`.
    pub is_search_option: bool,
    /// Row was restored from history.
    pub is_from_history: bool,
}

/// Hashtag suggestion, or the "search keywords" option when `hashtag` is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashtagSuggestion {
    /// Hashtag, if this row names one.
    pub hashtag: Option<HashtagInfo>,
    /// Typed text.
    pub keyword: String,
    /// Row offers "search as hashtag" for `keyword`.
    pub is_search_option: bool,
    /// Row was restored from history.
    pub is_from_history: bool,
}

/// Free-text keyword row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSuggestion {
    /// Typed text.
    pub keyword: String,
    /// Row offers "search movies" for `keyword`.
    pub is_search_option: bool,
    /// Row was restored from history.
    pub is_from_history: bool,
}

/// Where a selected suggestion leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTarget {
    /// Category of the result screen.
    pub category: SearchCategory,
    /// Discovery or explicit search.
    pub mode: SearchMode,
    /// Text used by explicit search requests.
    pub query: Option<String>,
}

/// Kind tag for id-less identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuggestionKind {
    /// Actor row.
    Actor,
    /// Hashtag row.
    Hashtag,
    /// Keyword row.
    Keyword,
}

/// Stable identity used when diffing list contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemIdentity {
    /// Movie by TMDB ID.
    Movie(u64),
    /// Person by TMDB ID.
    Person(u64),
    /// Hashtag by TMDB keyword ID.
    Hashtag(u64),
    /// Id-less row keyed by kind and text.
    Text(SuggestionKind, String),
}

/// One row of the input screen or of a people/keyword result list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionItem {
    /// Person row.
    Actor(ActorSuggestion),
    /// Hashtag row.
    Hashtag(HashtagSuggestion),
    /// Keyword row.
    Keyword(KeywordSuggestion),
}

impl SuggestionItem {
    /// Suggestion row for a person returned by TMDB.
    #[must_use]
    pub fn actor(person: TmdbPerson, keyword: &str) -> Self {
        Self::Actor(ActorSuggestion {
            actor: Some(ActorInfo::from(person)),
            keyword: String::from(keyword),
            is_search_option: false,
            is_from_history: false,
        })
    }

    /// Suggestion row for a TMDB keyword entity.
    #[must_use]
    pub fn hashtag(keyword: TmdbKeyword, typed: &str) -> Self {
        Self::Hashtag(HashtagSuggestion {
            hashtag: Some(HashtagInfo::from(keyword)),
            keyword: String::from(typed),
            is_search_option: false,
            is_from_history: false,
        })
    }

    /// The three "search as" options for typed text: keyword, hashtag, actor.
    #[must_use]
    pub fn search_options(text: &str) -> Vec<Self> {
        vec![
            Self::Keyword(KeywordSuggestion {
                keyword: String::from(text),
                is_search_option: true,
                is_from_history: false,
            }),
            Self::Hashtag(HashtagSuggestion {
                hashtag: None,
                keyword: String::from(text),
                is_search_option: true,
                is_from_history: false,
            }),
            Self::Actor(ActorSuggestion {
                actor: None,
                keyword: String::from(text),
                is_search_option: true,
                is_from_history: false,
            }),
        ]
    }

    /// Category this row searches in.
    #[must_use]
    pub fn category(&self) -> SearchCategory {
        match self {
            Self::Actor(s) => SearchCategory::Actor(s.actor.as_ref().map_or_else(
                || SearchContext::named(s.keyword.clone()),
                |a| SearchContext::new(Some(a.id), a.name.clone()),
            )),
            Self::Hashtag(s) => SearchCategory::Hashtag(s.hashtag.as_ref().map_or_else(
                || SearchContext::named(s.keyword.clone()),
                |h| SearchContext::new(h.id, h.name.clone()),
            )),
            Self::Keyword(s) => SearchCategory::Keyword(SearchContext::named(s.keyword.clone())),
        }
    }

    /// Returns true for "search as" option rows.
    #[must_use]
    pub const fn is_search_option(&self) -> bool {
        match self {
            Self::Actor(s) => s.is_search_option,
            Self::Hashtag(s) => s.is_search_option,
            Self::Keyword(s) => s.is_search_option,
        }
    }

    /// Returns true for rows restored from history.
    #[must_use]
    pub const fn is_from_history(&self) -> bool {
        match self {
            Self::Actor(s) => s.is_from_history,
            Self::Hashtag(s) => s.is_from_history,
            Self::Keyword(s) => s.is_from_history,
        }
    }

    /// Typed text carried by the row.
    #[must_use]
    pub fn keyword(&self) -> &str {
        match self {
            Self::Actor(s) => &s.keyword,
            Self::Hashtag(s) => &s.keyword,
            Self::Keyword(s) => &s.keyword,
        }
    }

    /// Replaces the typed text of an option row. Entity rows are unchanged.
    pub fn update_keyword(&mut self, text: &str) {
        match self {
            Self::Actor(s) if s.is_search_option => s.keyword = String::from(text),
            Self::Hashtag(s) if s.is_search_option => s.keyword = String::from(text),
            Self::Keyword(s) => s.keyword = String::from(text),
            Self::Actor(_) | Self::Hashtag(_) => {}
        }
    }

    /// Row title.
    ///
    /// Options read `<Kind> matching "<text>"`; history options fall back to
    /// the stored entity name when no text was typed.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        let category = self.category();
        match self {
            Self::Actor(s) if s.is_search_option => {
                let text = s
                    .actor
                    .as_ref()
                    .and_then(|a| a.name.as_deref())
                    .filter(|_| s.keyword.is_empty())
                    .unwrap_or(&s.keyword);
                Some(category.search_option_title(text))
            }
            Self::Actor(s) => s.actor.as_ref().and_then(|a| a.name.clone()),
            Self::Hashtag(s) if s.is_search_option => {
                let text = s
                    .hashtag
                    .as_ref()
                    .and_then(|h| h.name.as_deref())
                    .filter(|_| s.keyword.is_empty())
                    .unwrap_or(&s.keyword);
                Some(category.search_option_title(text))
            }
            Self::Hashtag(_) => Some(category.result_title()),
            Self::Keyword(s) if s.is_search_option => {
                Some(category.search_option_title(&s.keyword))
            }
            Self::Keyword(s) => Some(s.keyword.clone()),
        }
    }

    /// Row subtitle: the department for named people.
    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        match self {
            Self::Actor(s) if !s.is_search_option => s
                .actor
                .as_ref()
                .and_then(|a| a.known_for_department.clone()),
            _ => None,
        }
    }

    /// Profile image URL for named people.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        match self {
            Self::Actor(s) => s
                .actor
                .as_ref()
                .and_then(|a| a.profile_path.as_deref())
                .map(image_url),
            Self::Hashtag(_) | Self::Keyword(_) => None,
        }
    }

    /// Icon hint.
    #[must_use]
    pub fn icon(&self) -> SearchIcon {
        self.category().icon(self.is_search_option())
    }

    /// Identity for diffing.
    #[must_use]
    pub fn identity(&self) -> ItemIdentity {
        match self {
            Self::Actor(s) => s.actor.as_ref().map_or_else(
                || ItemIdentity::Text(SuggestionKind::Actor, s.keyword.clone()),
                |a| ItemIdentity::Person(a.id),
            ),
            Self::Hashtag(s) => s.hashtag.as_ref().and_then(|h| h.id).map_or_else(
                || ItemIdentity::Text(SuggestionKind::Hashtag, s.keyword.clone()),
                ItemIdentity::Hashtag,
            ),
            Self::Keyword(s) => ItemIdentity::Text(SuggestionKind::Keyword, s.keyword.clone()),
        }
    }

    /// Result screen this row opens, or `None` for an empty keyword row.
    ///
    /// Explicit searches use the typed text, falling back to the stored
    /// entity name for options restored from history.
    #[must_use]
    pub fn search_target(&self) -> Option<SearchTarget> {
        let mode = SearchMode::from_search_option(self.is_search_option());
        let query = match self {
            Self::Actor(s) => {
                let name = s.actor.as_ref().and_then(|a| a.name.clone());
                if s.is_search_option && !s.keyword.is_empty() {
                    Some(s.keyword.clone())
                } else {
                    name.or_else(|| Some(s.keyword.clone()))
                }
            }
            Self::Hashtag(s) => {
                let name = s.hashtag.as_ref().and_then(|h| h.name.clone());
                if s.keyword.is_empty() {
                    name
                } else {
                    Some(s.keyword.clone())
                }
            }
            Self::Keyword(s) if s.keyword.is_empty() => return None,
            Self::Keyword(s) => Some(s.keyword.clone()),
        };
        Some(SearchTarget {
            category: self.category(),
            mode,
            query,
        })
    }
}

/// Any row a result list can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    /// Movie row.
    Movie(MovieItem),
    /// Person or hashtag row.
    Suggestion(SuggestionItem),
}

impl DisplayItem {
    /// Row title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self {
            Self::Movie(m) => m.title.clone(),
            Self::Suggestion(s) => s.title(),
        }
    }

    /// Row subtitle.
    #[must_use]
    pub fn subtitle(&self) -> Option<String> {
        match self {
            Self::Movie(m) => m.release_date.clone(),
            Self::Suggestion(s) => s.subtitle(),
        }
    }

    /// Image URL.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        match self {
            Self::Movie(m) => m.image_url(),
            Self::Suggestion(s) => s.image_url(),
        }
    }

    /// Identity for diffing.
    #[must_use]
    pub fn identity(&self) -> ItemIdentity {
        match self {
            Self::Movie(m) => ItemIdentity::Movie(m.id),
            Self::Suggestion(s) => s.identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use super::*;

    fn person(id: u64, name: &str) -> TmdbPerson {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "known_for_department": "Acting",
            "profile_path": "/p.jpg"
        }))
        .unwrap()
    }

    fn keyword(id: u64, name: &str) -> TmdbKeyword {
        serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
    }

    #[test]
    fn test_movie_item_from_tmdb_movie() {
        // Arrange
        let movie: TmdbMovie = serde_json::from_value(serde_json::json!({
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg"
        }))
        .unwrap();

        // Act
        let item = DisplayItem::Movie(MovieItem::from(movie));

        // Assert
        assert_eq!(item.title().as_deref(), Some("The Matrix"));
        assert_eq!(item.subtitle().as_deref(), Some("1999-03-30"));
        assert_eq!(
            item.image_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg")
        );
        assert_eq!(item.identity(), ItemIdentity::Movie(603));
    }

    #[test]
    fn test_actor_suggestion_display() {
        // Arrange
        let item = SuggestionItem::actor(person(6384, "Keanu Reeves"), "keanu");

        // Act & Assert
        assert_eq!(item.title().as_deref(), Some("Keanu Reeves"));
        assert_eq!(item.subtitle().as_deref(), Some("Acting"));
        assert_eq!(
            item.image_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/p.jpg")
        );
        assert_eq!(item.icon(), SearchIcon::People);
        assert_eq!(item.identity(), ItemIdentity::Person(6384));
    }

    #[test]
    fn test_hashtag_suggestion_display() {
        // Arrange
        let item = SuggestionItem::hashtag(keyword(4565, "matrix"), "mat");

        // Act & Assert
        assert_eq!(item.title().as_deref(), Some("#matrix"));
        assert!(item.subtitle().is_none());
        assert!(item.image_url().is_none());
        assert_eq!(item.icon(), SearchIcon::Number);
        assert_eq!(item.identity(), ItemIdentity::Hashtag(4565));
    }

    #[test]
    fn test_search_options_order_and_titles() {
        // Arrange & Act
        let options = SuggestionItem::search_options("Matrix");
        let titles: Vec<String> = options.iter().filter_map(SuggestionItem::title).collect();

        // Assert
        assert_eq!(
            titles,
            vec![
                "Movies matching \"Matrix\"",
                "Keywords matching \"Matrix\"",
                "Actors matching \"Matrix\"",
            ]
        );
        assert!(options.iter().all(SuggestionItem::is_search_option));
        assert_eq!(options[1].icon(), SearchIcon::Magnifier);
    }

    #[test]
    fn test_option_identities_are_distinct() {
        // Arrange & Act
        let options = SuggestionItem::search_options("x");

        // Assert
        assert_ne!(options[0].identity(), options[1].identity());
        assert_ne!(options[1].identity(), options[2].identity());
    }

    #[test]
    fn test_update_keyword_only_touches_options() {
        // Arrange
        let mut option = SuggestionItem::search_options("a").remove(2);
        let mut actor = SuggestionItem::actor(person(1, "A"), "a");

        // Act
        option.update_keyword("ab");
        actor.update_keyword("ab");

        // Assert
        assert_eq!(option.keyword(), "ab");
        assert_eq!(actor.keyword(), "a");
    }

    #[test]
    fn test_search_target_for_actor_is_discovery() {
        // Arrange
        let item = SuggestionItem::actor(person(6384, "Keanu Reeves"), "keanu");

        // Act
        let target = item.search_target().unwrap();

        // Assert
        assert_eq!(target.mode, SearchMode::Discovery);
        assert_eq!(target.query.as_deref(), Some("Keanu Reeves"));
        assert_eq!(
            target.category.context().unwrap().id.as_deref(),
            Some("6384")
        );
    }

    #[test]
    fn test_search_target_for_option_is_explicit() {
        // Arrange
        let item = SuggestionItem::search_options("Matrix").remove(0);

        // Act
        let target = item.search_target().unwrap();

        // Assert
        assert_eq!(target.mode, SearchMode::ExplicitSearch);
        assert_eq!(target.query.as_deref(), Some("Matrix"));
        assert!(matches!(target.category, SearchCategory::Keyword(_)));
    }

    #[test]
    fn test_search_target_for_empty_keyword_is_none() {
        // Arrange
        let item = SuggestionItem::Keyword(KeywordSuggestion {
            keyword: String::new(),
            is_search_option: false,
            is_from_history: true,
        });

        // Act & Assert
        assert!(item.search_target().is_none());
    }

    #[test]
    fn test_history_hashtag_option_falls_back_to_name() {
        // Arrange
        let item = SuggestionItem::Hashtag(HashtagSuggestion {
            hashtag: Some(HashtagInfo {
                id: None,
                name: Some(String::from("cyberpunk")),
            }),
            keyword: String::new(),
            is_search_option: true,
            is_from_history: true,
        });

        // Act
        let target = item.search_target().unwrap();

        // Assert
        assert_eq!(
            item.title().as_deref(),
            Some("Keywords matching \"cyberpunk\"")
        );
        assert_eq!(target.query.as_deref(), Some("cyberpunk"));
        assert_eq!(target.mode, SearchMode::ExplicitSearch);
    }
}
