//! Search categories and modes.

use serde::{Deserialize, Serialize};

/// Category payload: entity id and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchContext {
    /// Entity ID as sent to TMDB filters.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
}

impl SearchContext {
    /// Creates a context from an optional numeric id and a name.
    #[must_use]
    pub fn new(id: Option<u64>, name: Option<String>) -> Self {
        Self {
            id: id.map(|v| v.to_string()),
            name,
        }
    }

    /// Creates an id-less context carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }
}

/// Which kind of entity a search targets.
///
/// Hashtags and actors are equal when their ids match, keywords when their
/// names match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchCategory {
    /// A TMDB keyword, shown as `#name`.
    Hashtag(SearchContext),
    /// Free text matched against movie titles.
    Keyword(SearchContext),
    /// A person.
    Actor(SearchContext),
    /// No category.
    None,
}

impl PartialEq for SearchCategory {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Hashtag(l), Self::Hashtag(r)) | (Self::Actor(l), Self::Actor(r)) => l.id == r.id,
            (Self::Keyword(l), Self::Keyword(r)) => l.name == r.name,
            (Self::None, Self::None) => true,
            _ => false,
        }
    }
}

impl Eq for SearchCategory {}

impl SearchCategory {
    /// Returns the category payload, if any.
    #[must_use]
    pub const fn context(&self) -> Option<&SearchContext> {
        match self {
            Self::Hashtag(ctx) | Self::Keyword(ctx) | Self::Actor(ctx) => Some(ctx),
            Self::None => None,
        }
    }

    /// Returns true when both values are the same variant, ignoring payloads.
    #[must_use]
    pub const fn same_kind(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Hashtag(_), Self::Hashtag(_))
                | (Self::Keyword(_), Self::Keyword(_))
                | (Self::Actor(_), Self::Actor(_))
                | (Self::None, Self::None)
        )
    }

    /// Title of a result screen opened from a chosen entity.
    #[must_use]
    pub fn result_title(&self) -> String {
        match self {
            Self::Hashtag(ctx) => format!("#{}", ctx.name_or_empty()),
            Self::Keyword(ctx) | Self::Actor(ctx) => String::from(ctx.name_or_empty()),
            Self::None => String::new(),
        }
    }

    /// Title of a "search as this category" option for `keyword`.
    #[must_use]
    pub fn search_option_title(&self, keyword: &str) -> String {
        match self {
            Self::Hashtag(_) => format!("Keywords matching \"{keyword}\""),
            Self::Keyword(_) => format!("Movies matching \"{keyword}\""),
            Self::Actor(_) => format!("Actors matching \"{keyword}\""),
            Self::None => String::new(),
        }
    }

    /// Icon shown next to an input row.
    #[must_use]
    pub const fn icon(&self, is_search_option: bool) -> SearchIcon {
        match self {
            Self::Hashtag(_) if is_search_option => SearchIcon::Magnifier,
            Self::Hashtag(_) => SearchIcon::Number,
            Self::Actor(_) => SearchIcon::People,
            Self::Keyword(_) | Self::None => SearchIcon::Character,
        }
    }
}

/// Icon hint for input rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchIcon {
    /// Magnifying glass.
    Magnifier,
    /// Number sign.
    Number,
    /// Two people.
    People,
    /// Letter glyph.
    Character,
}

/// How a result screen was reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// Browsing results for a chosen entity.
    #[default]
    Discovery,
    /// The user picked "search as <category>" for typed text.
    ExplicitSearch,
}

impl SearchMode {
    /// Maps the "is search option" flag of an input row to a mode.
    #[must_use]
    pub const fn from_search_option(is_search_option: bool) -> Self {
        if is_search_option {
            Self::ExplicitSearch
        } else {
            Self::Discovery
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_hashtag_equality_by_id() {
        // Arrange
        let a = SearchCategory::Hashtag(SearchContext::new(Some(1), Some(String::from("a"))));
        let b = SearchCategory::Hashtag(SearchContext::new(Some(1), Some(String::from("b"))));
        let c = SearchCategory::Hashtag(SearchContext::new(Some(2), Some(String::from("a"))));

        // Act & Assert
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_keyword_equality_by_name() {
        // Arrange
        let a = SearchCategory::Keyword(SearchContext::named("matrix"));
        let b = SearchCategory::Keyword(SearchContext {
            id: Some(String::from("9")),
            name: Some(String::from("matrix")),
        });
        let c = SearchCategory::Keyword(SearchContext::named("speed"));

        // Act & Assert
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_different_variants_are_not_equal() {
        // Arrange
        let actor = SearchCategory::Actor(SearchContext::new(Some(1), None));
        let hashtag = SearchCategory::Hashtag(SearchContext::new(Some(1), None));

        // Act & Assert
        assert_ne!(actor, hashtag);
        assert_ne!(actor, SearchCategory::None);
        assert_eq!(SearchCategory::None, SearchCategory::None);
    }

    #[test]
    fn test_result_title() {
        // Arrange & Act & Assert
        assert_eq!(
            SearchCategory::Hashtag(SearchContext::named("hacker")).result_title(),
            "#hacker"
        );
        assert_eq!(
            SearchCategory::Actor(SearchContext::named("Keanu Reeves")).result_title(),
            "Keanu Reeves"
        );
        assert_eq!(SearchCategory::None.result_title(), "");
    }

    #[test]
    fn test_search_option_title() {
        // Arrange
        let keyword = SearchCategory::Keyword(SearchContext::default());

        // Act & Assert
        assert_eq!(
            keyword.search_option_title("Matrix"),
            "Movies matching \"Matrix\""
        );
        assert_eq!(SearchCategory::None.search_option_title("Matrix"), "");
    }

    #[test]
    fn test_icon() {
        // Arrange
        let hashtag = SearchCategory::Hashtag(SearchContext::default());

        // Act & Assert
        assert_eq!(hashtag.icon(true), SearchIcon::Magnifier);
        assert_eq!(hashtag.icon(false), SearchIcon::Number);
        assert_eq!(
            SearchCategory::Actor(SearchContext::default()).icon(true),
            SearchIcon::People
        );
    }

    #[test]
    fn test_serde_shape() {
        // Arrange
        let category = SearchCategory::Actor(SearchContext::new(Some(6384), None));

        // Act
        let json = serde_json::to_string(&category).unwrap();
        let none_json = serde_json::to_string(&SearchCategory::None).unwrap();

        // Assert
        assert_eq!(json, r#"{"actor":{"id":"6384","name":null}}"#);
        assert_eq!(none_json, r#""none""#);
    }

    #[test]
    fn test_mode_from_search_option() {
        // Arrange & Act & Assert
        assert_eq!(SearchMode::from_search_option(true), SearchMode::ExplicitSearch);
        assert_eq!(SearchMode::from_search_option(false), SearchMode::Discovery);
    }
}
