//! Maps (category, mode, query, page) to a TMDB request and parses the reply.

use reelscout_api::tmdb::{
    DEFAULT_LANGUAGE, DiscoverMoviesParams, KeywordListResponse, MovieListResponse,
    PersonListResponse, SearchKeywordsParams, SearchMoviesParams, SearchPeopleParams, TmdbApi,
    TmdbEndpoint, TmdbError,
};

use crate::category::{SearchCategory, SearchMode};
use crate::item::{DisplayItem, MovieItem, SearchTarget, SuggestionItem};

/// A request the dispatcher can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    /// `discover/movie`
    Discover(DiscoverMoviesParams),
    /// `search/keyword`
    Keywords(SearchKeywordsParams),
    /// `search/person`
    People(SearchPeopleParams),
    /// `search/movie`
    Movies(SearchMoviesParams),
}

impl SearchRequest {
    /// Requested page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        match self {
            Self::Discover(p) => p.page,
            Self::Keywords(p) => p.page,
            Self::People(p) => p.page,
            Self::Movies(p) => p.page,
        }
    }

    /// Endpoint description of this request.
    #[must_use]
    pub fn endpoint(&self) -> TmdbEndpoint {
        match self {
            Self::Discover(p) => TmdbEndpoint::DiscoverMovies(p.clone()),
            Self::Keywords(p) => TmdbEndpoint::SearchKeywords(p.clone()),
            Self::People(p) => TmdbEndpoint::SearchPeople(p.clone()),
            Self::Movies(p) => TmdbEndpoint::SearchMovies(p.clone()),
        }
    }
}

/// A decoded reply, tagged by the request that produced it.
#[derive(Debug, Clone)]
pub enum SearchResponse {
    /// Reply to [`SearchRequest::Discover`].
    Discover(MovieListResponse),
    /// Reply to [`SearchRequest::Keywords`].
    Keywords(KeywordListResponse),
    /// Reply to [`SearchRequest::People`].
    People(PersonListResponse),
    /// Reply to [`SearchRequest::Movies`].
    Movies(MovieListResponse),
}

/// One page of display items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Items in server order.
    pub items: Vec<DisplayItem>,
    /// Total pages reported by the server.
    pub total_pages: u32,
    /// Total results reported by the server.
    pub total_results: u32,
    /// Movie lists may switch between list and card layout.
    pub can_switch_layout: bool,
}

/// Picks the request for a result screen.
///
/// Discovery filters by the cast or keyword id of the chosen entity, except
/// a keyword with text, which searches movie titles. Explicit search needs a
/// non-empty query and sends it to the endpoint for the category. Returns
/// `None` when there is nothing to request.
#[must_use]
pub fn determine_request(
    category: &SearchCategory,
    mode: SearchMode,
    query: Option<&str>,
    page: u32,
) -> Option<SearchRequest> {
    let query = query.filter(|q| !q.is_empty());
    match mode {
        SearchMode::Discovery => {
            if let (SearchCategory::Keyword(_), Some(query)) = (category, query) {
                return Some(SearchRequest::Movies(
                    SearchMoviesParams::new(query).page(page),
                ));
            }
            let id = category.context().and_then(|ctx| ctx.id.clone());
            let params = DiscoverMoviesParams::new(page);
            let params = match (category, id) {
                (SearchCategory::Actor(_), Some(id)) => params.with_cast(id),
                (SearchCategory::Hashtag(_), Some(id)) => params.with_keywords(id),
                _ => params,
            };
            Some(SearchRequest::Discover(params))
        }
        SearchMode::ExplicitSearch => {
            let query = query?;
            match category {
                SearchCategory::Hashtag(_) => Some(SearchRequest::Keywords(
                    SearchKeywordsParams::new(query).page(page),
                )),
                SearchCategory::Actor(_) => Some(SearchRequest::People(
                    SearchPeopleParams::new(query).page(page),
                )),
                SearchCategory::Keyword(_) => Some(SearchRequest::Movies(
                    SearchMoviesParams::new(query).page(page),
                )),
                SearchCategory::None => None,
            }
        }
    }
}

/// Sends `request` through `api`.
///
/// # Errors
///
/// Returns the transport error from the API call.
pub async fn execute<A>(api: &A, request: &SearchRequest) -> Result<SearchResponse, TmdbError>
where
    A: TmdbApi + Sync,
{
    match request {
        SearchRequest::Discover(p) => api.discover_movies(p).await.map(SearchResponse::Discover),
        SearchRequest::Keywords(p) => api.search_keywords(p).await.map(SearchResponse::Keywords),
        SearchRequest::People(p) => api.search_people(p).await.map(SearchResponse::People),
        SearchRequest::Movies(p) => api.search_movies(p).await.map(SearchResponse::Movies),
    }
}

/// Converts a reply into display items.
///
/// `keyword` is the query carried into person and hashtag rows.
#[must_use]
pub fn parse_response(response: SearchResponse, keyword: &str) -> ParsedPage {
    match response {
        SearchResponse::Discover(page) | SearchResponse::Movies(page) => ParsedPage {
            items: page
                .results
                .into_iter()
                .map(|m| DisplayItem::Movie(MovieItem::from(m)))
                .collect(),
            total_pages: page.total_pages,
            total_results: page.total_results,
            can_switch_layout: true,
        },
        SearchResponse::People(page) => ParsedPage {
            items: page
                .results
                .into_iter()
                .map(|p| DisplayItem::Suggestion(SuggestionItem::actor(p, keyword)))
                .collect(),
            total_pages: page.total_pages,
            total_results: page.total_results,
            can_switch_layout: false,
        },
        SearchResponse::Keywords(page) => ParsedPage {
            items: page
                .results
                .into_iter()
                .map(|k| DisplayItem::Suggestion(SuggestionItem::hashtag(k, keyword)))
                .collect(),
            total_pages: page.total_pages,
            total_results: page.total_results,
            can_switch_layout: false,
        },
    }
}

/// Per-screen dispatcher state.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchDispatcher {
    category: SearchCategory,
    mode: SearchMode,
    query: Option<String>,
    language: String,
    include_adult: bool,
}

impl SearchDispatcher {
    /// Creates a dispatcher for a result screen.
    #[must_use]
    pub fn new(target: SearchTarget) -> Self {
        Self {
            category: target.category,
            mode: target.mode,
            query: target.query,
            language: String::from(DEFAULT_LANGUAGE),
            include_adult: false,
        }
    }

    /// Overrides the person-search language and adult filter.
    #[must_use]
    pub fn with_people_options(mut self, language: impl Into<String>, include_adult: bool) -> Self {
        self.language = language.into();
        self.include_adult = include_adult;
        self
    }

    /// Category of the screen.
    #[must_use]
    pub const fn category(&self) -> &SearchCategory {
        &self.category
    }

    /// Mode of the screen.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Current query.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Replaces the query used by later requests.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = Some(query.into());
    }

    /// Request for `page`, or `None` when there is nothing to request.
    #[must_use]
    pub fn determine_request(&self, page: u32) -> Option<SearchRequest> {
        let request = determine_request(&self.category, self.mode, self.query(), page)?;
        Some(match request {
            SearchRequest::People(params) => SearchRequest::People(
                params
                    .language(self.language.clone())
                    .include_adult(self.include_adult),
            ),
            other => other,
        })
    }

    /// Screen title.
    #[must_use]
    pub fn navigation_title(&self) -> String {
        match self.mode {
            SearchMode::ExplicitSearch => self
                .category
                .search_option_title(self.query().unwrap_or_default()),
            SearchMode::Discovery => self.category.result_title(),
        }
    }

    /// Parses a reply using the current query as the row keyword.
    #[must_use]
    pub fn parse(&self, response: SearchResponse) -> ParsedPage {
        parse_response(response, self.query().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::indexing_slicing)]

    use reelscout_api::tmdb::PagedResponse;

    use super::*;
    use crate::category::SearchContext;
    use crate::item::ItemIdentity;
    use crate::testing::{MockTmdbApi, keyword, movie, person};

    fn actor(id: u64) -> SearchCategory {
        SearchCategory::Actor(SearchContext::new(Some(id), Some(String::from("Keanu Reeves"))))
    }

    fn hashtag(id: u64) -> SearchCategory {
        SearchCategory::Hashtag(SearchContext::new(Some(id), Some(String::from("hacker"))))
    }

    #[test]
    fn test_discovery_actor_uses_cast_filter() {
        // Arrange & Act
        let request = determine_request(&actor(6384), SearchMode::Discovery, None, 1).unwrap();

        // Assert
        let SearchRequest::Discover(params) = request else {
            panic!("expected discover request");
        };
        assert_eq!(params.with_cast.as_deref(), Some("6384"));
        assert!(params.with_keywords.is_none());
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_discovery_hashtag_uses_keyword_filter() {
        // Arrange & Act
        let request = determine_request(&hashtag(4565), SearchMode::Discovery, None, 2).unwrap();

        // Assert
        let SearchRequest::Discover(params) = request else {
            panic!("expected discover request");
        };
        assert_eq!(params.with_keywords.as_deref(), Some("4565"));
        assert!(params.with_cast.is_none());
        assert_eq!(params.page, 2);
    }

    #[test]
    fn test_discovery_keyword_searches_titles() {
        // Arrange
        let category = SearchCategory::Keyword(SearchContext::named("matrix"));

        // Act
        let request = determine_request(&category, SearchMode::Discovery, Some("matrix"), 1);

        // Assert
        assert_eq!(
            request,
            Some(SearchRequest::Movies(SearchMoviesParams::new("matrix")))
        );
    }

    #[test]
    fn test_discovery_keyword_without_text_has_no_filters() {
        // Arrange
        let category = SearchCategory::Keyword(SearchContext::named("matrix"));

        // Act
        let request = determine_request(&category, SearchMode::Discovery, Some(""), 1);

        // Assert
        assert_eq!(
            request,
            Some(SearchRequest::Discover(DiscoverMoviesParams::new(1)))
        );
    }

    #[test]
    fn test_same_inputs_same_request() {
        // Arrange & Act
        let a = determine_request(&hashtag(9), SearchMode::Discovery, None, 4);
        let b = determine_request(&hashtag(9), SearchMode::Discovery, None, 4);

        // Assert
        assert_eq!(a, b);
    }

    #[test]
    fn test_explicit_search_per_category() {
        // Arrange
        let keyword = SearchCategory::Keyword(SearchContext::default());

        // Act
        let movies = determine_request(&keyword, SearchMode::ExplicitSearch, Some("matrix"), 2);
        let people = determine_request(&actor(1), SearchMode::ExplicitSearch, Some("keanu"), 1);
        let keywords = determine_request(&hashtag(1), SearchMode::ExplicitSearch, Some("mat"), 1);

        // Assert
        assert_eq!(
            movies,
            Some(SearchRequest::Movies(SearchMoviesParams::new("matrix").page(2)))
        );
        assert_eq!(
            people,
            Some(SearchRequest::People(SearchPeopleParams::new("keanu")))
        );
        assert_eq!(
            keywords,
            Some(SearchRequest::Keywords(SearchKeywordsParams::new("mat")))
        );
    }

    #[test]
    fn test_explicit_search_without_query_is_none() {
        // Arrange & Act & Assert
        assert!(determine_request(&actor(1), SearchMode::ExplicitSearch, None, 1).is_none());
        assert!(determine_request(&actor(1), SearchMode::ExplicitSearch, Some(""), 1).is_none());
        assert!(
            determine_request(&SearchCategory::None, SearchMode::ExplicitSearch, Some("x"), 1)
                .is_none()
        );
    }

    #[test]
    fn test_dispatcher_applies_people_options() {
        // Arrange
        let dispatcher = SearchDispatcher::new(SearchTarget {
            category: actor(1),
            mode: SearchMode::ExplicitSearch,
            query: Some(String::from("keanu")),
        })
        .with_people_options("ja-JP", true);

        // Act
        let request = dispatcher.determine_request(3).unwrap();

        // Assert
        let SearchRequest::People(params) = request else {
            panic!("expected people request");
        };
        assert_eq!(params.language, "ja-JP");
        assert!(params.include_adult);
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_navigation_title() {
        // Arrange
        let explicit = SearchDispatcher::new(SearchTarget {
            category: SearchCategory::Keyword(SearchContext::default()),
            mode: SearchMode::ExplicitSearch,
            query: Some(String::from("Matrix")),
        });
        let discovery = SearchDispatcher::new(SearchTarget {
            category: hashtag(4565),
            mode: SearchMode::Discovery,
            query: None,
        });

        // Act & Assert
        assert_eq!(explicit.navigation_title(), "Movies matching \"Matrix\"");
        assert_eq!(discovery.navigation_title(), "#hacker");
    }

    #[test]
    fn test_set_query_changes_next_request() {
        // Arrange
        let mut dispatcher = SearchDispatcher::new(SearchTarget {
            category: SearchCategory::Keyword(SearchContext::default()),
            mode: SearchMode::ExplicitSearch,
            query: Some(String::from("matrix")),
        });

        // Act
        dispatcher.set_query("speed");

        // Assert
        assert_eq!(
            dispatcher.determine_request(1),
            Some(SearchRequest::Movies(SearchMoviesParams::new("speed")))
        );
    }

    #[test]
    fn test_parse_movies_allows_layout_switch() {
        // Arrange
        let response = SearchResponse::Movies(PagedResponse {
            page: 1,
            results: vec![movie(603, "The Matrix"), movie(604, "The Matrix Reloaded")],
            total_pages: 3,
            total_results: 52,
        });

        // Act
        let page = parse_response(response, "matrix");

        // Assert
        assert!(page.can_switch_layout);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_results, 52);
        assert_eq!(page.items[0].identity(), ItemIdentity::Movie(603));
        assert_eq!(page.items[1].title().as_deref(), Some("The Matrix Reloaded"));
    }

    #[test]
    fn test_parse_people_and_keywords_are_fixed_layout() {
        // Arrange
        let people = SearchResponse::People(PagedResponse {
            page: 1,
            results: vec![person(6384, "Keanu Reeves")],
            total_pages: 1,
            total_results: 1,
        });
        let keywords = SearchResponse::Keywords(PagedResponse {
            page: 1,
            results: vec![keyword(4565, "matrix")],
            total_pages: 1,
            total_results: 1,
        });

        // Act
        let people = parse_response(people, "keanu");
        let keywords = parse_response(keywords, "mat");

        // Assert
        assert!(!people.can_switch_layout);
        assert!(!keywords.can_switch_layout);
        assert_eq!(people.items[0].identity(), ItemIdentity::Person(6384));
        assert_eq!(keywords.items[0].title().as_deref(), Some("#matrix"));
    }

    #[tokio::test]
    async fn test_execute_routes_to_matching_api_call() {
        // Arrange
        let api = MockTmdbApi::default();
        api.push_people(Ok(vec![person(6384, "Keanu Reeves")]));
        let request = SearchRequest::People(SearchPeopleParams::new("keanu"));

        // Act
        let response = execute(&api, &request).await.unwrap();

        // Assert
        assert!(matches!(response, SearchResponse::People(ref p) if p.results.len() == 1));
        assert_eq!(api.calls(), vec![request.endpoint()]);
    }

    #[tokio::test]
    async fn test_execute_propagates_failure() {
        // Arrange
        let api = MockTmdbApi::default();
        api.push_movies(Err(503));
        let request = SearchRequest::Movies(SearchMoviesParams::new("matrix"));

        // Act
        let result = execute(&api, &request).await;

        // Assert
        assert!(matches!(result, Err(TmdbError::Api { status: 503, .. })));
    }
}
