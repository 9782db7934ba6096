//! Request parameters for the TMDB list endpoints.

/// Default response language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Query pairs sent with a GET request.
pub type QueryPairs = Vec<(&'static str, String)>;

/// Parameters for the `discover/movie` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverMoviesParams {
    /// Sort order (e.g., "popularity.desc").
    pub sort_by: Option<String>,
    /// Comma-separated person IDs (`with_cast`).
    pub with_cast: Option<String>,
    /// Comma-separated keyword IDs (`with_keywords`).
    pub with_keywords: Option<String>,
    /// Filter by primary release year.
    pub primary_release_year: Option<u32>,
    /// Result page.
    pub page: u32,
}

impl DiscoverMoviesParams {
    /// Creates discover params for the given page with no filters.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Sets the cast filter.
    #[must_use]
    pub fn with_cast(mut self, cast: impl Into<String>) -> Self {
        self.with_cast = Some(cast.into());
        self
    }

    /// Sets the keyword filter.
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.with_keywords = Some(keywords.into());
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// Sets the primary release year filter.
    #[must_use]
    pub const fn primary_release_year(mut self, year: u32) -> Self {
        self.primary_release_year = Some(year);
        self
    }

    /// Builds query pairs, omitting absent filters.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        let mut query: QueryPairs = Vec::new();
        if let Some(ref sort_by) = self.sort_by {
            query.push(("sort_by", sort_by.clone()));
        }
        if let Some(ref cast) = self.with_cast {
            query.push(("with_cast", cast.clone()));
        }
        if let Some(ref keywords) = self.with_keywords {
            query.push(("with_keywords", keywords.clone()));
        }
        if let Some(year) = self.primary_release_year {
            query.push(("primary_release_year", year.to_string()));
        }
        query.push(("page", self.page.to_string()));
        query
    }
}

/// Parameters for the `search/keyword` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKeywordsParams {
    /// Search query (required).
    pub query: String,
    /// Result page.
    pub page: u32,
}

impl SearchKeywordsParams {
    /// Creates new search params with the given query (page 1).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Builds query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        vec![("query", self.query.clone()), ("page", self.page.to_string())]
    }
}

/// Parameters for the `search/person` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPeopleParams {
    /// Search query (required).
    pub query: String,
    /// Include adult profiles.
    pub include_adult: bool,
    /// Response language (default: "en-US").
    pub language: String,
    /// Result page.
    pub page: u32,
}

impl SearchPeopleParams {
    /// Creates new search params with the given query (page 1).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            include_adult: false,
            language: String::from(DEFAULT_LANGUAGE),
            page: 1,
        }
    }

    /// Sets the response language.
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets the adult filter.
    #[must_use]
    pub const fn include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Builds query pairs. `include_adult` is sent as `"true"`/`"false"`.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        vec![
            ("query", self.query.clone()),
            ("include_adult", self.include_adult.to_string()),
            ("language", self.language.clone()),
            ("page", self.page.to_string()),
        ]
    }
}

/// Parameters for the `search/movie` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMoviesParams {
    /// Search query (required).
    pub query: String,
    /// Result page.
    pub page: u32,
}

impl SearchMoviesParams {
    /// Creates new search params with the given query (page 1).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
        }
    }

    /// Sets the result page.
    #[must_use]
    pub const fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Builds query pairs.
    #[must_use]
    pub fn to_query(&self) -> QueryPairs {
        vec![("query", self.query.clone()), ("page", self.page.to_string())]
    }
}
