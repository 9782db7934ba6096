//! Scripted fakes shared by unit tests.
#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use reelscout_api::tmdb::{
    DiscoverMoviesParams, GenreListResponse, KeywordListResponse, MovieListResponse,
    PagedResponse, PersonListResponse, SearchKeywordsParams, SearchMoviesParams,
    SearchPeopleParams, TmdbApi, TmdbEndpoint, TmdbError, TmdbKeyword, TmdbMovie, TmdbPerson,
};

use crate::history::HistoryBackend;

type Scripted<T> = Mutex<VecDeque<Result<T, u16>>>;

/// `TmdbApi` fake that replays queued replies per endpoint family.
///
/// Discover and movie search share the movie queue. Replies are taken in
/// call order, before the optional delay. An `Err(status)` entry becomes
/// `TmdbError::Api`; an empty queue answers 404.
#[derive(Debug, Default)]
pub struct MockTmdbApi {
    movies: Scripted<MovieListResponse>,
    people: Scripted<PersonListResponse>,
    keywords: Scripted<KeywordListResponse>,
    calls: Mutex<Vec<TmdbEndpoint>>,
    delay: Duration,
}

impl MockTmdbApi {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn push_movies(&self, reply: Result<MovieListResponse, u16>) {
        self.movies.lock().unwrap().push_back(reply);
    }

    pub fn push_people(&self, reply: Result<Vec<TmdbPerson>, u16>) {
        self.people.lock().unwrap().push_back(reply.map(single_page));
    }

    pub fn push_keywords(&self, reply: Result<Vec<TmdbKeyword>, u16>) {
        self.keywords.lock().unwrap().push_back(reply.map(single_page));
    }

    pub fn calls(&self) -> Vec<TmdbEndpoint> {
        self.calls.lock().unwrap().clone()
    }

    async fn reply<T>(&self, endpoint: TmdbEndpoint, queue: &Scripted<T>) -> Result<T, TmdbError> {
        self.calls.lock().unwrap().push(endpoint);
        let next = queue.lock().unwrap().pop_front();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err(status)) => Err(TmdbError::Api {
                status,
                message: String::from("scripted failure"),
            }),
            None => Err(TmdbError::Api {
                status: 404,
                message: String::from("no scripted reply"),
            }),
        }
    }
}

impl TmdbApi for MockTmdbApi {
    async fn discover_movies(
        &self,
        params: &DiscoverMoviesParams,
    ) -> Result<MovieListResponse, TmdbError> {
        self.reply(TmdbEndpoint::DiscoverMovies(params.clone()), &self.movies)
            .await
    }

    async fn search_keywords(
        &self,
        params: &SearchKeywordsParams,
    ) -> Result<KeywordListResponse, TmdbError> {
        self.reply(TmdbEndpoint::SearchKeywords(params.clone()), &self.keywords)
            .await
    }

    async fn search_people(
        &self,
        params: &SearchPeopleParams,
    ) -> Result<PersonListResponse, TmdbError> {
        self.reply(TmdbEndpoint::SearchPeople(params.clone()), &self.people)
            .await
    }

    async fn search_movies(
        &self,
        params: &SearchMoviesParams,
    ) -> Result<MovieListResponse, TmdbError> {
        self.reply(TmdbEndpoint::SearchMovies(params.clone()), &self.movies)
            .await
    }

    async fn movie_genres(&self, _language: &str) -> Result<GenreListResponse, TmdbError> {
        Ok(GenreListResponse { genres: Vec::new() })
    }
}

fn single_page<T>(results: Vec<T>) -> PagedResponse<T> {
    let total = u32::try_from(results.len()).unwrap();
    PagedResponse {
        page: 1,
        results,
        total_pages: 1,
        total_results: total,
    }
}

pub fn movie(id: u64, title: &str) -> TmdbMovie {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "title": title,
        "release_date": "1999-03-30",
        "poster_path": format!("/{id}.jpg")
    }))
    .unwrap()
}

pub fn person(id: u64, name: &str) -> TmdbPerson {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": name,
        "known_for_department": "Acting",
        "profile_path": format!("/{id}.jpg")
    }))
    .unwrap()
}

pub fn keyword(id: u64, name: &str) -> TmdbKeyword {
    serde_json::from_value(serde_json::json!({ "id": id, "name": name })).unwrap()
}

/// Movie page whose titles are `Movie <id>`.
pub fn movie_page(page: u32, total_pages: u32, ids: &[u64]) -> MovieListResponse {
    PagedResponse {
        page,
        results: ids
            .iter()
            .map(|id| movie(*id, &format!("Movie {id}")))
            .collect(),
        total_pages,
        total_results: total_pages.saturating_mul(20),
    }
}

/// In-memory history backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    value: Mutex<Option<String>>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: Mutex::new(Some(String::from(value))),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            value: Mutex::new(None),
            fail_writes: true,
        }
    }

    pub fn stored(&self) -> Option<String> {
        self.value.lock().unwrap().clone()
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self, _key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.value.lock().unwrap().clone())
    }

    fn store(&self, _key: &str, value: &str) -> anyhow::Result<()> {
        if self.fail_writes {
            anyhow::bail!("disk full");
        }
        *self.value.lock().unwrap() = Some(String::from(value));
        Ok(())
    }
}
