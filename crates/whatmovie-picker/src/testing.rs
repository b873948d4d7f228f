//! Test helpers: movie builders and an in-memory backend.
#![allow(clippy::unwrap_used)]
#![allow(clippy::arithmetic_side_effects)]

use std::sync::Mutex;

use anyhow::{Context, Result};
use whatmovie_api::backend::{
    MovieApi, PopularResponse, ProviderMovie, RuntimeResponse, SearchResponse, TrailerResponse,
    TrailerVideo,
};

use crate::movie::MovieSummary;

/// Builds a provider movie with a predictable shape.
pub fn provider_movie(id: u64) -> ProviderMovie {
    ProviderMovie {
        id,
        title: format!("Movie {id}"),
        overview: Some(format!("Overview of movie {id}")),
        vote_average: Some(7.5),
        genre_ids: vec![18, 35],
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        release_date: Some(String::from("2001-05-04")),
    }
}

/// Builds provider movies with IDs `start..start + count`.
pub fn provider_movies(start: u64, count: u64) -> Vec<ProviderMovie> {
    (start..start + count).map(provider_movie).collect()
}

/// Builds a normalized movie.
pub fn movie(id: u64) -> MovieSummary {
    MovieSummary::from(&provider_movie(id))
}

/// Builds normalized movies with IDs `1..=count`.
pub fn movies(count: u64) -> Vec<MovieSummary> {
    (1..=count).map(movie).collect()
}

/// In-memory backend. `None` responses fail like a transport error.
#[derive(Debug, Default)]
pub struct MockApi {
    pub popular: Option<PopularResponse>,
    pub search: Option<SearchResponse>,
    pub runtime: Option<RuntimeResponse>,
    pub trailer: Option<TrailerResponse>,
    pub calls: Mutex<Vec<String>>,
}

impl MockApi {
    /// Popular feed of `count` movies, search feed of `count` movies
    /// starting at 101 over `total_pages`, runtime 120, trailer "trailer-key".
    pub fn healthy(count: u64, total_pages: u32) -> Self {
        Self {
            popular: Some(PopularResponse {
                results: provider_movies(1, count),
                total_pages: None,
            }),
            search: Some(SearchResponse {
                results: provider_movies(101, count),
                total_pages,
            }),
            runtime: Some(RuntimeResponse { runtime: Some(120) }),
            trailer: Some(TrailerResponse {
                results: vec![TrailerVideo {
                    key: String::from("trailer-key"),
                }],
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the recorded calls (`popular`, `search:<addon>`, `runtime:<id>`, `trailer:<id>`).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns the recorded calls except runtime/trailer lookups.
    pub fn fetches(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c == "popular" || c.starts_with("search:"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MovieApi for MockApi {
    async fn popular(&self) -> Result<PopularResponse> {
        self.record(String::from("popular"));
        self.popular.clone().context("mock: popular unavailable")
    }

    async fn search(&self, url_addon: &str) -> Result<SearchResponse> {
        self.record(format!("search:{url_addon}"));
        self.search.clone().context("mock: search unavailable")
    }

    async fn runtime(&self, movie_id: u64) -> Result<RuntimeResponse> {
        self.record(format!("runtime:{movie_id}"));
        self.runtime.clone().context("mock: runtime unavailable")
    }

    async fn trailer(&self, movie_id: u64) -> Result<TrailerResponse> {
        self.record(format!("trailer:{movie_id}"));
        self.trailer.clone().context("mock: trailer unavailable")
    }
}
