//! `MovieApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::types::{PopularResponse, RuntimeResponse, SearchResponse, TrailerResponse};

/// Backend proxy API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait,
/// which is the variant implemented by clients so lookups can be spawned.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(MovieApi: Send)]
pub trait LocalMovieApi {
    /// Fetches the default popular-movie feed (`GET /api/v1/popular`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn popular(&self) -> Result<PopularResponse>;

    /// Runs a filtered discover search (`POST /api/v1/search`).
    ///
    /// `url_addon` is the query fragment appended by the backend to its
    /// discover request (empty means unfiltered).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn search(&self, url_addon: &str) -> Result<SearchResponse>;

    /// Looks up the runtime of a movie (`POST /api/v1/runtime`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn runtime(&self, movie_id: u64) -> Result<RuntimeResponse>;

    /// Looks up the trailer videos of a movie (`POST /api/v1/trailer`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails, the status is not a
    /// success, or JSON parsing fails.
    async fn trailer(&self, movie_id: u64) -> Result<TrailerResponse>;
}
