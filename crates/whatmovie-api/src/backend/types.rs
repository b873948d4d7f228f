//! Backend request bodies and response types.

use serde::{Deserialize, Serialize};

// --- Movies ---

/// A movie as forwarded from TMDB by the backend.
///
/// Only `id` is mandatory; everything else tolerates `null` or absence
/// because the popular and discover feeds are not consistent about it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMovie {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    #[serde(default)]
    pub title: String,
    /// Overview text.
    #[serde(default)]
    pub overview: Option<String>,
    /// Vote average (0-10).
    #[serde(default)]
    pub vote_average: Option<f64>,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<u32>,
    /// Poster image path.
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Backdrop image path.
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Release date (YYYY-MM-DD, may be empty).
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Response from `GET /api/v1/popular`.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularResponse {
    /// Movies on the first popular page.
    pub results: Vec<ProviderMovie>,
    /// Total number of pages, when the backend forwards it.
    #[serde(default)]
    pub total_pages: Option<u32>,
}

/// Response from `POST /api/v1/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Movies on the requested page.
    pub results: Vec<ProviderMovie>,
    /// Total number of pages (0 if the backend omitted it).
    #[serde(default)]
    pub total_pages: u32,
}

// --- Lookups ---

/// Response from `POST /api/v1/runtime`.
#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeResponse {
    /// Runtime in minutes (null when unknown).
    #[serde(default)]
    pub runtime: Option<u32>,
}

/// Response from `POST /api/v1/trailer`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailerResponse {
    /// Videos attached to the movie, in backend order.
    #[serde(default)]
    pub results: Vec<TrailerVideo>,
}

impl TrailerResponse {
    /// Returns the key of the first video, if any.
    #[must_use]
    pub fn first_key(&self) -> Option<&str> {
        self.results.first().map(|v| v.key.as_str())
    }
}

/// A single trailer video entry.
#[derive(Debug, Clone, Deserialize)]
pub struct TrailerVideo {
    /// `YouTube` video key.
    pub key: String,
}

// --- Request bodies ---

/// Body of `POST /api/v1/search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    /// Query fragment appended to the discover request.
    pub url_addon: &'a str,
}

/// Body of `POST /api/v1/runtime` and `POST /api/v1/trailer`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieIdRequest {
    /// TMDB movie ID.
    pub movie_id: u64,
}
