//! Backend proxy client module.
//!
//! Handles HTTP requests to the `/api/v1` endpoints of the backend
//! proxy and decodes the TMDB-shaped JSON it forwards.

mod api;
mod client;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{LocalMovieApi, MovieApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{BackendClient, BackendClientBuilder, DEFAULT_BASE_URL};
pub use types::{
    MovieIdRequest, PopularResponse, ProviderMovie, RuntimeResponse, SearchRequest,
    SearchResponse, TrailerResponse, TrailerVideo,
};
