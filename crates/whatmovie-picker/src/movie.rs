//! Normalized movie record.

use whatmovie_api::backend::ProviderMovie;

/// A movie in the stable shape used by the pool and the selection.
///
/// Built once from the backend JSON and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSummary {
    /// TMDB movie ID.
    pub id: u64,
    /// Localized title.
    pub title: String,
    /// Synopsis (empty when the provider has none).
    pub description: String,
    /// Vote average on a 0-10 scale.
    pub rating_average: Option<f64>,
    /// Genre IDs in provider order.
    pub genre_ids: Vec<u32>,
    /// Poster image path.
    pub poster_path: Option<String>,
    /// Backdrop image path.
    pub backdrop_path: Option<String>,
    /// Release date as sent by the provider (YYYY-MM-DD or empty).
    pub release_date: String,
}

impl From<&ProviderMovie> for MovieSummary {
    fn from(movie: &ProviderMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            description: movie.overview.clone().unwrap_or_default(),
            rating_average: movie.vote_average,
            genre_ids: movie.genre_ids.clone(),
            poster_path: movie.poster_path.clone(),
            backdrop_path: movie.backdrop_path.clone(),
            release_date: movie.release_date.clone().unwrap_or_default(),
        }
    }
}

/// Normalizes a provider result list, preserving order.
#[must_use]
pub fn normalize_movies(results: &[ProviderMovie]) -> Vec<MovieSummary> {
    results.iter().map(MovieSummary::from).collect()
}
