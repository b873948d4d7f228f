//! Presentation helpers for a selected movie.

use crate::genres::genre_name;
use crate::selection::Selection;

/// Base URL for 500px-wide TMDB posters.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Base URL for `YouTube` trailers.
pub const TRAILER_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// Returns the year of a `YYYY-MM-DD` release date.
#[must_use]
pub fn release_year(release_date: &str) -> Option<&str> {
    release_date
        .get(..4)
        .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
}

/// Formats a runtime as `2h 28min`, dropping a zero hour or minute part.
///
/// Absent and zero runtimes render nothing.
#[must_use]
pub fn runtime_label(runtime_minutes: Option<u32>) -> Option<String> {
    let minutes = runtime_minutes.filter(|&m| m > 0)?;
    let (hours, rest) = (minutes / 60, minutes % 60);
    let label = match (hours, rest) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    };
    Some(label)
}

/// Maps genre IDs to names, skipping unknown IDs.
#[must_use]
pub fn genre_names(genre_ids: &[u32]) -> Vec<&'static str> {
    genre_ids.iter().filter_map(|&id| genre_name(id)).collect()
}

/// Formats a rating as `{rating}/10` with the value as the backend sent it.
/// Absent or zero ratings render nothing.
#[must_use]
pub fn rating_badge(rating_average: Option<f64>) -> Option<String> {
    rating_average
        .filter(|&rating| rating > 0.0)
        .map(|rating| format!("{rating}/10"))
}

/// Builds the poster image URL for a poster path.
#[must_use]
pub fn poster_url(poster_path: &str) -> String {
    format!(
        "{POSTER_BASE_URL}/{}",
        poster_path.trim_start_matches('/')
    )
}

/// Builds the trailer URL for a `YouTube` key.
#[must_use]
pub fn trailer_url(trailer_key: &str) -> String {
    format!("{TRAILER_BASE_URL}{trailer_key}")
}

/// Everything a front end needs to render the selected movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    /// Title.
    pub title: String,
    /// Release year.
    pub year: Option<String>,
    /// Rating badge.
    pub rating: Option<String>,
    /// Runtime label.
    pub runtime: Option<String>,
    /// Genre names.
    pub genres: Vec<&'static str>,
    /// Synopsis.
    pub description: String,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Trailer URL.
    pub trailer_url: Option<String>,
}

impl MovieCard {
    /// Builds the card for a selection. `None` until a movie is selected.
    #[must_use]
    pub fn from_selection(selection: &Selection) -> Option<Self> {
        let movie = selection.movie.as_ref()?;
        Some(Self {
            title: movie.title.clone(),
            year: release_year(&movie.release_date).map(String::from),
            rating: rating_badge(movie.rating_average),
            runtime: runtime_label(selection.runtime_minutes),
            genres: genre_names(&movie.genre_ids),
            description: movie.description.clone(),
            poster_url: movie.poster_path.as_deref().map(poster_url),
            trailer_url: selection.trailer_key.as_deref().map(trailer_url),
        })
    }

    /// Returns the header line: `TITLE (YEAR)`.
    #[must_use]
    pub fn heading(&self) -> String {
        let title = self.title.to_uppercase();
        match &self.year {
            Some(year) => format!("{title} ({year})"),
            None => title,
        }
    }

    /// Returns the rating, runtime and genres joined by ` | `.
    #[must_use]
    pub fn details(&self) -> String {
        let genres = self.genres.join(", ");
        [self.rating.as_deref(), self.runtime.as_deref(), Some(genres.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
